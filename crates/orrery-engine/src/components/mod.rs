pub mod mesh;
pub mod starfield;
