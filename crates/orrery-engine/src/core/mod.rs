pub mod camera;
pub mod math;
pub mod orbit;
pub mod rng;
pub mod time;
