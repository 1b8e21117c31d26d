pub mod instance;
pub mod snapshot;
pub mod traits;

// Re-export key types for convenient access
pub use instance::{FrameBuffer, MeshVertex, RingInstance, SphereInstance, StarInstance};
pub use snapshot::{MeshDraw, OrbitRing, PointLight, Projection, SceneSnapshot, SphereDraw, StarPoint};
pub use traits::{DrawTiming, Renderer};
