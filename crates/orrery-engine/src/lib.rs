pub mod api;
pub mod core;
pub mod components;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::SimConfig;
pub use api::simulation::{FrameLoop, SimContext, Simulation};
pub use core::camera::{CameraBasis, CameraView, Direction, FlyCamera, MoveInput};
pub use core::math::{deg_to_rad, Vector};
pub use core::orbit::{advance_all, wrap_degrees, Moon, Planet};
pub use core::rng::Rng;
pub use core::time::FrameClock;
pub use components::mesh::{Mesh, MeshLoadError, MeshTransform, RenderMesh, Triangle};
pub use components::starfield::{Star, StarfieldParams};
pub use input::queue::{InputEvent, InputQueue, Key};
pub use bridge::protocol::ProtocolLayout;
pub use renderer::{
    DrawTiming, FrameBuffer, MeshDraw, OrbitRing, PointLight, Projection, Renderer,
    SceneSnapshot, SphereDraw, StarPoint,
};
