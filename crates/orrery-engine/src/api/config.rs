use serde::{Deserialize, Serialize};

use crate::components::mesh::{DEFAULT_MESH_PATH, DEFAULT_TARGET_SIZE};
use crate::components::starfield::StarfieldParams;

/// Configuration for a simulation, provided by the scene or loaded from JSON.
/// Every field has a default, so a partial (or empty) JSON object is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Window title requested from the host.
    pub title: String,
    /// Initial surface width in pixels.
    pub width: u32,
    /// Initial surface height in pixels.
    pub height: u32,

    /// Camera start position.
    pub camera_position: [f32; 3],
    /// Camera yaw in degrees (fixed).
    pub camera_yaw: f32,
    /// Camera pitch in degrees (fixed).
    pub camera_pitch: f32,
    /// Camera speed in world units per second.
    pub move_speed: f32,

    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,

    pub starfield: StarfieldParams,

    /// Mesh source, resolved by the host.
    pub mesh_path: String,
    /// Longest side of the mesh after scaling.
    pub mesh_target_size: f32,

    /// Whether orbit rings are visible at start.
    pub show_orbits: bool,
    /// Upper bound on a single frame's delta time, in seconds.
    pub max_dt: f32,
    /// Starfield seed. `None` lets the host seed from its clock.
    pub seed: Option<u64>,

    /// Wire capacities (see `bridge::protocol`).
    pub max_spheres: usize,
    pub max_rings: usize,
    pub max_mesh_vertices: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            title: "Solar System".to_string(),
            width: 1280,
            height: 720,
            camera_position: [0.0, 8.0, 85.0],
            camera_yaw: 0.0,
            camera_pitch: -5.0,
            move_speed: 25.0,
            fov_deg: 65.0,
            near: 0.1,
            far: 500.0,
            starfield: StarfieldParams::default(),
            mesh_path: DEFAULT_MESH_PATH.to_string(),
            mesh_target_size: DEFAULT_TARGET_SIZE,
            show_orbits: true,
            max_dt: 0.25,
            seed: None,
            max_spheres: 64,
            max_rings: 64,
            max_mesh_vertices: 65536,
        }
    }
}

impl SimConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
