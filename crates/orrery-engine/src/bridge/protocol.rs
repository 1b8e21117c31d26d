/// Shared frame buffer layout.
/// Must stay in sync with the host renderer that reads it.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 64 floats]
/// [Stars: max_stars × 8 floats]
/// [Spheres: max_spheres × 12 floats]
/// [Rings: max_rings × 12 floats]
/// [Mesh vertices: max_mesh_vertices × 6 floats]
/// ```
///
/// Capacities are written into the header once, when the buffer is created.
/// The host reads them from the header to compute offsets.

use crate::api::config::SimConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 64;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_ELAPSED: usize = 2;
pub const HEADER_SHOW_ORBITS: usize = 3;
pub const HEADER_MAX_STARS: usize = 4;
pub const HEADER_STAR_COUNT: usize = 5;
pub const HEADER_MAX_SPHERES: usize = 6;
pub const HEADER_SPHERE_COUNT: usize = 7;
pub const HEADER_MAX_RINGS: usize = 8;
pub const HEADER_RING_COUNT: usize = 9;
pub const HEADER_MAX_MESH_VERTICES: usize = 10;
pub const HEADER_MESH_VERTEX_COUNT: usize = 11;
/// Eye position, 3 floats.
pub const HEADER_EYE: usize = 12;
/// Look target, 3 floats.
pub const HEADER_TARGET: usize = 15;
/// Up vector, 3 floats.
pub const HEADER_UP: usize = 18;
pub const HEADER_FOV: usize = 21;
pub const HEADER_ASPECT: usize = 22;
pub const HEADER_NEAR: usize = 23;
pub const HEADER_FAR: usize = 24;
/// Light position, 3 floats.
pub const HEADER_LIGHT_POS: usize = 25;
/// Light colour, 3 floats.
pub const HEADER_LIGHT_COLOR: usize = 28;
/// 1.0 when the mesh section holds geometry.
pub const HEADER_MESH_PRESENT: usize = 31;
/// Mesh model matrix, 16 floats column-major.
pub const HEADER_MESH_MODEL: usize = 32;
/// Mesh colour, 3 floats.
pub const HEADER_MESH_COLOR: usize = 48;
pub const HEADER_SURFACE_WIDTH: usize = 51;
pub const HEADER_SURFACE_HEIGHT: usize = 52;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per star: x, y, z, size, r, g, b, pad.
pub const STAR_FLOATS: usize = 8;
/// Floats per sphere: x, y, z, radius, r, g, b, emission, tilt, pad×3.
pub const SPHERE_FLOATS: usize = 12;
/// Floats per ring: cx, cy, cz, radius_x, radius_z, tilt, segments, r, g, b, pad×2.
pub const RING_FLOATS: usize = 12;
/// Floats per mesh vertex: x, y, z, nx, ny, nz.
pub const MESH_VERTEX_FLOATS: usize = 6;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_stars: usize,
    pub max_spheres: usize,
    pub max_rings: usize,
    pub max_mesh_vertices: usize,

    pub star_data_offset: usize,
    pub sphere_data_offset: usize,
    pub ring_data_offset: usize,
    pub mesh_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_stars: usize, max_spheres: usize, max_rings: usize, max_mesh_vertices: usize) -> Self {
        let star_data_offset = HEADER_FLOATS;
        let sphere_data_offset = star_data_offset + max_stars * STAR_FLOATS;
        let ring_data_offset = sphere_data_offset + max_spheres * SPHERE_FLOATS;
        let mesh_data_offset = ring_data_offset + max_rings * RING_FLOATS;
        let buffer_total_floats = mesh_data_offset + max_mesh_vertices * MESH_VERTEX_FLOATS;

        Self {
            max_stars,
            max_spheres,
            max_rings,
            max_mesh_vertices,
            star_data_offset,
            sphere_data_offset,
            ring_data_offset,
            mesh_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a SimConfig. Star capacity follows the starfield size.
    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(
            config.starfield.count,
            config.max_spheres,
            config.max_rings,
            config.max_mesh_vertices,
        )
    }
}
