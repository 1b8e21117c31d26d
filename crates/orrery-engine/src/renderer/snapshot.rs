//! Everything a renderer needs to draw one frame.
//!
//! Built by the simulation after its update step; read-only afterwards.
//! Buffers are reused across frames, so `clear` keeps their capacity.

use std::sync::Arc;

use crate::components::mesh::{MeshTransform, RenderMesh};
use crate::core::camera::CameraView;
use crate::core::math::Vector;

/// Perspective parameters. Aspect comes from the current surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_deg: 65.0,
            aspect: 1280.0 / 720.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self) -> glam::Mat4 {
        glam::Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }
}

/// Positional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vector,
    /// RGB, may exceed 1.0.
    pub color: [f32; 3],
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vector::ZERO,
            color: [1.0, 1.0, 1.0],
        }
    }
}

/// A star as a coloured point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarPoint {
    pub position: Vector,
    pub size: f32,
    pub color: [f32; 3],
}

/// An unlit elliptical orbit line in the XZ plane of its frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitRing {
    pub center: Vector,
    pub radius_x: f32,
    pub radius_z: f32,
    /// Degrees about Z applied to the ring's frame.
    pub tilt: f32,
    pub segments: u32,
    pub color: [f32; 3],
}

impl OrbitRing {
    /// Points along the ring, first point not repeated at the end.
    pub fn points(&self) -> Vec<Vector> {
        let tilt = self.tilt.to_radians();
        (0..self.segments)
            .map(|i| {
                let a = i as f32 / self.segments as f32 * std::f32::consts::TAU;
                let local = Vector::new(self.radius_x * a.cos(), 0.0, self.radius_z * a.sin());
                self.center + local.rotate_z(tilt)
            })
            .collect()
    }
}

/// A lit sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereDraw {
    pub center: Vector,
    pub radius: f32,
    pub color: [f32; 3],
    /// Fraction of the colour emitted regardless of lighting.
    pub emission: f32,
    /// Degrees about Z.
    pub tilt: f32,
}

/// The loaded mesh and where to put it this frame.
#[derive(Debug, Clone)]
pub struct MeshDraw {
    pub mesh: Arc<RenderMesh>,
    pub transform: MeshTransform,
    pub color: [f32; 3],
}

#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    pub view: CameraView,
    pub projection: Projection,
    pub light: PointLight,
    pub stars: Vec<StarPoint>,
    pub orbit_rings: Vec<OrbitRing>,
    pub spheres: Vec<SphereDraw>,
    pub mesh: Option<MeshDraw>,
    pub show_orbits: bool,
    /// Seconds since the first frame.
    pub elapsed: f64,
    pub frame: u64,
}

impl Default for SceneSnapshot {
    fn default() -> Self {
        Self {
            view: CameraView {
                eye: Vector::ZERO,
                target: Vector::DEFAULT_DIRECTION,
                up: Vector::Y,
            },
            projection: Projection::default(),
            light: PointLight::default(),
            stars: Vec::new(),
            orbit_rings: Vec::new(),
            spheres: Vec::new(),
            mesh: None,
            show_orbits: false,
            elapsed: 0.0,
            frame: 0,
        }
    }
}

impl SceneSnapshot {
    /// Drop per-frame draw lists, keeping their allocations.
    pub fn clear(&mut self) {
        self.stars.clear();
        self.orbit_rings.clear();
        self.spheres.clear();
        self.mesh = None;
    }

    /// Combined projection * view matrix.
    pub fn view_projection(&self) -> glam::Mat4 {
        self.projection.matrix() * self.view.view_matrix()
    }
}
