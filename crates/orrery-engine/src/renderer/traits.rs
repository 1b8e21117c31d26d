//! Renderer contract.
//!
//! The engine never issues graphics calls itself. A backend receives a
//! finished [`SceneSnapshot`] per frame and owns rasterization, depth
//! testing, lighting and presentation.

use super::snapshot::SceneSnapshot;

/// Timing information from a draw call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawTiming {
    /// Time spent preparing and submitting the frame (microseconds).
    pub draw_us: u32,
    /// Number of primitives handed to the backend.
    pub primitives: u32,
}

/// Renderer trait for drawing backends.
///
/// # Example Implementation
///
/// ```ignore
/// struct GlRenderer { /* context, programs, buffers */ }
///
/// impl Renderer for GlRenderer {
///     fn backend(&self) -> &'static str { "webgl2" }
///
///     fn draw(&mut self, frame: &SceneSnapshot) -> DrawTiming {
///         // Upload view/projection, draw stars, rings, spheres, mesh...
///     }
///
///     fn resize(&mut self, width: u32, height: u32) {
///         // Update viewport...
///     }
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g., "shared-buffer", "webgl2").
    fn backend(&self) -> &'static str;

    /// Draw a complete frame.
    fn draw(&mut self, frame: &SceneSnapshot) -> DrawTiming;

    /// Handle surface resize.
    fn resize(&mut self, width: u32, height: u32);
}

/// Primitive count of a snapshot: one per star, ring, sphere and mesh triangle.
pub fn primitive_count(frame: &SceneSnapshot) -> u32 {
    let mesh = frame.mesh.as_ref().map_or(0, |m| m.mesh.triangle_count());
    (frame.stars.len() + frame.orbit_rings.len() + frame.spheres.len() + mesh) as u32
}
