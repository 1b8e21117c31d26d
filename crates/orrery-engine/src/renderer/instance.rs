use std::sync::Arc;

use bytemuck::{Pod, Zeroable};

use crate::bridge::protocol::*;
use crate::components::mesh::RenderMesh;
use crate::core::math::Vector;
use super::snapshot::{OrbitRing, SceneSnapshot, SphereDraw, StarPoint};
use super::traits::{primitive_count, DrawTiming, Renderer};

/// Per-star data in the shared frame buffer: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StarInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Point size in pixels, already snapped to a bucket.
    pub size: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub _pad: f32,
}

impl StarInstance {
    pub const FLOATS: usize = STAR_FLOATS;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl From<&StarPoint> for StarInstance {
    fn from(star: &StarPoint) -> Self {
        Self {
            x: star.position.x,
            y: star.position.y,
            z: star.position.z,
            size: star.size,
            r: star.color[0],
            g: star.color[1],
            b: star.color[2],
            _pad: 0.0,
        }
    }
}

/// Per-sphere data: 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SphereInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Self-illumination (0.0 = fully lit by the point light).
    pub emission: f32,
    /// Degrees about Z.
    pub tilt: f32,
    pub _pad: [f32; 3],
}

impl SphereInstance {
    pub const FLOATS: usize = SPHERE_FLOATS;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl From<&SphereDraw> for SphereInstance {
    fn from(sphere: &SphereDraw) -> Self {
        Self {
            x: sphere.center.x,
            y: sphere.center.y,
            z: sphere.center.z,
            radius: sphere.radius,
            r: sphere.color[0],
            g: sphere.color[1],
            b: sphere.color[2],
            emission: sphere.emission,
            tilt: sphere.tilt,
            _pad: [0.0; 3],
        }
    }
}

/// Per-ring data: 12 floats = 48 bytes stride.
/// The host tessellates the ellipse into `segments` line segments.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RingInstance {
    pub cx: f32,
    pub cy: f32,
    pub cz: f32,
    pub radius_x: f32,
    pub radius_z: f32,
    pub tilt: f32,
    pub segments: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub _pad: [f32; 2],
}

impl RingInstance {
    pub const FLOATS: usize = RING_FLOATS;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl From<&OrbitRing> for RingInstance {
    fn from(ring: &OrbitRing) -> Self {
        Self {
            cx: ring.center.x,
            cy: ring.center.y,
            cz: ring.center.z,
            radius_x: ring.radius_x,
            radius_z: ring.radius_z,
            tilt: ring.tilt,
            segments: ring.segments as f32,
            r: ring.color[0],
            g: ring.color[1],
            b: ring.color[2],
            _pad: [0.0; 2],
        }
    }
}

/// Un-indexed mesh vertex with its face normal: 6 floats = 24 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub nx: f32,
    pub ny: f32,
    pub nz: f32,
}

impl MeshVertex {
    pub const FLOATS: usize = MESH_VERTEX_FLOATS;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn new(position: Vector, normal: Vector) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            nx: normal.x,
            ny: normal.y,
            nz: normal.z,
        }
    }
}

/// Expand a render mesh into three vertices per triangle.
pub fn flatten_mesh(mesh: &RenderMesh) -> Vec<MeshVertex> {
    let mut out = Vec::with_capacity(mesh.triangle_count() * 3);
    for (tri, normal) in mesh.triangles.iter().zip(&mesh.normals) {
        for &index in tri {
            out.push(MeshVertex::new(mesh.vertices[index], *normal));
        }
    }
    out
}

/// Flat f32 buffer laid out per [`ProtocolLayout`], read by the host renderer.
///
/// Implements [`Renderer`] by packing each snapshot into the buffer. Lists
/// longer than their section are truncated. The mesh section is rewritten
/// only when a different mesh is attached.
pub struct FrameBuffer {
    layout: ProtocolLayout,
    data: Vec<f32>,
    mesh: Option<Arc<RenderMesh>>,
    mesh_vertex_count: usize,
}

impl FrameBuffer {
    pub fn new(layout: ProtocolLayout) -> Self {
        let data = vec![0.0; layout.buffer_total_floats];
        let mut buffer = Self {
            layout,
            data,
            mesh: None,
            mesh_vertex_count: 0,
        };
        buffer.write_capacities();
        buffer
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Raw pointer to the buffer for SharedArrayBuffer reads.
    pub fn ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    pub fn header(&self, index: usize) -> f32 {
        self.data[index]
    }

    fn write_capacities(&mut self) {
        self.data[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        self.data[HEADER_MAX_STARS] = self.layout.max_stars as f32;
        self.data[HEADER_MAX_SPHERES] = self.layout.max_spheres as f32;
        self.data[HEADER_MAX_RINGS] = self.layout.max_rings as f32;
        self.data[HEADER_MAX_MESH_VERTICES] = self.layout.max_mesh_vertices as f32;
    }

    fn write_vec3(&mut self, at: usize, v: Vector) {
        self.data[at..at + 3].copy_from_slice(&v.to_array());
    }

    /// Copy a Pod slice into a section, returning how many items fit.
    fn write_section<T: Pod>(&mut self, offset: usize, capacity: usize, items: &[T]) -> usize {
        let count = items.len().min(capacity);
        let floats: &[f32] = bytemuck::cast_slice(&items[..count]);
        self.data[offset..offset + floats.len()].copy_from_slice(floats);
        count
    }

    fn write_mesh(&mut self, mesh: &Arc<RenderMesh>) {
        if self.mesh.as_ref().is_some_and(|m| Arc::ptr_eq(m, mesh)) {
            return;
        }
        let vertices = flatten_mesh(mesh);
        // Partial triangles are never uploaded.
        let capacity = self.layout.max_mesh_vertices - self.layout.max_mesh_vertices % 3;
        if vertices.len() > capacity {
            log::warn!(
                "mesh: {} vertices exceed buffer capacity {}, truncating",
                vertices.len(),
                capacity
            );
        }
        let offset = self.layout.mesh_data_offset;
        self.mesh_vertex_count = self.write_section(offset, capacity, &vertices);
        self.mesh = Some(Arc::clone(mesh));
    }

    /// Pack one snapshot.
    pub fn write(&mut self, frame: &SceneSnapshot) {
        self.data[HEADER_FRAME_COUNTER] = frame.frame as f32;
        self.data[HEADER_ELAPSED] = frame.elapsed as f32;
        self.data[HEADER_SHOW_ORBITS] = if frame.show_orbits { 1.0 } else { 0.0 };

        self.write_vec3(HEADER_EYE, frame.view.eye);
        self.write_vec3(HEADER_TARGET, frame.view.target);
        self.write_vec3(HEADER_UP, frame.view.up);
        self.data[HEADER_FOV] = frame.projection.fov_deg;
        self.data[HEADER_ASPECT] = frame.projection.aspect;
        self.data[HEADER_NEAR] = frame.projection.near;
        self.data[HEADER_FAR] = frame.projection.far;
        self.write_vec3(HEADER_LIGHT_POS, frame.light.position);
        self.data[HEADER_LIGHT_COLOR..HEADER_LIGHT_COLOR + 3].copy_from_slice(&frame.light.color);

        let stars: Vec<StarInstance> = frame.stars.iter().map(StarInstance::from).collect();
        let spheres: Vec<SphereInstance> = frame.spheres.iter().map(SphereInstance::from).collect();
        let rings: Vec<RingInstance> = frame.orbit_rings.iter().map(RingInstance::from).collect();

        let star_count = self.write_section(self.layout.star_data_offset, self.layout.max_stars, &stars);
        let sphere_count =
            self.write_section(self.layout.sphere_data_offset, self.layout.max_spheres, &spheres);
        let ring_count = self.write_section(self.layout.ring_data_offset, self.layout.max_rings, &rings);
        self.data[HEADER_STAR_COUNT] = star_count as f32;
        self.data[HEADER_SPHERE_COUNT] = sphere_count as f32;
        self.data[HEADER_RING_COUNT] = ring_count as f32;

        match &frame.mesh {
            Some(draw) => {
                self.write_mesh(&draw.mesh);
                self.data[HEADER_MESH_PRESENT] = if self.mesh_vertex_count > 0 { 1.0 } else { 0.0 };
                self.data[HEADER_MESH_VERTEX_COUNT] = self.mesh_vertex_count as f32;
                let model = draw.transform.model_matrix().to_cols_array();
                self.data[HEADER_MESH_MODEL..HEADER_MESH_MODEL + 16].copy_from_slice(&model);
                self.data[HEADER_MESH_COLOR..HEADER_MESH_COLOR + 3].copy_from_slice(&draw.color);
            }
            None => {
                self.data[HEADER_MESH_PRESENT] = 0.0;
                self.data[HEADER_MESH_VERTEX_COUNT] = 0.0;
            }
        }
    }
}

impl Renderer for FrameBuffer {
    fn backend(&self) -> &'static str {
        "shared-buffer"
    }

    fn draw(&mut self, frame: &SceneSnapshot) -> DrawTiming {
        self.write(frame);
        DrawTiming {
            draw_us: 0,
            primitives: primitive_count(frame),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.data[HEADER_SURFACE_WIDTH] = width as f32;
        self.data[HEADER_SURFACE_HEIGHT] = height as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{Mesh, MeshTransform};
    use crate::renderer::snapshot::MeshDraw;

    const TETRA: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 2 3\nf 1 2 4\nf 1 3 9\n";

    fn star(x: f32) -> StarPoint {
        StarPoint { position: Vector::new(x, 0.0, 0.0), size: 2.0, color: [0.5; 3] }
    }

    #[test]
    fn instance_strides() {
        assert_eq!(std::mem::size_of::<StarInstance>(), StarInstance::STRIDE_BYTES);
        assert_eq!(std::mem::size_of::<SphereInstance>(), SphereInstance::STRIDE_BYTES);
        assert_eq!(std::mem::size_of::<RingInstance>(), RingInstance::STRIDE_BYTES);
        assert_eq!(std::mem::size_of::<MeshVertex>(), MeshVertex::STRIDE_BYTES);
    }

    #[test]
    fn header_carries_capacities() {
        let buf = FrameBuffer::new(ProtocolLayout::new(4, 2, 2, 9));
        assert_eq!(buf.data().len(), buf.layout().buffer_total_floats);
        assert_eq!(buf.header(HEADER_PROTOCOL_VERSION), PROTOCOL_VERSION);
        assert_eq!(buf.header(HEADER_MAX_STARS), 4.0);
        assert_eq!(buf.header(HEADER_MAX_MESH_VERTICES), 9.0);
    }

    #[test]
    fn capacities_survive_frame_writes() {
        let mut buf = FrameBuffer::new(ProtocolLayout::new(4, 2, 2, 9));
        let mut snap = SceneSnapshot::default();
        snap.stars.push(star(1.0));
        buf.write(&snap);
        buf.write(&snap);

        assert_eq!(buf.header(HEADER_PROTOCOL_VERSION), PROTOCOL_VERSION);
        assert_eq!(buf.header(HEADER_MAX_STARS), 4.0);
        assert_eq!(buf.header(HEADER_MAX_SPHERES), 2.0);
        assert_eq!(buf.header(HEADER_MAX_RINGS), 2.0);
        assert_eq!(buf.header(HEADER_MAX_MESH_VERTICES), 9.0);
        assert_eq!(buf.header(HEADER_STAR_COUNT), 1.0);
    }

    #[test]
    fn stars_are_packed_and_truncated() {
        let mut buf = FrameBuffer::new(ProtocolLayout::new(2, 1, 1, 0));
        let mut snap = SceneSnapshot::default();
        snap.stars.extend([star(1.0), star(2.0), star(3.0)]);
        snap.frame = 7;
        buf.write(&snap);

        assert_eq!(buf.header(HEADER_STAR_COUNT), 2.0);
        assert_eq!(buf.header(HEADER_FRAME_COUNTER), 7.0);
        let off = buf.layout().star_data_offset;
        assert_eq!(buf.data()[off], 1.0);
        assert_eq!(buf.data()[off + STAR_FLOATS], 2.0);
        assert_eq!(buf.data()[off + 3], 2.0);
    }

    #[test]
    fn mesh_section_holds_valid_triangles() {
        let mesh = Arc::new(RenderMesh::from_mesh(&Mesh::parse(TETRA, 1.0)));
        assert_eq!(mesh.triangle_count(), 2);

        let mut buf = FrameBuffer::new(ProtocolLayout::new(0, 0, 0, 64));
        let mut snap = SceneSnapshot::default();
        snap.mesh = Some(MeshDraw {
            mesh,
            transform: MeshTransform::animated(1.0, 0.0),
            color: [0.75, 0.80, 0.95],
        });
        let timing = buf.draw(&snap);

        assert_eq!(timing.primitives, 2);
        assert_eq!(buf.header(HEADER_MESH_PRESENT), 1.0);
        assert_eq!(buf.header(HEADER_MESH_VERTEX_COUNT), 6.0);
        assert_eq!(buf.header(HEADER_MESH_COLOR), 0.75);
        // Model matrix translation column.
        assert_eq!(buf.header(HEADER_MESH_MODEL + 13), -3.0);
        assert_eq!(buf.header(HEADER_MESH_MODEL + 14), -18.0);
    }

    #[test]
    fn mesh_capacity_keeps_whole_triangles() {
        let mesh = Arc::new(RenderMesh::from_mesh(&Mesh::parse(TETRA, 1.0)));
        let mut buf = FrameBuffer::new(ProtocolLayout::new(0, 0, 0, 5));
        let mut snap = SceneSnapshot::default();
        snap.mesh = Some(MeshDraw { mesh, transform: MeshTransform::animated(1.0, 0.0), color: [1.0; 3] });
        buf.write(&snap);
        assert_eq!(buf.header(HEADER_MESH_VERTEX_COUNT), 3.0);
    }

    #[test]
    fn no_mesh_clears_flag() {
        let mut buf = FrameBuffer::new(ProtocolLayout::new(0, 0, 0, 0));
        buf.write(&SceneSnapshot::default());
        assert_eq!(buf.header(HEADER_MESH_PRESENT), 0.0);
    }

    #[test]
    fn resize_updates_header() {
        let mut buf = FrameBuffer::new(ProtocolLayout::new(0, 0, 0, 0));
        buf.resize(800, 600);
        assert_eq!(buf.backend(), "shared-buffer");
        assert_eq!(buf.header(HEADER_SURFACE_WIDTH), 800.0);
        assert_eq!(buf.header(HEADER_SURFACE_HEIGHT), 600.0);
    }
}
