//! Triangle meshes loaded from a plain-text vertex/face list.
//!
//! Source format, one record per line:
//! ```text
//! v <x> <y> <z>     vertex
//! f <a> <b> <c>     triangle, 1-based vertex indices
//! ```
//! Any other leading token and blank lines are ignored.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::math::{deg_to_rad, Vector};

/// Default source file name, resolved relative to the working directory.
pub const DEFAULT_MESH_PATH: &str = "enterprise.txt";
/// Longest bounding-box side after scaling.
pub const DEFAULT_TARGET_SIZE: f32 = 6.0;
/// Extents at or below this are treated as degenerate (scale falls back to 1).
const MIN_EXTENT: f32 = 1e-4;

/// Raw triangle indices exactly as read (1-based, unvalidated).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub a: i32,
    pub b: i32,
    pub c: i32,
}

impl Triangle {
    /// Resolve to 0-based indices, or `None` if any index falls outside
    /// `vertex_count`. Indices below 1 clamp to the first vertex.
    pub fn resolve(&self, vertex_count: usize) -> Option<[usize; 3]> {
        let idx = |i: i32| {
            let i = i.saturating_sub(1).max(0) as usize;
            (i < vertex_count).then_some(i)
        };
        Some([idx(self.a)?, idx(self.b)?, idx(self.c)?])
    }
}

/// Failure to read a mesh source.
#[derive(Debug)]
pub enum MeshLoadError {
    /// The source file does not exist.
    NotFound { path: PathBuf },
    /// The source exists but could not be read.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::NotFound { path } => {
                write!(f, "mesh source {} not found", path.display())
            }
            MeshLoadError::Io { path, source } => {
                write!(f, "failed to read mesh source {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for MeshLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshLoadError::NotFound { .. } => None,
            MeshLoadError::Io { source, .. } => Some(source),
        }
    }
}

/// Centered mesh plus the uniform scale that brings it to the target size.
/// The scale is applied at render time, never baked into the vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vector>,
    pub triangles: Vec<Triangle>,
    pub scale: f32,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::empty()
    }
}

impl Mesh {
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            scale: 1.0,
        }
    }

    /// Parse a mesh source. Never fails: malformed fields read as zero.
    pub fn parse(source: &str, target_size: f32) -> Self {
        let mut vertices = Vec::new();
        let mut triangles = Vec::new();

        for line in source.lines() {
            let mut fields = line.split_whitespace();
            match fields.next() {
                Some("v") => {
                    let mut coord = || fields.next().and_then(|s| s.parse::<f32>().ok()).unwrap_or(0.0);
                    let (x, y, z) = (coord(), coord(), coord());
                    vertices.push(Vector::new(x, y, z));
                }
                Some("f") => {
                    let mut index = || fields.next().map(parse_face_index).unwrap_or(0);
                    let (a, b, c) = (index(), index(), index());
                    triangles.push(Triangle { a, b, c });
                }
                _ => {}
            }
        }

        let mut mesh = Self { vertices, triangles, scale: 1.0 };
        mesh.normalize(target_size);
        log::debug!(
            "mesh: {} vertices, {} triangles, scale {:.4}",
            mesh.vertices.len(),
            mesh.triangles.len(),
            mesh.scale
        );
        mesh
    }

    /// Read and parse a mesh file, distinguishing a missing file from an
    /// unreadable one. An existing empty file loads as an empty mesh.
    pub fn load(path: impl AsRef<Path>, target_size: f32) -> Result<Self, MeshLoadError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => MeshLoadError::NotFound { path: path.to_path_buf() },
            _ => MeshLoadError::Io { path: path.to_path_buf(), source: err },
        })?;
        Ok(Self::parse(&source, target_size))
    }

    /// Like [`Mesh::load`], but degrades to an empty mesh on failure.
    pub fn load_or_empty(path: impl AsRef<Path>, target_size: f32) -> Self {
        Self::load(path, target_size).unwrap_or_else(|err| {
            log::warn!("{err}; continuing without a mesh");
            Self::empty()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.triangles.is_empty()
    }

    /// Axis-aligned bounds as (min, max), or `None` without vertices.
    pub fn bounds(&self) -> Option<(Vector, Vector)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(mn, mx), v| {
            (
                Vector::new(mn.x.min(v.x), mn.y.min(v.y), mn.z.min(v.z)),
                Vector::new(mx.x.max(v.x), mx.y.max(v.y), mx.z.max(v.z)),
            )
        }))
    }

    /// Triangles whose indices all resolve, as 0-based index triples.
    pub fn renderable_triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let count = self.vertices.len();
        self.triangles.iter().filter_map(move |t| t.resolve(count))
    }

    /// Center on the origin and compute the uniform scale.
    fn normalize(&mut self, target_size: f32) {
        let Some((mn, mx)) = self.bounds() else {
            self.scale = 1.0;
            return;
        };
        let center = (mn + mx) * 0.5;
        let extent = mx - mn;
        let longest = extent.x.max(extent.y).max(extent.z);

        for v in &mut self.vertices {
            *v = *v - center;
        }
        self.scale = if longest > MIN_EXTENT { target_size / longest } else { 1.0 };
    }
}

/// Leading integer of a face token; `7/1/3` yields 7. Unparsable reads as 0.
fn parse_face_index(token: &str) -> i32 {
    token
        .split('/')
        .next()
        .and_then(|s| s.parse::<i32>().ok())
        .unwrap_or(0)
}

/// Render-ready geometry: only valid triangles, one normal per triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMesh {
    pub vertices: Vec<Vector>,
    pub triangles: Vec<[usize; 3]>,
    pub normals: Vec<Vector>,
}

impl RenderMesh {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let triangles: Vec<[usize; 3]> = mesh.renderable_triangles().collect();
        let skipped = mesh.triangles.len() - triangles.len();
        if skipped > 0 {
            log::debug!("mesh: skipped {skipped} triangles with out-of-range indices");
        }

        let normals = triangles
            .iter()
            .map(|&[a, b, c]| {
                let (a, b, c) = (mesh.vertices[a], mesh.vertices[b], mesh.vertices[c]);
                (b - a).cross(c - a).normalize()
            })
            .collect();

        Self {
            vertices: mesh.vertices.clone(),
            triangles,
            normals,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Placement of the mesh in the world, applied by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTransform {
    pub translation: Vector,
    pub scale: f32,
    /// Degrees about Y, applied after the X rotation.
    pub rotation_y: f32,
    /// Degrees about X.
    pub rotation_x: f32,
}

impl MeshTransform {
    pub const ANCHOR: Vector = Vector::new(0.0, -3.0, -18.0);

    /// Fixed anchor with a slow sway driven by elapsed seconds.
    pub fn animated(scale: f32, elapsed: f64) -> Self {
        Self {
            translation: Self::ANCHOR,
            scale,
            rotation_y: 10.0 * (elapsed * 0.4).sin() as f32,
            rotation_x: 5.0 * (elapsed * 0.7).sin() as f32,
        }
    }

    /// translate * scale * rotate_y * rotate_x
    pub fn model_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_translation(self.translation.into())
            * glam::Mat4::from_scale(glam::Vec3::splat(self.scale))
            * glam::Mat4::from_rotation_y(deg_to_rad(self.rotation_y))
            * glam::Mat4::from_rotation_x(deg_to_rad(self.rotation_x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFSET_CUBE: &str = "\
v 10 20 30
v 11 20 30
v 11 21 30
v 10 21 30
v 10 20 31
v 11 20 31
v 11 21 31
v 10 21 31
f 1 2 3
f 1 3 4
f 5 6 7
";

    #[test]
    fn cube_is_centered_and_scaled() {
        let mesh = Mesh::parse(OFFSET_CUBE, DEFAULT_TARGET_SIZE);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.triangles.len(), 3);

        let sum = mesh.vertices.iter().fold(Vector::ZERO, |acc, v| acc + *v);
        let centroid = sum * (1.0 / mesh.vertices.len() as f32);
        assert!(centroid.length() < 1e-5, "centroid = {:?}", centroid);

        let (mn, mx) = mesh.bounds().unwrap();
        let extent = mx - mn;
        let longest = extent.x.max(extent.y).max(extent.z);
        assert!((longest / DEFAULT_TARGET_SIZE - 1.0 / mesh.scale).abs() < 1e-5);
    }

    #[test]
    fn out_of_range_triangle_is_skipped() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nf 1 2 9\nf 3 2 1\n";
        let mesh = Mesh::parse(src, 1.0);
        assert_eq!(mesh.triangles.len(), 3, "loader keeps every record");

        let tris: Vec<_> = mesh.renderable_triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [2, 1, 0]]);

        let render = RenderMesh::from_mesh(&mesh);
        assert_eq!(render.triangle_count(), 2);
        assert_eq!(render.normals.len(), 2);
    }

    #[test]
    fn zero_and_negative_indices_clamp_to_first_vertex() {
        let t = Triangle { a: 0, b: -4, c: 2 };
        assert_eq!(t.resolve(2), Some([0, 0, 1]));
        assert_eq!(t.resolve(1), None);
    }

    #[test]
    fn most_negative_index_clamps_without_overflow() {
        let t = Triangle { a: i32::MIN, b: 2, c: 3 };
        assert_eq!(t.resolve(3), Some([0, 1, 2]));

        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -2147483648 2 3\nf 1 2 3\n";
        let mesh = Mesh::parse(src, 1.0);
        assert_eq!(mesh.triangles[0].a, i32::MIN);
        let tris: Vec<_> = mesh.renderable_triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [0, 1, 2]]);
    }

    #[test]
    fn unknown_tags_and_blank_lines_ignored() {
        let src = "# comment\n\nvn 0 0 1\nvt 0 0\no ship\nv 1 2 3\n   \nf 1/1/1 1/2/1 1//1\n";
        let mesh = Mesh::parse(src, 6.0);
        assert_eq!(mesh.vertices.len(), 1);
        assert_eq!(mesh.triangles, vec![Triangle { a: 1, b: 1, c: 1 }]);
    }

    #[test]
    fn malformed_fields_read_as_zero() {
        let mesh = Mesh::parse("v 1 oops\nv 3 4 5\nf 1\n", 6.0);
        assert_eq!(mesh.vertices.len(), 2);
        assert_eq!(mesh.triangles, vec![Triangle { a: 1, b: 0, c: 0 }]);
    }

    #[test]
    fn degenerate_mesh_keeps_unit_scale() {
        let single = Mesh::parse("v 5 5 5\n", 6.0);
        assert_eq!(single.scale, 1.0);
        assert_eq!(single.vertices[0], Vector::ZERO);

        let empty = Mesh::parse("", 6.0);
        assert!(empty.is_empty());
        assert_eq!(empty.scale, 1.0);
    }

    #[test]
    fn face_normal_follows_winding() {
        let mesh = Mesh::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n", 1.0);
        let render = RenderMesh::from_mesh(&mesh);
        assert!((render.normals[0] - Vector::Z).length() < 1e-5);
    }

    #[test]
    fn collinear_triangle_gets_default_normal() {
        let mesh = Mesh::parse("v 0 0 0\nv 1 0 0\nv 2 0 0\nf 1 2 3\n", 1.0);
        let render = RenderMesh::from_mesh(&mesh);
        assert_eq!(render.normals[0], Vector::DEFAULT_DIRECTION);
    }

    #[test]
    fn missing_file_is_distinguished_from_empty_file() {
        let dir = std::env::temp_dir();
        let missing = dir.join("orrery-mesh-does-not-exist.txt");
        let _ = std::fs::remove_file(&missing);
        match Mesh::load(&missing, 6.0) {
            Err(MeshLoadError::NotFound { path }) => assert_eq!(path, missing),
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(Mesh::load_or_empty(&missing, 6.0).is_empty());

        let empty = dir.join(format!("orrery-mesh-empty-{}.txt", std::process::id()));
        std::fs::write(&empty, "").unwrap();
        let mesh = Mesh::load(&empty, 6.0).unwrap();
        assert!(mesh.is_empty());
        let _ = std::fs::remove_file(&empty);
    }

    #[test]
    fn load_reads_file_contents() {
        let path = std::env::temp_dir().join(format!("orrery-mesh-cube-{}.txt", std::process::id()));
        std::fs::write(&path, OFFSET_CUBE).unwrap();
        let mesh = Mesh::load(&path, 3.0).unwrap();
        assert_eq!(mesh.vertices.len(), 8);
        assert!((mesh.scale - 3.0).abs() < 1e-5);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn transform_sways_around_anchor() {
        let rest = MeshTransform::animated(2.0, 0.0);
        assert_eq!(rest.rotation_x, 0.0);
        assert_eq!(rest.rotation_y, 0.0);
        let origin = rest.model_matrix().transform_point3(glam::Vec3::ZERO);
        assert!((Vector::from(origin) - MeshTransform::ANCHOR).length() < 1e-5);

        let unit = rest.model_matrix().transform_point3(glam::Vec3::X);
        assert!((unit.x - 2.0).abs() < 1e-5);
    }
}
