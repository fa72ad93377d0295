//! Triangle meshes: loading from Wavefront OBJ files and
//! estimating per-vertex normals.

pub mod normals;
pub mod obj;

pub use self::normals::{estimate_normals, estimate_normals_or};
pub use self::obj::{load_obj, read_obj};

use crate::affine::BoundingBox;
use nalgebra::Vector3;

/// A triangle mesh with optional per-vertex normals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    pub vertices: Vec<Vector3<f64>>,
    /// Vertex normals, in vertex order. May hold fewer entries than
    /// `vertices` when the source does not provide them.
    pub normals: Vec<Vector3<f64>>,
    /// Vertex indices, 3 per triangle, 0-based
    pub triangles: Vec<u32>,
}

impl Mesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Whether each vertex has a normal.
    pub fn has_normals(&self) -> bool {
        self.normals.len() >= self.vertices.len()
    }

    /// Estimate the normals from the faces if some are missing.
    pub fn ensure_normals(&mut self) {
        if !self.has_normals() {
            info!(
                "Mesh has {} normals for {} vertices, computing them",
                self.normals.len(),
                self.vertices.len()
            );
            self.normals = estimate_normals(&self.vertices, &self.triangles);
        }
    }

    /// Bounding box of the vertices, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices.iter().copied())
    }

    /// Iterate over the triangles as index triples.
    pub fn faces(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.triangles
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }
}
