//! Alignment of a triangle mesh with a coordinate volume.
//!
//! Every mesh vertex is pushed along its normal, one step at a time,
//! until the volume yields a measurement at that point. The result is
//! a flat per-vertex dataset, ready to be written with the
//! [`writer`](crate::writer) functions.
//!
//! # Example
//!
//! ```no_run
//! use volume_coords::{align, load_obj, AlignmentOptions, NrrdObject};
//! # use volume_coords::Result;
//!
//! # fn run() -> Result<()> {
//! let volume = NrrdObject::from_file("coordinates.nrrd")?.into_volume();
//! let mesh = load_obj("surface.obj")?;
//! let options = AlignmentOptions::new().step(0.1).max_iterations(100);
//! let dataset = align(&mesh, &volume, &options)?;
//! println!("{:.2}% mapped", dataset.stats.good_percentage());
//! # Ok(())
//! # }
//! ```

use crate::affine::BoundingBox;
use crate::error::Result;
use crate::mesh::{estimate_normals_or, Mesh};
use crate::volume::{NrrdVolume, VOID_THRESHOLD};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Number of `f32` values per vertex in the packed vertex buffer.
pub const FLOATS_PER_VERTEX: usize = 9;

/// Options for aligning a mesh with a volume.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentOptions {
    step: f64,
    max_iterations: usize,
    fallback_normal: Vector3<f64>,
    parallel: bool,
}

impl Default for AlignmentOptions {
    fn default() -> Self {
        AlignmentOptions {
            step: 0.2,
            max_iterations: 50,
            fallback_normal: Vector3::x(),
            parallel: true,
        }
    }
}

impl AlignmentOptions {
    /// Create the default options: a step of `0.2` mesh units, at most
    /// 50 extra steps per vertex, `(1, 0, 0)` for missing normals and
    /// parallel processing when available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance covered along the normal by each step.
    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Number of steps taken after the first one before giving up on
    /// a vertex.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Direction used for vertices without a normal, including those
    /// for which no normal can be estimated.
    pub fn fallback_normal(mut self, normal: Vector3<f64>) -> Self {
        self.fallback_normal = normal;
        self
    }

    /// Whether to spread the vertices over the rayon thread pool.
    /// Has no effect without the `rayon` feature.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Retrieve the step length.
    pub fn get_step(&self) -> f64 {
        self.step
    }

    /// Retrieve the iteration cap.
    pub fn get_max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Retrieve the fallback normal.
    pub fn get_fallback_normal(&self) -> Vector3<f64> {
        self.fallback_normal
    }
}

/// The aligned record of a single mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexRecord {
    /// Vertex position relative to the mesh centroid
    pub position: Vector3<f64>,
    /// Normal along which the vertex was shifted
    pub normal: Vector3<f64>,
    /// Volume coordinates found, or `(-1, -1, -1)`
    pub coords: Vector3<f64>,
}

impl VertexRecord {
    /// Whether any coordinate was found for this vertex.
    pub fn is_good(&self) -> bool {
        self.coords.iter().any(|&c| c > -1.)
    }

    /// The record as `[x, y, z, nx, ny, nz, u, v, w]`.
    pub fn to_array(&self) -> [f32; FLOATS_PER_VERTEX] {
        let (p, n, c) = (&self.position, &self.normal, &self.coords);
        [
            p.x as f32, p.y as f32, p.z as f32, n.x as f32, n.y as f32, n.z as f32, c.x as f32,
            c.y as f32, c.z as f32,
        ]
    }
}

/// Summary of an alignment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentStats {
    /// Number of vertices processed
    pub vertex_count: usize,
    /// Number of vertices with coordinates
    pub good: usize,
    /// Number of vertices which hit the iteration cap
    pub gave_up: usize,
}

impl AlignmentStats {
    /// Share of vertices with coordinates, in percent. Zero for an
    /// empty mesh.
    pub fn good_percentage(&self) -> f64 {
        if self.vertex_count == 0 {
            0.
        } else {
            100. * self.good as f64 / self.vertex_count as f64
        }
    }
}

/// The outcome of aligning a mesh with a volume.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedDataset {
    /// Bounding box of the original vertex positions
    pub bounding_box: BoundingBox,
    /// One record per vertex, in vertex order
    pub records: Vec<VertexRecord>,
    /// Triangle indices, as in the mesh
    pub triangles: Vec<u32>,
    /// Run statistics
    pub stats: AlignmentStats,
}

impl AlignedDataset {
    /// The centroid the record positions are relative to.
    pub fn centroid(&self) -> Vector3<f64> {
        self.bounding_box.center()
    }

    /// Pack the records into a flat buffer, 9 values per vertex.
    pub fn to_vertex_buffer(&self) -> Vec<f32> {
        let mut buffer = Vec::with_capacity(self.records.len() * FLOATS_PER_VERTEX);
        for r in &self.records {
            buffer.extend_from_slice(&r.to_array());
        }
        buffer
    }
}

/// Resolve the volume coordinates of every vertex of the mesh.
///
/// Missing normals are estimated from the faces first. Each vertex is
/// moved by `normal * step` and looked up in the volume; while the
/// lookup finds no measurement (void or outside the grid), the vertex
/// keeps moving by the same amount, up to the iteration cap. Vertices
/// hitting the cap keep the sentinel coordinates and are counted in
/// [`AlignmentStats::gave_up`]; they never make the run fail.
///
/// # Errors
///
/// Only a failure to read the volume's payload is reported.
pub fn align(mesh: &Mesh, volume: &NrrdVolume, options: &AlignmentOptions) -> Result<AlignedDataset> {
    let normals: Cow<[Vector3<f64>]> = if mesh.has_normals() {
        Cow::Borrowed(mesh.normals.as_slice())
    } else {
        info!(
            "Estimating normals ({} given for {} vertices)",
            mesh.normals.len(),
            mesh.vertex_count()
        );
        Cow::Owned(estimate_normals_or(
            &mesh.vertices,
            &mesh.triangles,
            options.fallback_normal,
        ))
    };

    let bounding_box = mesh.bounding_box().unwrap_or_default();
    let centroid = bounding_box.center();
    debug!(
        "Mesh bounds {:?} to {:?}, centroid {:?}",
        bounding_box.min,
        bounding_box.max,
        centroid.as_slice()
    );

    let resolve = |(i, vertex): (usize, &Vector3<f64>)| -> Result<(VertexRecord, bool)> {
        let normal = normals.get(i).copied().unwrap_or(options.fallback_normal);
        let (coords, gave_up) = resolve_vertex(volume, vertex, &normal, options)?;
        let record = VertexRecord {
            position: vertex - centroid,
            normal,
            coords,
        };
        Ok((record, gave_up))
    };

    let resolved: Vec<(VertexRecord, bool)> = if options.parallel {
        resolve_parallel(&mesh.vertices, &resolve)?
    } else {
        mesh.vertices
            .iter()
            .enumerate()
            .map(&resolve)
            .collect::<Result<_>>()?
    };

    let mut stats = AlignmentStats {
        vertex_count: resolved.len(),
        ..AlignmentStats::default()
    };
    let mut records = Vec::with_capacity(resolved.len());
    for (record, gave_up) in resolved {
        if record.is_good() {
            stats.good += 1;
        }
        if gave_up {
            stats.gave_up += 1;
        }
        records.push(record);
    }

    if stats.gave_up > 0 {
        warn!(
            "{} vertices found no coordinates within {} steps",
            stats.gave_up, options.max_iterations
        );
    }
    info!("Coordinates found: {:.2}%", stats.good_percentage());

    Ok(AlignedDataset {
        bounding_box,
        records,
        triangles: mesh.triangles.clone(),
        stats,
    })
}

#[cfg(feature = "rayon")]
fn resolve_parallel<F>(vertices: &[Vector3<f64>], resolve: &F) -> Result<Vec<(VertexRecord, bool)>>
where
    F: Fn((usize, &Vector3<f64>)) -> Result<(VertexRecord, bool)> + Sync,
{
    use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
    vertices.par_iter().enumerate().map(resolve).collect()
}

#[cfg(not(feature = "rayon"))]
fn resolve_parallel<F>(vertices: &[Vector3<f64>], resolve: &F) -> Result<Vec<(VertexRecord, bool)>>
where
    F: Fn((usize, &Vector3<f64>)) -> Result<(VertexRecord, bool)> + Sync,
{
    vertices.iter().enumerate().map(resolve).collect()
}

/// Walk from `vertex` along `normal` until the volume has a
/// measurement. Returns the coordinates found (or the sentinel) and
/// whether the iteration cap was reached.
fn resolve_vertex(
    volume: &NrrdVolume,
    vertex: &Vector3<f64>,
    normal: &Vector3<f64>,
    options: &AlignmentOptions,
) -> Result<(Vector3<f64>, bool)> {
    let shift = normal * options.step;
    let mut point = vertex + shift;
    let mut coords = volume.probe(&point)?.coords();
    let mut iterations = 0;
    while coords.x < VOID_THRESHOLD {
        if iterations >= options.max_iterations {
            return Ok((coords, true));
        }
        point += shift;
        coords = volume.probe(&point)?.coords();
        iterations += 1;
    }
    Ok((coords, false))
}
