//! Mapping of triangle meshes onto NRRD coordinate volumes.
//!
//! An NRRD volume here stores a 3-channel vector field (such as a
//! deformation or coordinate field) on a regular grid placed in world
//! space by an origin and 3 axis vectors. This crate reads such
//! volumes, samples them at arbitrary world-space points by trilinear
//! interpolation, loads Wavefront OBJ meshes and resolves, for every
//! mesh vertex, the coordinates of the volume near that vertex.
//!
//! # Example
//!
//! ```no_run
//! use volume_coords::{align, load_obj, writer, AlignmentOptions, NrrdObject};
//! # use volume_coords::Result;
//!
//! # fn run() -> Result<()> {
//! let obj = NrrdObject::from_file("coordinates.nrrd.gz")?;
//! println!("Volume of {:?} voxels", obj.header().sizes.grid());
//!
//! let mesh = load_obj("surface.obj")?;
//! let dataset = align(&mesh, obj.volume(), &AlignmentOptions::new())?;
//! writer::write_dataset("out", &dataset)?;
//! # Ok(())
//! # }
//! ```
//!
//! Volumes can also be sampled directly:
//!
//! ```no_run
//! # use volume_coords::{NrrdObject, Probe, Result};
//! # use nalgebra::Vector3;
//! # fn run() -> Result<()> {
//! let volume = NrrdObject::from_file("coordinates.nrrd")?.into_volume();
//! match volume.probe(&Vector3::new(12.5, 3., 40.))? {
//!     Probe::Inside(coords) => println!("{:?}", coords),
//!     Probe::Void => println!("no measurement here"),
//!     Probe::Outside => println!("not in the volume"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! With the `ndarray_volumes` feature (enabled by default), a volume
//! can be turned into an `ndarray::Array4<f64>` with [`IntoNdArray`].
//! The `rayon` feature (also a default) aligns vertices in parallel.
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate log;

pub mod affine;
pub mod align;
pub mod error;
pub mod header;
pub mod mesh;
pub mod object;
pub mod typedef;
pub mod volume;
pub mod writer;
mod util;

pub use crate::affine::BoundingBox;
pub use crate::align::{align, AlignedDataset, AlignmentOptions, AlignmentStats, VertexRecord};
pub use crate::error::{CoordsError, Result};
pub use crate::header::{NrrdHeader, Sizes, SpaceAxes};
pub use crate::mesh::{estimate_normals, load_obj, read_obj, Mesh};
pub use crate::object::NrrdObject;
pub use crate::typedef::{Encoding, NrrdType};
pub use crate::util::Endianness;
#[cfg(feature = "ndarray_volumes")]
pub use crate::volume::ndarray::IntoNdArray;
pub use crate::volume::{NrrdVolume, Probe};
