//! This module defines the coordinate volume, which maps world-space
//! points to values of the vector field stored in an NRRD payload,
//! by trilinear interpolation over the voxel grid.
//! An integration with `ndarray` is available with the
//! `ndarray_volumes` feature.

pub mod element;
#[cfg(feature = "ndarray_volumes")]
pub mod ndarray;

use self::element::ElementReader;
use crate::error::{CoordsError, Result};
use crate::header::{NrrdHeader, Sizes};
use crate::typedef::NrrdType;
use nalgebra::Vector3;

/// A voxel whose first channel is below this value holds no measurement.
pub const VOID_THRESHOLD: f64 = -0.9;

/// Coordinates reported where the volume holds no measurement.
pub const VOID_COORDS: [f64; 3] = [-1., -1., -1.];

/// The sentinel coordinates, as a vector.
pub fn void_coords() -> Vector3<f64> {
    Vector3::from(VOID_COORDS)
}

/// Outcome of looking up a world-space point in a volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Probe {
    /// Interpolated value of the field.
    Inside(Vector3<f64>),
    /// The voxel containing the point is void.
    Void,
    /// The point is not within the grid.
    Outside,
}

impl Probe {
    /// The looked up coordinates, or the void sentinel when there is
    /// no measurement.
    pub fn coords(&self) -> Vector3<f64> {
        match self {
            Probe::Inside(v) => *v,
            Probe::Void | Probe::Outside => void_coords(),
        }
    }

    /// Whether the probe hit a measured region of the volume.
    pub fn is_inside(&self) -> bool {
        matches!(self, Probe::Inside(_))
    }
}

/// An NRRD coordinate volume held in memory: the header and the
/// decoded payload. Read-only once created, so it can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct NrrdVolume {
    header: NrrdHeader,
    raw_data: Vec<u8>,
    reader: ElementReader,
}

impl NrrdVolume {
    /// Create a volume from a header and its decoded payload.
    /// Channels are stored fastest, then `x`, `y` and `z`.
    ///
    /// # Errors
    ///
    /// - `UnsupportedDataType` if the element type is not supported;
    /// - `InvalidEndian` if a multi-byte type has no known byte order;
    /// - `UnsupportedChannelCount` if voxels have fewer than 3 channels;
    /// - `IncompatibleLength` if the payload is too short.
    pub fn from_raw_data(header: NrrdHeader, raw_data: Vec<u8>) -> Result<Self> {
        let data_type = header.data_type()?;
        let endianness = header.payload_endianness()?;
        if header.sizes.value < 3 {
            return Err(CoordsError::UnsupportedChannelCount(header.sizes.value));
        }
        let expected = header.payload_len()?;
        if raw_data.len() < expected {
            return Err(CoordsError::IncompatibleLength(expected, raw_data.len()));
        }
        debug!(
            "Volume of {:?} {} voxels ({} bytes)",
            header.sizes.grid(),
            data_type,
            raw_data.len()
        );
        Ok(NrrdVolume {
            reader: ElementReader::new(data_type, endianness),
            header,
            raw_data,
        })
    }

    /// Retrieve the header of this volume.
    pub fn header(&self) -> &NrrdHeader {
        &self.header
    }

    /// Retrieve the extents of this volume.
    pub fn sizes(&self) -> Sizes {
        self.header.sizes
    }

    /// Retrieve the element type of this volume.
    pub fn data_type(&self) -> NrrdType {
        self.reader.data_type()
    }

    /// Retrieve a reference to the raw data.
    pub fn raw_data(&self) -> &[u8] {
        &self.raw_data
    }

    /// Retrieve the raw data, consuming the volume.
    pub fn into_raw_data(self) -> Vec<u8> {
        self.raw_data
    }

    /// Fractional grid coordinates of a world-space point: for each
    /// axis, the projection of the offset from the origin onto the
    /// axis vector, in units of that vector's length.
    pub fn grid_coords(&self, point: &Vector3<f64>) -> Vector3<f64> {
        let offset = point - self.header.space_origin;
        let axes = self.header.space_axes.as_array();
        Vector3::from_fn(|i, _| project(&offset, &axes[i]))
    }

    /// Read a single element, given the channel and the voxel index.
    ///
    /// # Errors
    ///
    /// - `OutOfVolume` if the index lies outside the volume.
    pub fn get_f64(&self, channel: usize, x: usize, y: usize, z: usize) -> Result<f64> {
        let s = self.header.sizes;
        if channel >= s.value || x >= s.x || y >= s.y || z >= s.z {
            return Err(CoordsError::OutOfVolume([x as f64, y as f64, z as f64]));
        }
        let index = channel + s.value * (x + s.x * (y + s.y * z));
        Ok(self.reader.read_at(&self.raw_data, index)?)
    }

    /// Read the first 3 channels of the voxel at the given grid index.
    /// Returns `None` if the index lies outside the grid or if the
    /// voxel is void.
    pub fn voxel(&self, x: i64, y: i64, z: i64) -> Result<Option<Vector3<f64>>> {
        let s = self.header.sizes;
        let inside = |i: i64, n: usize| i >= 0 && (i as usize) < n;
        if !(inside(x, s.x) && inside(y, s.y) && inside(z, s.z)) {
            return Ok(None);
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        let index = s.value * (x + s.x * (y + s.y * z));
        let u = self.reader.read_at(&self.raw_data, index)?;
        if u < VOID_THRESHOLD {
            return Ok(None);
        }
        let v = self.reader.read_at(&self.raw_data, index + 1)?;
        let w = self.reader.read_at(&self.raw_data, index + 2)?;
        Ok(Some(Vector3::new(u, v, w)))
    }

    /// Look up the value of the field at a world-space point.
    ///
    /// The voxel containing the point is blended with its neighbors
    /// on the side of the point, one per axis, by trilinear
    /// interpolation over the 8 voxels. Void neighbors are left out
    /// of each pairwise blend, leaving the other member of the pair.
    /// If the containing voxel is void, so is the result.
    pub fn probe(&self, point: &Vector3<f64>) -> Result<Probe> {
        let g = self.grid_coords(point);
        let grid = self.header.sizes.grid();
        let within = (0..3).all(|i| g[i].is_finite() && g[i] >= 0. && g[i] < grid[i] as f64);
        if !within {
            return Ok(Probe::Outside);
        }

        let base = [g.x.floor() as i64, g.y.floor() as i64, g.z.floor() as i64];
        let anchor = match self.voxel(base[0], base[1], base[2])? {
            Some(v) => v,
            None => return Ok(Probe::Void),
        };

        // interpolate toward the neighbor closest to the point
        let mut shift = [0i64; 3];
        let mut weight = [0f64; 3];
        for i in 0..3 {
            let d = g[i] - base[i] as f64 - 0.5;
            shift[i] = if d < 0. { -1 } else { 1 };
            weight[i] = 1. - d.abs();
        }
        let corner = |dx: i64, dy: i64, dz: i64| {
            self.voxel(
                base[0] + shift[0] * dx,
                base[1] + shift[1] * dy,
                base[2] + shift[2] * dz,
            )
        };
        let v000 = Some(anchor);
        let v100 = corner(1, 0, 0)?;
        let v010 = corner(0, 1, 0)?;
        let v110 = corner(1, 1, 0)?;
        let v001 = corner(0, 0, 1)?;
        let v101 = corner(1, 0, 1)?;
        let v011 = corner(0, 1, 1)?;
        let v111 = corner(1, 1, 1)?;

        let [wx, wy, wz] = weight;
        let value = lerp(
            lerp(lerp(v000, v100, wx), lerp(v010, v110, wx), wy),
            lerp(lerp(v001, v101, wx), lerp(v011, v111, wx), wy),
            wz,
        );
        Ok(value.map_or(Probe::Void, Probe::Inside))
    }

    /// Look up the value of the field at a world-space point, failing
    /// if the point is outside the grid. Void regions yield the
    /// sentinel `(-1, -1, -1)`.
    ///
    /// # Errors
    ///
    /// - `OutOfVolume` if the point is not within the grid.
    pub fn coords(&self, point: &Vector3<f64>) -> Result<Vector3<f64>> {
        match self.probe(point)? {
            Probe::Outside => Err(CoordsError::OutOfVolume([point.x, point.y, point.z])),
            p => Ok(p.coords()),
        }
    }
}

/// Scalar projection of `v` onto `base`, in units of `base`'s length.
fn project(v: &Vector3<f64>, base: &Vector3<f64>) -> f64 {
    v.dot(base) / base.norm_squared()
}

/// Blend two optional voxel values, with `weight` going to `a`.
/// A missing value leaves the other one untouched.
fn lerp(a: Option<Vector3<f64>>, b: Option<Vector3<f64>>, weight: f64) -> Option<Vector3<f64>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a * weight + b * (1. - weight)),
        (None, b) => b,
        (a, None) => a,
    }
}
