//! Synthetic volumes shared by the integration tests.
#![allow(dead_code)]

use volume_coords::volume::element::encode_elements;
use volume_coords::{Endianness, NrrdHeader, NrrdType, NrrdVolume, Sizes};

/// Header of a little endian `float` volume of 3 channels over a grid
/// of the given extents, at the origin, with unit axes.
pub fn float_header(x: usize, y: usize, z: usize) -> NrrdHeader {
    NrrdHeader {
        sizes: Sizes::new(3, x, y, z),
        type_name: "float".to_owned(),
        endian: "little".to_owned(),
        encoding: "raw".to_owned(),
        ..NrrdHeader::default()
    }
}

/// A volume over a unit-spaced grid whose voxel values are given by `f`.
pub fn volume_from_fn<F>(x: usize, y: usize, z: usize, f: F) -> NrrdVolume
where
    F: Fn(usize, usize, usize) -> [f64; 3],
{
    let mut values = Vec::with_capacity(3 * x * y * z);
    for k in 0..z {
        for j in 0..y {
            for i in 0..x {
                values.extend_from_slice(&f(i, j, k));
            }
        }
    }
    let raw = encode_elements(&values, NrrdType::Float32, Endianness::Little).unwrap();
    NrrdVolume::from_raw_data(float_header(x, y, z), raw).unwrap()
}

/// A cube of `n` voxels per side, all holding `value`.
pub fn constant_volume(n: usize, value: [f64; 3]) -> NrrdVolume {
    volume_from_fn(n, n, n, |_, _, _| value)
}

/// A cube of `n` voxels per side holding no measurement at all.
pub fn void_volume(n: usize) -> NrrdVolume {
    constant_volume(n, [-1., -1., -1.])
}

/// Known values of "resources/coords.nrrd": voxel `(x, y, z)` holds
/// `(x, y, z) / 4`, except for the void column at `x = 3, z = 3`.
pub fn coords_value(x: usize, y: usize, z: usize) -> [f64; 3] {
    if x == 3 && z == 3 {
        [-1., -1., -1.]
    } else {
        [x as f64 / 4., y as f64 / 4., z as f64 / 4.]
    }
}
