#[macro_use]
extern crate approx;
extern crate nalgebra;
#[macro_use]
extern crate pretty_assertions;
extern crate volume_coords;

mod util;

use nalgebra::Vector3;
use util::{constant_volume, float_header, volume_from_fn, void_volume};
use volume_coords::volume::element::encode_elements;
use volume_coords::{CoordsError, Endianness, NrrdHeader, NrrdType, NrrdVolume, Probe, Sizes};

fn ramp() -> NrrdVolume {
    volume_from_fn(4, 4, 4, |x, y, z| {
        [x as f64 / 4., y as f64 / 4., z as f64 / 4.]
    })
}

#[test]
fn voxel_centers() {
    let volume = constant_volume(3, [0.25, 0.5, 0.75]);
    let p = volume.probe(&Vector3::new(1.5, 1.5, 1.5)).unwrap();
    assert_eq!(p, Probe::Inside(Vector3::new(0.25, 0.5, 0.75)));

    let volume = ramp();
    for &(x, y, z) in &[(0, 0, 0), (1, 2, 3), (3, 3, 3), (2, 0, 1)] {
        let center = Vector3::new(x as f64 + 0.5, y as f64 + 0.5, z as f64 + 0.5);
        let expected = Vector3::new(x as f64 / 4., y as f64 / 4., z as f64 / 4.);
        assert_eq!(volume.coords(&center).unwrap(), expected);
    }
}

#[test]
fn interpolates_toward_nearer_neighbor() {
    let volume = ramp();
    let c = volume.coords(&Vector3::new(1.2, 1.5, 1.5)).unwrap();
    assert_abs_diff_eq!(c.x, 0.7 * 0.25, epsilon = 1e-12);
    assert_abs_diff_eq!(c.y, 0.25, epsilon = 1e-12);
    assert_abs_diff_eq!(c.z, 0.25, epsilon = 1e-12);

    let c = volume.coords(&Vector3::new(2.9, 1.1, 0.5)).unwrap();
    assert_abs_diff_eq!(c.x, 0.6 * 0.5 + 0.4 * 0.75, epsilon = 1e-12);
    assert_abs_diff_eq!(c.y, 0.6 * 0.25 + 0.4 * 0., epsilon = 1e-12);
    assert_abs_diff_eq!(c.z, 0., epsilon = 1e-12);
}

#[test]
fn cell_boundaries() {
    let volume = ramp();
    // halfway between the centers of voxels 1 and 2
    let c = volume.coords(&Vector3::new(2.0, 1.5, 1.5)).unwrap();
    assert_abs_diff_eq!(c.x, 0.375, epsilon = 1e-12);
    // on the grid origin, the neighbor below is missing
    let c = volume.coords(&Vector3::new(0., 0., 0.)).unwrap();
    assert_eq!(c, Vector3::new(0., 0., 0.));
}

#[test]
fn all_void() {
    let volume = void_volume(3);
    for p in &[
        Vector3::new(1.5, 1.5, 1.5),
        Vector3::new(0.1, 2.9, 1.2),
        Vector3::new(2.6, 0.4, 2.2),
    ] {
        assert_eq!(volume.probe(p).unwrap(), Probe::Void);
        assert_eq!(volume.coords(p).unwrap(), Vector3::new(-1., -1., -1.));
    }
}

#[test]
fn void_neighbors_are_skipped() {
    // the x = 3 plane is void
    let volume = volume_from_fn(4, 4, 4, |x, y, z| {
        if x == 3 {
            [-1., -1., -1.]
        } else {
            [x as f64 / 4., y as f64 / 4., z as f64 / 4.]
        }
    });
    let c = volume.coords(&Vector3::new(2.8, 1.5, 1.5)).unwrap();
    assert_eq!(c, Vector3::new(0.5, 0.25, 0.25));

    // only one of the 8 corners has a value: the anchor
    let volume = volume_from_fn(2, 2, 2, |x, y, z| {
        if (x, y, z) == (0, 0, 0) {
            [0.5, 0.5, 0.5]
        } else {
            [-1., -1., -1.]
        }
    });
    let c = volume.coords(&Vector3::new(0.9, 0.9, 0.9)).unwrap();
    assert_eq!(c, Vector3::new(0.5, 0.5, 0.5));
}

#[test]
fn void_anchor() {
    let volume = volume_from_fn(2, 2, 2, |x, _, _| {
        if x == 0 {
            [-1., -1., -1.]
        } else {
            [0.5, 0.5, 0.5]
        }
    });
    assert_eq!(volume.probe(&Vector3::new(0.9, 0.5, 0.5)).unwrap(), Probe::Void);
    assert_eq!(
        volume.probe(&Vector3::new(1.1, 0.5, 0.5)).unwrap(),
        Probe::Inside(Vector3::new(0.5, 0.5, 0.5))
    );
}

#[test]
fn out_of_range() {
    let volume = ramp();
    for p in &[
        Vector3::new(-0.01, 1., 1.),
        Vector3::new(1., -1e-9, 1.),
        Vector3::new(4., 1., 1.),
        Vector3::new(1., 1., 4.5),
        Vector3::new(std::f64::NAN, 1., 1.),
    ] {
        assert_eq!(volume.probe(p).unwrap(), Probe::Outside);
        match volume.coords(p) {
            Err(CoordsError::OutOfVolume(_)) => {}
            other => panic!("unexpected result {:?} at {:?}", other, p),
        }
    }
    assert!(volume.probe(&Vector3::new(3.999, 0., 3.999)).unwrap().is_inside());
}

#[test]
fn skewed_axes() {
    let header = NrrdHeader {
        space_origin: Vector3::new(10., 0., 0.),
        ..float_header(2, 2, 2)
    };
    let header = NrrdHeader {
        space_axes: volume_coords::SpaceAxes {
            x: Vector3::new(2., 0., 0.),
            y: Vector3::new(0., 0., 1.),
            z: Vector3::new(0., -1., 0.),
        },
        ..header
    };
    let values: Vec<f64> = (0..8)
        .flat_map(|i| vec![i as f64, 0., 0.])
        .collect();
    let raw = encode_elements(&values, NrrdType::Float32, Endianness::Little).unwrap();
    let volume = NrrdVolume::from_raw_data(header, raw).unwrap();

    let g = volume.grid_coords(&Vector3::new(13., -1.5, 0.5));
    assert_abs_diff_eq!(g.x, 1.5);
    assert_abs_diff_eq!(g.y, 0.5);
    assert_abs_diff_eq!(g.z, 1.5);
    // voxel (1, 0, 1) is element 5
    assert_eq!(volume.coords(&Vector3::new(13., -1.5, 0.5)).unwrap().x, 5.);
}

#[test]
fn elements() {
    let volume = ramp();
    assert_eq!(volume.get_f64(0, 3, 0, 0).unwrap(), 0.75);
    assert_eq!(volume.get_f64(2, 0, 0, 2).unwrap(), 0.5);
    assert!(volume.get_f64(3, 0, 0, 0).is_err());
    assert!(volume.get_f64(0, 4, 0, 0).is_err());
    assert_eq!(volume.voxel(1, 2, 3).unwrap(), Some(Vector3::new(0.25, 0.5, 0.75)));
    assert_eq!(volume.voxel(-1, 2, 3).unwrap(), None);
    assert_eq!(volume.voxel(1, 2, 4).unwrap(), None);
}

#[test]
fn construction_checks() {
    let header = float_header(2, 2, 2);
    match NrrdVolume::from_raw_data(header.clone(), vec![0; 95]) {
        Err(CoordsError::IncompatibleLength(96, 95)) => {}
        other => panic!("unexpected result {:?}", other),
    }

    let two_channels = NrrdHeader {
        sizes: Sizes::new(2, 2, 2, 2),
        ..header.clone()
    };
    match NrrdVolume::from_raw_data(two_channels, vec![0; 64]) {
        Err(CoordsError::UnsupportedChannelCount(2)) => {}
        other => panic!("unexpected result {:?}", other),
    }

    let no_endian = NrrdHeader {
        endian: "N/A".to_owned(),
        ..header.clone()
    };
    assert!(matches!(
        NrrdVolume::from_raw_data(no_endian, vec![0; 96]),
        Err(CoordsError::InvalidEndian(_))
    ));

    let bytes = NrrdHeader {
        type_name: "signed char".to_owned(),
        endian: "N/A".to_owned(),
        ..header
    };
    let volume = NrrdVolume::from_raw_data(bytes, vec![1; 24]).unwrap();
    assert_eq!(volume.data_type(), NrrdType::Int8);
    assert_eq!(volume.get_f64(1, 1, 1, 1).unwrap(), 1.);
}

#[cfg(feature = "ndarray_volumes")]
#[test]
fn into_ndarray() {
    use volume_coords::IntoNdArray;
    let array = ramp().into_ndarray().unwrap();
    assert_eq!(array.shape(), &[3, 4, 4, 4]);
    assert_eq!(array[[0, 3, 1, 2]], 0.75);
    assert_eq!(array[[1, 3, 1, 2]], 0.25);
    assert_eq!(array[[2, 3, 1, 2]], 0.5);
}
