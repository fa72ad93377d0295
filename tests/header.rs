extern crate nalgebra;
#[macro_use]
extern crate pretty_assertions;
extern crate volume_coords;

use nalgebra::Vector3;
use volume_coords::{CoordsError, Encoding, NrrdHeader, NrrdType, Sizes};

const CUBE_HEADER: &str = "NRRD0004
# Complete NRRD file format specification at:
# http://teem.sourceforge.net/nrrd/format.html
type: float
dimension: 4
space: left-posterior-superior
space dimension: 3
sizes: 3 10 10 10
space directions: none (1,0,0) (0,1,0) (0,0,1)
kinds: vector domain domain domain
endian: little
encoding: gzip
space origin: (-5,-5,-5)
";

#[test]
fn cube_header() {
    let header = NrrdHeader::parse(CUBE_HEADER).unwrap();
    assert_eq!(header.magic, "NRRD0004");
    assert_eq!(header.dimension, 4);
    assert_eq!(header.space_dimension, 3);
    assert_eq!(header.sizes, Sizes::new(3, 10, 10, 10));
    assert_eq!(header.space_origin, Vector3::new(-5., -5., -5.));
    assert_eq!(header.space_axes.y, Vector3::new(0., 1., 0.));
    assert_eq!(header.data_type().unwrap(), NrrdType::Float32);
    assert_eq!(header.data_encoding().unwrap(), Encoding::Gzip);
    assert_eq!(header.payload_len().unwrap(), 3 * 1000 * 4);
}

#[test]
fn crlf_and_overridden_fields() {
    let text = CUBE_HEADER.replace('\n', "\r\n") + "sizes: 3 2 4 6\r\n";
    let header: NrrdHeader = text.parse().unwrap();
    assert_eq!(header.sizes, Sizes::new(3, 2, 4, 6));
}

#[test]
fn missing_sizes() {
    let text = CUBE_HEADER.replace("sizes: 3 10 10 10\n", "");
    match NrrdHeader::parse(&text) {
        Err(CoordsError::MissingField("sizes")) => {}
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn missing_fields() {
    for field in &[
        "type",
        "dimension",
        "space dimension",
        "space directions",
        "encoding",
        "space origin",
    ] {
        let text: String = CUBE_HEADER
            .lines()
            .filter(|l| !l.starts_with(&format!("{}:", field)))
            .map(|l| format!("{}\n", l))
            .collect();
        match NrrdHeader::parse(&text) {
            Err(CoordsError::MissingField(f)) => assert_eq!(&f, field),
            other => panic!("unexpected result {:?} without {}", other, field),
        }
    }
}

#[test]
fn bad_magic() {
    let text = CUBE_HEADER.replace("NRRD0004", "NRRDXXXX");
    match NrrdHeader::parse(&text) {
        Err(CoordsError::InvalidMagic(m)) => assert_eq!(m, "NRRDXXXX"),
        other => panic!("unexpected result {:?}", other),
    }
    assert!(NrrdHeader::parse("").is_err());
    assert!(NrrdHeader::parse("P6\n10 10\n").is_err());
}

#[test]
fn wrong_dimensions() {
    let text = CUBE_HEADER.replace("dimension: 4", "dimension: 3");
    match NrrdHeader::parse(&text) {
        Err(CoordsError::UnsupportedDimension(3)) => {}
        other => panic!("unexpected result {:?}", other),
    }
    let text = CUBE_HEADER.replace("space dimension: 3", "space dimension: 2");
    match NrrdHeader::parse(&text) {
        Err(CoordsError::UnsupportedSpaceDimension(2)) => {}
        other => panic!("unexpected result {:?}", other),
    }
    let text = CUBE_HEADER.replace("dimension: 4", "dimension: four");
    match NrrdHeader::parse(&text) {
        Err(CoordsError::InvalidField("dimension", _)) => {}
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn malformed_values() {
    let text = CUBE_HEADER.replace("sizes: 3 10 10 10", "sizes: 3 10 10");
    assert!(matches!(
        NrrdHeader::parse(&text),
        Err(CoordsError::InvalidSizes(_))
    ));
    let text = CUBE_HEADER.replace("(-5,-5,-5)", "-5,-5,-5");
    assert!(matches!(
        NrrdHeader::parse(&text),
        Err(CoordsError::InvalidVector(_))
    ));
    let text = CUBE_HEADER.replace("(0,0,1)", "(0,0)");
    assert!(matches!(
        NrrdHeader::parse(&text),
        Err(CoordsError::InvalidSpaceDirections(_))
    ));
}

#[test]
fn type_and_endianness_checked_on_demand() {
    let text = CUBE_HEADER
        .replace("type: float", "type: uchar")
        .replace("endian: little\n", "");
    let header = NrrdHeader::parse(&text).unwrap();
    assert_eq!(header.endian, "N/A");
    assert_eq!(header.endianness(), None);
    assert!(matches!(
        header.data_type(),
        Err(CoordsError::UnsupportedDataType(_))
    ));

    let header = NrrdHeader {
        type_name: "signed short int".to_owned(),
        ..header
    };
    assert_eq!(header.data_type().unwrap(), NrrdType::Int16);
    assert!(matches!(
        header.payload_endianness(),
        Err(CoordsError::InvalidEndian(_))
    ));

    let header = NrrdHeader {
        type_name: "int8".to_owned(),
        ..header
    };
    assert!(header.payload_endianness().is_ok());
}

#[test]
fn display_round_trip() {
    let header = NrrdHeader {
        sizes: Sizes::new(3, 7, 8, 9),
        type_name: "double".to_owned(),
        endian: "big".to_owned(),
        encoding: "gzip".to_owned(),
        space_origin: Vector3::new(0.5, -12.25, 3e3),
        ..NrrdHeader::default()
    };
    let text = header.to_string();
    assert!(text.ends_with("\n\n"));
    let parsed: NrrdHeader = text.parse().unwrap();
    assert_eq!(parsed, header);
}

#[test]
fn oversized_grids() {
    let text = CUBE_HEADER.replace("sizes: 3 10 10 10", "sizes: 3 2097152 2097152 2097152");
    match NrrdHeader::parse(&text) {
        Err(CoordsError::InvalidSizes(s)) => assert_eq!(s, "3 2097152 2097152 2097152"),
        other => panic!("unexpected result {:?}", other),
    }

    // the element count fits, but not the byte count
    let header = NrrdHeader {
        sizes: Sizes::new(3, 1 << 20, 1 << 20, 1 << 21),
        type_name: "double".to_owned(),
        ..NrrdHeader::default()
    };
    assert_eq!(header.sizes.element_count(), Some(3 << 61));
    match header.payload_len() {
        Err(CoordsError::InvalidSizes(s)) => assert_eq!(s, "3 1048576 1048576 2097152"),
        other => panic!("unexpected result {:?}", other),
    }
}
