//! This module defines the `NrrdHeader` struct, which is used
//! to provide important information about NRRD coordinate volumes.
//!
//! Only the subset of the format describing a vector field over a
//! 3D grid is supported: 4 dimensions, the first one holding the
//! channels of each voxel, in a 3D world space.

use crate::error::{CoordsError, Result};
use crate::typedef::{Encoding, NrrdType};
use crate::util::{endian_name, parse_endian, Endianness};
use nalgebra::Vector3;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Number of digits following `NRRD` in the magic number.
const MAGIC_VERSION_DIGITS: usize = 4;

/// The magic number written by this crate.
pub const MAGIC_NRRD4: &str = "NRRD0004";

/// Extents of the 4 axes of the volume.
/// `value` is the number of channels per voxel, `x`, `y` and `z`
/// the grid extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sizes {
    /// Channels per voxel
    pub value: usize,
    /// Grid extent along the first spatial axis
    pub x: usize,
    /// Grid extent along the second spatial axis
    pub y: usize,
    /// Grid extent along the third spatial axis
    pub z: usize,
}

impl Sizes {
    /// Create a new set of sizes.
    pub fn new(value: usize, x: usize, y: usize, z: usize) -> Self {
        Sizes { value, x, y, z }
    }

    /// Number of voxels in the grid, or `None` if it does not fit in
    /// a `usize`.
    pub fn voxel_count(&self) -> Option<usize> {
        self.x.checked_mul(self.y)?.checked_mul(self.z)
    }

    /// Number of scalar elements in the payload, or `None` if it does
    /// not fit in a `usize`.
    pub fn element_count(&self) -> Option<usize> {
        self.value.checked_mul(self.voxel_count()?)
    }

    /// The spatial extents, in axis order.
    pub fn grid(&self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }
}

/// The three vectors spanning one voxel step along each grid axis.
/// They are neither required to be orthogonal nor of unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceAxes {
    /// Step along the first grid axis
    pub x: Vector3<f64>,
    /// Step along the second grid axis
    pub y: Vector3<f64>,
    /// Step along the third grid axis
    pub z: Vector3<f64>,
}

impl fmt::Display for Sizes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} {}", self.value, self.x, self.y, self.z)
    }
}

impl SpaceAxes {
    /// The axis vectors in grid axis order.
    pub fn as_array(&self) -> [Vector3<f64>; 3] {
        [self.x, self.y, self.z]
    }
}

impl Default for SpaceAxes {
    fn default() -> Self {
        SpaceAxes {
            x: Vector3::x(),
            y: Vector3::y(),
            z: Vector3::z(),
        }
    }
}

/// The NRRD header data type.
/// Fields are public and named after the NRRD header fields. The
/// type, endianness and encoding fields keep their textual value and
/// are validated on demand, since their meaning only matters once
/// the payload is read.
///
/// # Example
///
/// ```
/// use volume_coords::NrrdHeader;
/// # use volume_coords::Result;
///
/// # fn run() -> Result<()> {
/// let header: NrrdHeader = "NRRD0004
/// type: float
/// dimension: 4
/// space dimension: 3
/// sizes: 3 10 10 10
/// space directions: none (1,0,0) (0,1,0) (0,0,1)
/// endian: little
/// encoding: raw
/// space origin: (0,0,0)
/// ".parse()?;
/// assert_eq!(header.sizes.x, 10);
/// # Ok(())
/// # }
/// # run().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NrrdHeader {
    /// Magic number line, such as `NRRD0004`
    pub magic: String,
    /// Number of axes, must be 4
    pub dimension: i64,
    /// Dimension of the world space, must be 3
    pub space_dimension: i64,
    /// Extents of the channel axis and of the 3 grid axes
    pub sizes: Sizes,
    /// Element type name, as written in the file
    pub type_name: String,
    /// `"little"`, `"big"` or `"N/A"` when absent
    pub endian: String,
    /// Payload encoding name, as written in the file
    pub encoding: String,
    /// World position of voxel (0,0,0)
    pub space_origin: Vector3<f64>,
    /// World step of each grid axis
    pub space_axes: SpaceAxes,
}

impl Default for NrrdHeader {
    fn default() -> NrrdHeader {
        NrrdHeader {
            magic: MAGIC_NRRD4.to_owned(),
            dimension: 4,
            space_dimension: 3,
            sizes: Sizes::new(3, 1, 1, 1),
            type_name: NrrdType::Float32.name().to_owned(),
            endian: endian_name(Endianness::native()).to_owned(),
            encoding: Encoding::Raw.name().to_owned(),
            space_origin: Vector3::zeros(),
            space_axes: SpaceAxes::default(),
        }
    }
}

impl NrrdHeader {
    /// Parse the text of an NRRD header. The text may or may not
    /// include the blank line terminating the header.
    ///
    /// # Errors
    ///
    /// - `InvalidMagic` if the first non-comment line is not `NRRD`
    ///   followed by 4 digits;
    /// - `MissingField` if a mandatory field is absent;
    /// - `UnsupportedDimension` / `UnsupportedSpaceDimension` if the
    ///   volume is not a 4D grid in a 3D space;
    /// - `InvalidSizes`, `InvalidSpaceDirections`, `InvalidVector` or
    ///   `InvalidField` for malformed values.
    pub fn parse(content: &str) -> Result<NrrdHeader> {
        let mut lines = content
            .trim()
            .split(|c| c == '\n' || c == '\r')
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        let magic = lines.next().unwrap_or("");
        if !is_magic_number(magic) {
            return Err(CoordsError::InvalidMagic(magic.to_owned()));
        }

        // later occurrences of a field override earlier ones
        let fields: HashMap<&str, &str> = lines.filter_map(split_field).collect();

        let dimension = parse_integer("dimension", read_field(&fields, "dimension")?)?;
        let encoding = read_field(&fields, "encoding")?.to_owned();
        let endian = fields.get("endian").copied().unwrap_or("N/A").to_owned();
        let sizes = parse_sizes(read_field(&fields, "sizes")?)?;
        let space_dimension =
            parse_integer("space dimension", read_field(&fields, "space dimension")?)?;
        let space_origin = parse_vector(read_field(&fields, "space origin")?)?;
        let space_axes = parse_space_directions(read_field(&fields, "space directions")?)?;
        let type_name = read_field(&fields, "type")?.to_owned();

        if dimension != 4 {
            return Err(CoordsError::UnsupportedDimension(dimension));
        }
        if space_dimension != 3 {
            return Err(CoordsError::UnsupportedSpaceDimension(space_dimension));
        }

        let header = NrrdHeader {
            magic: magic.to_owned(),
            dimension,
            space_dimension,
            sizes,
            type_name,
            endian,
            encoding,
            space_origin,
            space_axes,
        };
        debug!(
            "Parsed NRRD header: sizes {:?}, type {:?}, endian {:?}, encoding {:?}",
            header.sizes, header.type_name, header.endian, header.encoding
        );
        Ok(header)
    }

    /// Get the element type as a validated enum.
    pub fn data_type(&self) -> Result<NrrdType> {
        self.type_name.parse()
    }

    /// Get the payload encoding as a validated enum.
    pub fn data_encoding(&self) -> Result<Encoding> {
        self.encoding.parse()
    }

    /// Get the byte order of the payload, if declared.
    pub fn endianness(&self) -> Option<Endianness> {
        parse_endian(&self.endian)
    }

    /// Get the byte order needed to read the payload. One-byte
    /// types do not need one; any byte order is returned for them.
    ///
    /// # Errors
    ///
    /// - `UnsupportedDataType` if the element type is unknown;
    /// - `InvalidEndian` if the element type is wider than one byte
    ///   and the header does not declare `little` or `big`.
    pub fn payload_endianness(&self) -> Result<Endianness> {
        let data_type = self.data_type()?;
        match self.endianness() {
            Some(e) => Ok(e),
            None if data_type.size_of() == 1 => Ok(Endianness::native()),
            None => Err(CoordsError::InvalidEndian(self.endian.clone())),
        }
    }

    /// Number of bytes of the decoded payload.
    ///
    /// # Errors
    ///
    /// - `UnsupportedDataType` if the element type is unknown;
    /// - `InvalidSizes` if the byte count does not fit in a `usize`.
    pub fn payload_len(&self) -> Result<usize> {
        let size_of = self.data_type()?.size_of();
        self.sizes
            .element_count()
            .and_then(|count| count.checked_mul(size_of))
            .ok_or_else(|| CoordsError::InvalidSizes(self.sizes.to_string()))
    }
}

impl FromStr for NrrdHeader {
    type Err = CoordsError;

    fn from_str(content: &str) -> Result<Self> {
        NrrdHeader::parse(content)
    }
}

impl fmt::Display for NrrdHeader {
    /// Write the header as NRRD text, including the terminating
    /// blank line.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let axes = &self.space_axes;
        writeln!(f, "{}", self.magic)?;
        writeln!(f, "type: {}", self.type_name)?;
        writeln!(f, "dimension: {}", self.dimension)?;
        writeln!(f, "space dimension: {}", self.space_dimension)?;
        writeln!(f, "sizes: {}", self.sizes)?;
        writeln!(
            f,
            "space directions: none {} {} {}",
            VectorLiteral(&axes.x),
            VectorLiteral(&axes.y),
            VectorLiteral(&axes.z)
        )?;
        writeln!(f, "kinds: vector domain domain domain")?;
        if self.endian != "N/A" {
            writeln!(f, "endian: {}", self.endian)?;
        }
        writeln!(f, "encoding: {}", self.encoding)?;
        writeln!(f, "space origin: {}", VectorLiteral(&self.space_origin))?;
        writeln!(f)
    }
}

struct VectorLiteral<'a>(&'a Vector3<f64>);

impl fmt::Display for VectorLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{},{})", self.0.x, self.0.y, self.0.z)
    }
}

/// Find the length of the header at the start of an NRRD file, in
/// bytes, including the blank line which terminates it (`\n\n` or
/// `\r\n\r\n`). A backslash escapes the byte that follows it.
/// Returns `None` if the header is not terminated.
pub fn header_length(data: &[u8]) -> Option<usize> {
    const CR: u8 = b'\r';
    const LF: u8 = b'\n';
    const ESCAPE: u8 = b'\\';

    #[derive(Clone, Copy)]
    enum State {
        Line,
        FirstCr,
        FirstCrLf,
        SecondCr,
        FirstLf,
    }

    let mut state = State::Line;
    let mut cursor = 0;
    while cursor < data.len() {
        let c = data[cursor];
        cursor += 1;
        if c == ESCAPE {
            cursor += 1;
            continue;
        }
        state = match (state, c) {
            (State::Line, CR) => State::FirstCr,
            (State::Line, LF) => State::FirstLf,
            (State::Line, _) => State::Line,
            (State::FirstCr, LF) => State::FirstCrLf,
            (State::FirstCrLf, CR) => State::SecondCr,
            (State::SecondCr, LF) | (State::FirstLf, LF) => return Some(cursor),
            _ => State::Line,
        };
    }
    None
}

fn is_magic_number(line: &str) -> bool {
    line.len() == 4 + MAGIC_VERSION_DIGITS
        && line.starts_with("NRRD")
        && line[4..].bytes().all(|b| b.is_ascii_digit())
}

fn split_field(line: &str) -> Option<(&str, &str)> {
    let colon = line.find(':')?;
    Some((&line[..colon], line[colon + 1..].trim()))
}

fn read_field<'a>(fields: &HashMap<&str, &'a str>, name: &'static str) -> Result<&'a str> {
    fields
        .get(name)
        .copied()
        .ok_or(CoordsError::MissingField(name))
}

fn parse_integer(name: &'static str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| CoordsError::InvalidField(name, value.to_owned()))
}

fn parse_sizes(text: &str) -> Result<Sizes> {
    let values: Vec<usize> = text
        .split(|c| c == ' ' || c == '\t')
        .filter(|t| !t.is_empty())
        .map(|t| t.parse())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| CoordsError::InvalidSizes(text.to_owned()))?;
    match values[..] {
        [value, x, y, z] => {
            let sizes = Sizes { value, x, y, z };
            match sizes.element_count() {
                Some(_) => Ok(sizes),
                None => Err(CoordsError::InvalidSizes(text.to_owned())),
            }
        }
        _ => Err(CoordsError::InvalidSizes(text.to_owned())),
    }
}

/// Parse a vector literal of the form `(x,y,z)`.
fn parse_vector(text: &str) -> Result<Vector3<f64>> {
    let text = text.trim();
    let err = || CoordsError::InvalidVector(text.to_owned());
    if !text.starts_with('(') || !text.ends_with(')') || text.len() < 2 {
        return Err(err());
    }
    let elements: Vec<f64> = text[1..text.len() - 1]
        .split(',')
        .map(|t| t.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| err())?;
    match elements[..] {
        [x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(err()),
    }
}

/// Parse the `space directions` field: an optional leading token
/// (`none` for the channel axis) followed by exactly three
/// parenthesized triples. Numbers within a triple are separated by
/// commas and/or whitespace.
fn parse_space_directions(text: &str) -> Result<SpaceAxes> {
    let err = || CoordsError::InvalidSpaceDirections(text.to_owned());
    let start = text.find('(').ok_or_else(err)?;
    let mut rest = &text[start..];
    let mut axes = [Vector3::zeros(); 3];
    for axis in axes.iter_mut() {
        rest = rest.trim_start();
        if !rest.starts_with('(') {
            return Err(err());
        }
        let end = rest.find(')').ok_or_else(err)?;
        *axis = parse_triple(&rest[1..end]).ok_or_else(err)?;
        rest = &rest[end + 1..];
    }
    if !rest.trim().is_empty() {
        return Err(err());
    }
    let [x, y, z] = axes;
    Ok(SpaceAxes { x, y, z })
}

fn parse_triple(body: &str) -> Option<Vector3<f64>> {
    let body = body.trim();
    if body.starts_with(',') || body.ends_with(',') {
        return None;
    }
    let is_number_char = |c: char| c.is_ascii_digit() || "eE.+-".contains(c);
    let mut values = [0.; 3];
    let mut count = 0;
    for token in body
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        if count == 3 || !token.chars().all(is_number_char) {
            return None;
        }
        values[count] = token.parse().ok()?;
        count += 1;
    }
    if count == 3 {
        Some(Vector3::new(values[0], values[1], values[2]))
    } else {
        None
    }
}
