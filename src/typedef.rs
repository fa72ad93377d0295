//! This module contains the enumerated types of the NRRD header which
//! this crate knows how to handle: the voxel element type and the
//! payload encoding. The header keeps the raw field text, which is
//! validated into these types on demand.

use crate::error::{CoordsError, Result};
use std::fmt;
use std::str::FromStr;

/// Data type for representing an NRRD element type in a volume.
/// Only the signed integer and floating point types are supported.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum NrrdType {
    /// signed char.
    Int8,
    /// signed short.
    Int16,
    /// signed int.
    Int32,
    /// 32 bit float.
    Float32,
    /// 64 bit float = double.
    Float64,
}

impl NrrdType {
    /// Retrieve the size of an element of this data type, in bytes.
    pub fn size_of(self) -> usize {
        use NrrdType::*;
        match self {
            Int8 => 1,
            Int16 => 2,
            Int32 | Float32 => 4,
            Float64 => 8,
        }
    }

    /// The canonical NRRD name of this type.
    pub fn name(self) -> &'static str {
        use NrrdType::*;
        match self {
            Int8 => "int8",
            Int16 => "int16",
            Int32 => "int32",
            Float32 => "float",
            Float64 => "double",
        }
    }
}

impl FromStr for NrrdType {
    type Err = CoordsError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim() {
            "int8" | "int8_t" | "signed char" => Ok(NrrdType::Int8),
            "int16" | "int16_t" | "short" | "short int" | "signed short"
            | "signed short int" => Ok(NrrdType::Int16),
            "int32" | "int32_t" | "int" | "signed int" => Ok(NrrdType::Int32),
            "float" => Ok(NrrdType::Float32),
            "double" => Ok(NrrdType::Float64),
            other => Err(CoordsError::UnsupportedDataType(other.to_owned())),
        }
    }
}

impl fmt::Display for NrrdType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The encoding of the voxel payload following the header.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Encoding {
    /// Raw bytes, in the declared endianness.
    Raw,
    /// Raw bytes, compressed as a gzip stream.
    Gzip,
    /// Whitespace separated text. Recognized but not decoded.
    Ascii,
    /// Hexadecimal text. Recognized but not decoded.
    Hex,
    /// Raw bytes, compressed as a bzip2 stream. Recognized but not decoded.
    Bzip2,
}

impl Encoding {
    /// The canonical NRRD name of this encoding.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Raw => "raw",
            Encoding::Gzip => "gzip",
            Encoding::Ascii => "ascii",
            Encoding::Hex => "hex",
            Encoding::Bzip2 => "bzip2",
        }
    }

    /// Whether the payload of this encoding can be decoded by this crate.
    pub fn is_supported(self) -> bool {
        matches!(self, Encoding::Raw | Encoding::Gzip)
    }
}

impl FromStr for Encoding {
    type Err = CoordsError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim() {
            "raw" => Ok(Encoding::Raw),
            "gzip" | "gz" => Ok(Encoding::Gzip),
            "ascii" | "text" | "txt" => Ok(Encoding::Ascii),
            "hex" => Ok(Encoding::Hex),
            "bzip2" | "bz2" => Ok(Encoding::Bzip2),
            other => Err(CoordsError::UnsupportedEncoding(other.to_owned())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
