//! This module defines the data element API, which binds the element
//! type and byte order declared by an NRRD header to a reading
//! function, once, when a volume is created.
use crate::error::Result;
use crate::typedef::NrrdType;
use crate::util::Endianness;
use byteordered::ByteOrdered;
use num_traits::AsPrimitive;
use std::fmt;
use std::io;

/// Function reading one element at the start of the given bytes,
/// converted to `f64`.
pub type ReadFn = fn(&[u8]) -> io::Result<f64>;

macro_rules! element_reader {
    ($name:ident, $order:ident, $read:ident) => {
        fn $name(src: &[u8]) -> io::Result<f64> {
            ByteOrdered::$order(src).$read().map(f64::from)
        }
    };
}

element_reader!(read_i8, native, read_i8);
element_reader!(read_i16_le, le, read_i16);
element_reader!(read_i16_be, be, read_i16);
element_reader!(read_i32_le, le, read_i32);
element_reader!(read_i32_be, be, read_i32);
element_reader!(read_f32_le, le, read_f32);
element_reader!(read_f32_be, be, read_f32);
element_reader!(read_f64_le, le, read_f64);
element_reader!(read_f64_be, be, read_f64);

/// A scalar reader bound to an element type and a byte order.
#[derive(Clone, Copy)]
pub struct ElementReader {
    data_type: NrrdType,
    endianness: Endianness,
    read: ReadFn,
}

impl fmt::Debug for ElementReader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ElementReader")
            .field("data_type", &self.data_type)
            .field("endianness", &self.endianness)
            .finish()
    }
}

impl ElementReader {
    /// Select the reading function for the given type and byte order.
    pub fn new(data_type: NrrdType, endianness: Endianness) -> Self {
        use Endianness::*;
        use NrrdType::*;
        let read: ReadFn = match (data_type, endianness) {
            (Int8, _) => read_i8,
            (Int16, Little) => read_i16_le,
            (Int16, Big) => read_i16_be,
            (Int32, Little) => read_i32_le,
            (Int32, Big) => read_i32_be,
            (Float32, Little) => read_f32_le,
            (Float32, Big) => read_f32_be,
            (Float64, Little) => read_f64_le,
            (Float64, Big) => read_f64_be,
        };
        ElementReader {
            data_type,
            endianness,
            read,
        }
    }

    /// The element type read.
    pub fn data_type(&self) -> NrrdType {
        self.data_type
    }

    /// The byte order read.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Size of one element, in bytes.
    pub fn size_of(&self) -> usize {
        self.data_type.size_of()
    }

    /// Read the element at the given element index of `data`.
    #[inline]
    pub fn read_at(&self, data: &[u8], index: usize) -> io::Result<f64> {
        let offset = index
            .checked_mul(self.size_of())
            .ok_or(io::ErrorKind::UnexpectedEof)?;
        match data.get(offset..) {
            Some(bytes) => (self.read)(bytes),
            None => Err(io::ErrorKind::UnexpectedEof.into()),
        }
    }
}

/// Encode values as raw elements of the given type and byte order,
/// the inverse of `ElementReader`. Values are converted with `as`
/// semantics (saturating float to integer casts).
pub fn encode_elements(
    values: &[f64],
    data_type: NrrdType,
    endianness: Endianness,
) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(values.len() * data_type.size_of());
    {
        let mut w = ByteOrdered::runtime(&mut out, endianness);
        for v in values {
            match data_type {
                NrrdType::Int8 => w.write_i8(cast::<i8>(*v))?,
                NrrdType::Int16 => w.write_i16(cast::<i16>(*v))?,
                NrrdType::Int32 => w.write_i32(cast::<i32>(*v))?,
                NrrdType::Float32 => w.write_f32(cast::<f32>(*v))?,
                NrrdType::Float64 => w.write_f64(*v)?,
            }
        }
    }
    Ok(out)
}

#[inline]
fn cast<T>(v: f64) -> T
where
    T: 'static + Copy,
    f64: AsPrimitive<T>,
{
    v.as_()
}
