//! Types for error handling go here.

use std::io::Error as IOError;

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug)]
    pub enum CoordsError {
        /// The first header line is not an NRRD magic number
        InvalidMagic(line: String) {
            display("Invalid NRRD magic number: {:?}", line)
        }
        /// A mandatory header field was not found
        MissingField(name: &'static str) {
            display("NRRD header is missing the mandatory field \"{}\"", name)
        }
        /// A header field holds a value which could not be interpreted
        InvalidField(name: &'static str, value: String) {
            display("Invalid value for NRRD field \"{}\": {:?}", name, value)
        }
        /// The volume is not made of one channel axis plus three spatial axes
        UnsupportedDimension(dimension: i64) {
            display("Expected 4 dimensions, but the file has {}", dimension)
        }
        /// The volume does not live in a 3D space
        UnsupportedSpaceDimension(dimension: i64) {
            display("Expected a 3D space, but the file is defined in {}D", dimension)
        }
        /// The `sizes` field is not made of 4 integers
        InvalidSizes(value: String) {
            display("Field \"sizes\" must hold 4 integers, got {:?}", value)
        }
        /// The `space directions` field is not made of three 3-vectors
        InvalidSpaceDirections(value: String) {
            display("Unable to parse field \"space directions\": {:?}", value)
        }
        /// A vector literal such as `(1,2,3)` is malformed
        InvalidVector(value: String) {
            display("Wrong vector format: {:?}", value)
        }
        /// The element type is not one of the supported signed integer or
        /// floating point types
        UnsupportedDataType(name: String) {
            display("Unsupported NRRD data type {:?}", name)
        }
        /// The payload encoding cannot be decoded
        UnsupportedEncoding(name: String) {
            display("Unsupported NRRD encoding {:?}", name)
        }
        /// Multi-byte elements need a known byte order
        InvalidEndian(name: String) {
            display("Invalid or missing endianness {:?} for a multi-byte data type", name)
        }
        /// No blank line separates the header from the payload
        MissingHeaderTerminator {
            display("NRRD header is not terminated by a blank line")
        }
        /// The decoded payload is shorter than what the header declares
        IncompatibleLength(expected: usize, got: usize) {
            display("Payload has {} bytes, but the header requires {}", got, expected)
        }
        /// Coordinate volumes need at least 3 channels per voxel
        UnsupportedChannelCount(channels: usize) {
            display("Expected at least 3 channels per voxel, got {}", channels)
        }
        /// A `v` or `vn` line of a Wavefront OBJ file is malformed
        InvalidObjLine(line: usize, content: String) {
            display("Unable to parse OBJ line {}: {:?}", line, content)
        }
        /// A face token of a Wavefront OBJ file is not a valid vertex index
        InvalidFaceIndex(line: usize, token: String) {
            display("Invalid face index {:?} on OBJ line {}", token, line)
        }
        /// A face refers to a vertex which does not exist
        FaceIndexOutOfRange(index: usize, vertex_count: usize) {
            display("Face index {} is out of range for {} vertices", index, vertex_count)
        }
        /// A point falls outside of the sampled grid
        OutOfVolume(point: [f64; 3]) {
            display("Point ({}, {}, {}) is out of the volume", point[0], point[1], point[2])
        }
        /// I/O Error
        Io(err: IOError) {
            from()
            display("I/O error: {}", err)
            source(err)
        }
        /// JSON serialization error
        Json(err: serde_json::Error) {
            from()
            display("JSON error: {}", err)
            source(err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, CoordsError>;
