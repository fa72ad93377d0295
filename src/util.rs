//! Private utility module
use std::path::Path;

pub use byteordered::Endianness;

/// Interpret the value of the NRRD `endian` field.
/// Returns `None` for `"N/A"` and anything else that is not
/// `"little"` or `"big"`.
pub fn parse_endian(name: &str) -> Option<Endianness> {
    match name.trim() {
        "little" => Some(Endianness::Little),
        "big" => Some(Endianness::Big),
        _ => None,
    }
}

/// The NRRD name of a byte order.
pub fn endian_name(e: Endianness) -> &'static str {
    match e {
        Endianness::Little => "little",
        Endianness::Big => "big",
    }
}

/// Check whether the file path ends with a `.gz` extension.
pub fn is_gz_file<P>(path: P) -> bool
where
    P: AsRef<Path>,
{
    path.as_ref()
        .file_name()
        .map(|a| a.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false)
}
