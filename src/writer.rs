//! Utility functions to write aligned datasets and NRRD files.
//!
//! Binary buffers are written little-endian. When a buffer's path ends
//! with ".gz", the buffer is gzip-compressed.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use byteordered::ByteOrdered;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::affine::BoundingBox;
use crate::align::AlignedDataset;
use crate::error::{CoordsError, Result};
use crate::header::NrrdHeader;
use crate::typedef::Encoding;
use crate::util::is_gz_file;
use crate::volume::NrrdVolume;

/// File name of the bounding box in a dataset directory.
pub const BOUNDING_BOX_FILE: &str = "mesh.json";
/// File name of the triangle buffer in a dataset directory.
pub const TRIANGLES_FILE: &str = "elem.dat";
/// File name of the vertex buffer in a dataset directory.
pub const VERTICES_FILE: &str = "vert.dat";

/// Write the three files of an aligned dataset into `dir`, which is
/// created if needed: the bounding box (`mesh.json`), the triangle
/// indices (`elem.dat`) and the vertex records (`vert.dat`).
pub fn write_dataset<P: AsRef<Path>>(dir: P, dataset: &AlignedDataset) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    write_bounding_box(dir.join(BOUNDING_BOX_FILE), &dataset.bounding_box)?;
    write_triangles(dir.join(TRIANGLES_FILE), &dataset.triangles)?;
    write_vertices(dir.join(VERTICES_FILE), &dataset.to_vertex_buffer())?;
    info!(
        "Wrote {} vertices and {} triangles to {}",
        dataset.records.len(),
        dataset.triangles.len() / 3,
        dir.display()
    );
    Ok(())
}

/// Write a bounding box as `{"min":[x,y,z],"max":[x,y,z]}`.
pub fn write_bounding_box<P: AsRef<Path>>(path: P, bbox: &BoundingBox) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, bbox)?;
    writer.flush()?;
    Ok(())
}

/// Write triangle indices as packed `u32` values.
pub fn write_triangles<P: AsRef<Path>>(path: P, triangles: &[u32]) -> Result<()> {
    write_buffer(path.as_ref(), |w| {
        let mut w = ByteOrdered::le(w);
        for &i in triangles {
            w.write_u32(i)?;
        }
        Ok(())
    })
}

/// Write vertex values as packed `f32` values.
pub fn write_vertices<P: AsRef<Path>>(path: P, values: &[f32]) -> Result<()> {
    write_buffer(path.as_ref(), |w| {
        let mut w = ByteOrdered::le(w);
        for &v in values {
            w.write_f32(v)?;
        }
        Ok(())
    })
}

/// Write an NRRD file made of the given header, a blank line and the
/// payload, encoded as the header declares (`raw` or `gzip`).
///
/// # Errors
///
/// - `UnsupportedEncoding` if the header declares another encoding;
/// - `IncompatibleLength` if `raw_data` does not have the size the
///   header describes.
pub fn write_nrrd<P: AsRef<Path>>(path: P, header: &NrrdHeader, raw_data: &[u8]) -> Result<()> {
    let encoding = header.data_encoding()?;
    if !encoding.is_supported() {
        return Err(CoordsError::UnsupportedEncoding(encoding.name().to_owned()));
    }
    let expected = header.payload_len()?;
    if raw_data.len() != expected {
        return Err(CoordsError::IncompatibleLength(expected, raw_data.len()));
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write!(writer, "{}", header)?;
    if encoding == Encoding::Gzip {
        let mut e = GzEncoder::new(writer, Compression::default());
        e.write_all(raw_data)?;
        e.finish()?.flush()?;
    } else {
        writer.write_all(raw_data)?;
        writer.flush()?;
    }
    Ok(())
}

/// Write a volume back to an NRRD file.
pub fn write_volume<P: AsRef<Path>>(path: P, volume: &NrrdVolume) -> Result<()> {
    let len = volume.header().payload_len()?;
    write_nrrd(path, volume.header(), &volume.raw_data()[..len])
}

fn write_buffer<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    if is_gz_file(path) {
        let mut e = GzEncoder::new(writer, Compression::default());
        write(&mut e)?;
        e.finish()?.flush()?;
    } else {
        write(&mut writer)?;
        writer.flush()?;
    }
    Ok(())
}
