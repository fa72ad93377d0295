//! Module for handling and retrieving complete NRRD objects.

use crate::error::{CoordsError, Result};
use crate::header::{header_length, NrrdHeader};
use crate::typedef::Encoding;
use crate::volume::NrrdVolume;
use flate2::bufread::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// An NRRD file fully contained in memory: a header and a volume
/// holding the decoded payload. Only attached payloads (following the
/// header in the same file) are supported.
#[derive(Debug, Clone)]
pub struct NrrdObject {
    volume: NrrdVolume,
}

impl NrrdObject {
    /// Retrieve the full contents of an NRRD file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use volume_coords::NrrdObject;
    /// # use volume_coords::Result;
    ///
    /// # fn run() -> Result<()> {
    /// let obj = NrrdObject::from_file("coordinates.nrrd")?;
    /// println!("{:?}", obj.header().sizes);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<NrrdObject> {
        let path = path.as_ref();
        debug!("Loading NRRD file {}", path.display());
        let mut data = Vec::new();
        let _ = BufReader::new(File::open(path)?).read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Retrieve an NRRD object from the given byte stream, read to its end.
    pub fn from_reader<R: Read>(mut source: R) -> Result<NrrdObject> {
        let mut data = Vec::new();
        let _ = source.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Retrieve an NRRD object from the full contents of a file.
    ///
    /// # Errors
    ///
    /// - `MissingHeaderTerminator` if no blank line ends the header;
    /// - any header parsing error;
    /// - `UnsupportedEncoding` unless the payload is `raw` or `gzip`;
    /// - `InvalidSizes` if the payload size does not fit in memory
    ///   addresses;
    /// - any volume creation error.
    pub fn from_bytes(data: &[u8]) -> Result<NrrdObject> {
        let len = header_length(data).ok_or(CoordsError::MissingHeaderTerminator)?;
        let header = NrrdHeader::parse(&String::from_utf8_lossy(&data[..len]))?;
        let raw_data = decode_payload(&header, &data[len..])?;
        let volume = NrrdVolume::from_raw_data(header, raw_data)?;
        Ok(NrrdObject { volume })
    }

    /// Obtain a reference to the NRRD header.
    pub fn header(&self) -> &NrrdHeader {
        self.volume.header()
    }

    /// Obtain a reference to the object's volume.
    pub fn volume(&self) -> &NrrdVolume {
        &self.volume
    }

    /// Move the volume out of the object.
    pub fn into_volume(self) -> NrrdVolume {
        self.volume
    }
}

/// Decode the payload according to the header's encoding.
fn decode_payload(header: &NrrdHeader, payload: &[u8]) -> Result<Vec<u8>> {
    match header.data_encoding()? {
        Encoding::Raw => Ok(payload.to_vec()),
        Encoding::Gzip => {
            // inflate no more than the header declares
            let expected = header.payload_len()?;
            let mut data = Vec::new();
            let _ = GzDecoder::new(payload)
                .take(expected as u64)
                .read_to_end(&mut data)?;
            debug!("Inflated {} bytes into {}", payload.len(), data.len());
            Ok(data)
        }
        e => Err(CoordsError::UnsupportedEncoding(e.name().to_owned())),
    }
}
