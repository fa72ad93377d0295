//! Streaming reader of Wavefront OBJ meshes.
//!
//! Only vertex positions (`v`), vertex normals (`vn`) and faces (`f`)
//! are read; every other statement is skipped. Faces with more than
//! three vertices are split into a triangle fan.

use super::Mesh;
use crate::error::{CoordsError, Result};
use crate::util::is_gz_file;
use flate2::bufread::GzDecoder;
use nalgebra::Vector3;
use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load a mesh from an OBJ file, line by line. If the file's name
/// ends with ".gz", the file is decoded as a gzip stream.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    debug!("Loading OBJ file {}", path.display());
    let file = BufReader::new(File::open(path)?);
    let mesh = if is_gz_file(path) {
        read_obj(BufReader::new(GzDecoder::new(file)))?
    } else {
        read_obj(file)?
    };
    info!(
        "Loaded {} vertices, {} normals and {} triangles",
        mesh.vertices.len(),
        mesh.normals.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Read a mesh from a stream of OBJ text, line by line.
///
/// # Errors
///
/// - `InvalidObjLine` if a `v` or `vn` line does not start with 3
///   finite numbers, or if a face has fewer than 3 vertices;
/// - `InvalidFaceIndex` if a face token does not start with a valid
///   1-based (or negative, relative) vertex index;
/// - `FaceIndexOutOfRange` if a face refers to a missing vertex.
pub fn read_obj<R: BufRead>(source: R) -> Result<Mesh> {
    let mut mesh = Mesh::default();
    let mut face = Vec::new();
    for (i, line) in source.lines().enumerate() {
        let line = line?;
        let number = i + 1;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let v = parse_vector3(tokens)
                    .ok_or_else(|| CoordsError::InvalidObjLine(number, line.clone()))?;
                mesh.vertices.push(v);
            }
            Some("vn") => {
                let n = parse_vector3(tokens)
                    .ok_or_else(|| CoordsError::InvalidObjLine(number, line.clone()))?;
                mesh.normals.push(n);
            }
            Some("f") => {
                face.clear();
                for token in tokens {
                    face.push(parse_face_index(token, mesh.vertices.len(), number)?);
                }
                if face.len() < 3 {
                    return Err(CoordsError::InvalidObjLine(number, line));
                }
                for k in 1..face.len() - 1 {
                    mesh.triangles.extend_from_slice(&[face[0], face[k], face[k + 1]]);
                }
            }
            _ => {}
        }
    }

    let vertex_count = mesh.vertices.len();
    if let Some(&index) = mesh.triangles.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(CoordsError::FaceIndexOutOfRange(index as usize, vertex_count));
    }
    Ok(mesh)
}

/// Parse the first 3 tokens as finite numbers. Any further token
/// (such as a `w` component or a vertex color) is ignored.
fn parse_vector3<'a, I>(mut tokens: I) -> Option<Vector3<f64>>
where
    I: Iterator<Item = &'a str>,
{
    let mut next = || {
        tokens
            .next()
            .and_then(|t| t.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    };
    Some(Vector3::new(next()?, next()?, next()?))
}

/// Parse the vertex part of a face token (`v`, `v/vt`, `v//vn` or
/// `v/vt/vn`) into a 0-based index. Negative indices count back from
/// the last vertex read so far.
fn parse_face_index(token: &str, vertices_so_far: usize, line: usize) -> Result<u32> {
    let err = || CoordsError::InvalidFaceIndex(line, token.to_owned());
    let lead = token.split('/').next().unwrap_or("");
    let index: i64 = lead.parse().map_err(|_| err())?;
    let index = match index {
        0 => return Err(err()),
        i if i > 0 => i - 1,
        i => vertices_so_far as i64 + i,
    };
    if index < 0 {
        return Err(err());
    }
    u32::try_from(index).map_err(|_| err())
}
