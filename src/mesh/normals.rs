//! Per-vertex normal estimation from triangle faces.

use nalgebra::Vector3;

/// Normal given to vertices for which no direction can be estimated.
pub const FALLBACK_NORMAL: [f64; 3] = [1., 0., 0.];

/// Estimate one unit normal per vertex.
///
/// Each triangle adds its face normal to its 3 vertices, weighted by
/// the triangle's area (the cross product of two edges is left
/// unnormalized). The sums are then normalized. Vertices in no
/// triangle, or whose sum vanishes, get [`FALLBACK_NORMAL`].
/// Triangles referring to a missing vertex are skipped.
///
/// The result does not depend on anything but the inputs: the
/// triangles are visited in order.
pub fn estimate_normals(vertices: &[Vector3<f64>], triangles: &[u32]) -> Vec<Vector3<f64>> {
    estimate_normals_or(vertices, triangles, Vector3::from(FALLBACK_NORMAL))
}

/// Same as [`estimate_normals`], with the given normal for vertices
/// without a direction.
pub fn estimate_normals_or(
    vertices: &[Vector3<f64>],
    triangles: &[u32],
    fallback: Vector3<f64>,
) -> Vec<Vector3<f64>> {
    let mut sums = vec![Vector3::zeros(); vertices.len()];
    let mut skipped = 0usize;
    for t in triangles.chunks_exact(3) {
        let (a, b, c) = (t[0] as usize, t[1] as usize, t[2] as usize);
        let (pa, pb, pc) = match (vertices.get(a), vertices.get(b), vertices.get(c)) {
            (Some(pa), Some(pb), Some(pc)) => (pa, pb, pc),
            _ => {
                skipped += 1;
                continue;
            }
        };
        let n = (pb - pa).cross(&(pc - pa));
        sums[a] += n;
        sums[b] += n;
        sums[c] += n;
    }
    if skipped > 0 {
        warn!("Skipped {} triangles with missing vertices", skipped);
    }

    let mut invalid = 0usize;
    let normals: Vec<_> = sums
        .into_iter()
        .map(|n| match n.try_normalize(f64::EPSILON) {
            Some(n) if n.iter().all(|c| c.is_finite()) => n,
            _ => {
                invalid += 1;
                fallback
            }
        })
        .collect();

    if invalid > 0 {
        warn!(
            "Normals could not be estimated for {} of {} vertices ({:.2}%)",
            invalid,
            normals.len(),
            100. * invalid as f64 / normals.len() as f64
        );
    }
    normals
}
