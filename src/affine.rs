//! Affine relation between the voxel grid and world space.

use crate::header::NrrdHeader;
use nalgebra::{Matrix3, Matrix4, Vector3};
use serde::{Deserialize, Serialize};

/// 4x4 homogeneous affine transform.
pub type Affine4 = Matrix4<f64>;

/// An axis-aligned box, serialized as `{"min":[x,y,z],"max":[x,y,z]}`.
/// The default box is the single point at the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Lowest coordinate on each axis
    pub min: [f64; 3],
    /// Highest coordinate on each axis
    pub max: [f64; 3],
}

impl BoundingBox {
    /// Smallest box enclosing all the given points. Returns `None`
    /// if there are no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector3<f64>>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bbox = BoundingBox {
            min: first.into(),
            max: first.into(),
        };
        for p in points {
            bbox.include(&p);
        }
        Some(bbox)
    }

    /// Grow the box so that it contains `p`.
    pub fn include(&mut self, p: &Vector3<f64>) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(p[axis]);
            self.max[axis] = self.max[axis].max(p[axis]);
        }
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Vector3<f64> {
        (Vector3::from(self.min) + Vector3::from(self.max)) / 2.
    }

    /// Extent of the box on each axis.
    pub fn size(&self) -> Vector3<f64> {
        Vector3::from(self.max) - Vector3::from(self.min)
    }
}

impl NrrdHeader {
    /// The affine transform taking voxel index coordinates `(x, y, z, 1)`
    /// to world coordinates. Its columns are the space direction
    /// vectors, followed by the space origin.
    #[rustfmt::skip]
    pub fn affine(&self) -> Affine4 {
        let a = &self.space_axes;
        let o = &self.space_origin;
        Affine4::new(
            a.x.x, a.y.x, a.z.x, o.x,
            a.x.y, a.y.y, a.z.y, o.y,
            a.x.z, a.y.z, a.z.z, o.z,
            0.0,   0.0,   0.0,   1.0,
        )
    }

    /// The linear part of `affine`, made of the space direction vectors.
    pub fn axes_matrix(&self) -> Matrix3<f64> {
        let a = &self.space_axes;
        Matrix3::from_columns(&[a.x, a.y, a.z])
    }

    /// Axis-aligned world bounds of the sampled grid: the box spanned
    /// by the origin and the origin shifted by each axis vector
    /// scaled with the axis extent.
    pub fn world_bounds(&self) -> BoundingBox {
        let o = self.space_origin;
        let ax = self.space_axes.x * self.sizes.x as f64;
        let ay = self.space_axes.y * self.sizes.y as f64;
        let az = self.space_axes.z * self.sizes.z as f64;
        let corners = (0..8).map(|i| {
            let mut p = o;
            if i & 1 != 0 {
                p += ax;
            }
            if i & 2 != 0 {
                p += ay;
            }
            if i & 4 != 0 {
                p += az;
            }
            p
        });
        // 8 corners, never empty
        BoundingBox::from_points(corners).unwrap_or(BoundingBox {
            min: o.into(),
            max: o.into(),
        })
    }
}
