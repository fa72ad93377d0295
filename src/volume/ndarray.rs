//! Interfaces and implementations specific to integration with `ndarray`.
use super::NrrdVolume;
use crate::error::{CoordsError, Result};
use ndarray::{Array4, ShapeBuilder};

/// Trait for volumes which can be converted to an ndarray.
pub trait IntoNdArray {
    /// Consume the volume into an ndarray of `f64` values, indexed as
    /// `[channel, x, y, z]`.
    fn into_ndarray(self) -> Result<Array4<f64>>;
}

impl IntoNdArray for NrrdVolume {
    fn into_ndarray(self) -> Result<Array4<f64>> {
        let s = self.sizes();
        let count = s
            .element_count()
            .ok_or_else(|| CoordsError::InvalidSizes(s.to_string()))?;
        let values = (0..count)
            .map(|i| self.reader.read_at(&self.raw_data, i))
            .collect::<std::io::Result<Vec<f64>>>()?;
        // the channel axis varies fastest in the payload
        Array4::from_shape_vec((s.value, s.x, s.y, s.z).f(), values)
            .map_err(|_| CoordsError::IncompatibleLength(count, self.raw_data.len()))
    }
}
