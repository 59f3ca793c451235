pub mod assemble;
pub mod extract;
pub mod group;
pub mod trace;

pub use assemble::{AssembleAll, AssemblePolygons};
pub use extract::{ConnectedRegion, ExtractRegions};
pub use group::{Claim, GroupClaims, OwnerCells};
pub use trace::TraceOutline;

use crate::error::ParamsError;

/// Parameters controlling how traced outlines map into render space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineParams {
    /// Edge length of one cell in render units.
    pub cell_size: f64,
}

impl Default for OutlineParams {
    fn default() -> Self {
        Self { cell_size: 16.0 }
    }
}

impl OutlineParams {
    /// Creates params with the given cell edge length.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        Self { cell_size }
    }

    /// Checks that the params are usable.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::InvalidCellSize` if the cell size is not finite
    /// and strictly positive.
    pub fn validate(&self) -> Result<(), ParamsError> {
        self.validated_cell_size().map(|_| ())
    }

    pub(crate) fn validated_cell_size(&self) -> Result<f64, ParamsError> {
        if self.cell_size.is_finite() && self.cell_size > 0.0 {
            Ok(self.cell_size)
        } else {
            Err(ParamsError::InvalidCellSize(self.cell_size))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_size_is_sixteen() {
        assert!((OutlineParams::default().cell_size - 16.0).abs() < f64::EPSILON);
        assert!(OutlineParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_cell_sizes() {
        for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                OutlineParams::new(size).validate(),
                Err(ParamsError::InvalidCellSize(_))
            ));
        }
    }
}
