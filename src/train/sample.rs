use crate::error::ShapeError;

/// One labelled example for an `I`-input, `O`-output network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<const I: usize, const O: usize> {
    pub input: [f64; I],
    pub target: [f64; O],
}

impl<const I: usize, const O: usize> Sample<I, O> {
    pub fn new(input: [f64; I], target: [f64; O]) -> Self {
        Sample { input, target }
    }

    /// Copies dynamically sized data into a sample, checking both lengths.
    pub fn try_from_slices(input: &[f64], target: &[f64]) -> Result<Self, ShapeError> {
        let input: [f64; I] = input.try_into().map_err(|_| ShapeError {
            expected_rows: 1,
            expected_cols: I,
            actual_rows: 1,
            actual_cols: input.len(),
        })?;
        let target: [f64; O] = target.try_into().map_err(|_| ShapeError {
            expected_rows: 1,
            expected_cols: O,
            actual_rows: 1,
            actual_cols: target.len(),
        })?;
        Ok(Sample { input, target })
    }
}
