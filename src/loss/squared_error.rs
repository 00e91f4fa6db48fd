use super::ErrorFunction;

/// `0.5 * (target - result)^2`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquaredError;

impl ErrorFunction for SquaredError {
    fn error(target: f64, result: f64) -> f64 {
        0.5 * (target - result) * (target - result)
    }

    /// target - result
    fn error_dir(target: f64, result: f64) -> f64 {
        target - result
    }
}
