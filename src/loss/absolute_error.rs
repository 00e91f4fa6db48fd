use super::ErrorFunction;

/// `|target - result|`, with subgradient `sign(target - result)` (0 when equal).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsoluteError;

impl ErrorFunction for AbsoluteError {
    fn error(target: f64, result: f64) -> f64 {
        (target - result).abs()
    }

    fn error_dir(target: f64, result: f64) -> f64 {
        let diff = target - result;
        if diff > 0.0 { 1.0 } else if diff < 0.0 { -1.0 } else { 0.0 }
    }
}
