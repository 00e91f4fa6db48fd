pub mod absolute_error;
pub mod squared_error;

pub use absolute_error::AbsoluteError;
pub use squared_error::SquaredError;

/// A stateless per-output training objective.
///
/// `error_dir` is the *negative* gradient of `error` with respect to `result`
/// (i.e. it points from the result towards the target). Weight updates add
/// `learning_rate * delta * input`, so the sign must stay this way round.
pub trait ErrorFunction {
    fn error(target: f64, result: f64) -> f64;
    fn error_dir(target: f64, result: f64) -> f64;
}

/// Sums `E::error` over a whole output layer.
pub fn total_error<E: ErrorFunction>(target: &[f64], result: &[f64]) -> f64 {
    target.iter().zip(result.iter())
        .map(|(&t, &r)| E::error(t, r))
        .sum()
}
