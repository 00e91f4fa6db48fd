use std::f64::consts::E;

use super::Activation;

/// Logistic sigmoid, `1 / (1 + e^-k)`. Not clamped against overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Logistic;

impl Activation for Logistic {
    fn activation(k: f64) -> f64 {
        1.0 / (1.0 + E.powf(-k))
    }

    /// `k` is already the sigmoid output.
    fn activation_dir(k: f64) -> f64 {
        k * (1.0 - k)
    }
}
