use super::Activation;

/// Hyperbolic tangent. Output range is (-1, 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tanh;

impl Activation for Tanh {
    fn activation(k: f64) -> f64 {
        k.tanh()
    }

    fn activation_dir(k: f64) -> f64 {
        1.0 - k * k
    }
}
