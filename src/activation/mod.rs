pub mod logistic;
pub mod tanh;

pub use logistic::Logistic;
pub use tanh::Tanh;

/// A stateless nonlinearity applied element-wise to a layer's weighted sums.
///
/// `activation_dir` is the derivative expressed in terms of the activation's
/// own output: callers pass `k = activation(z)`, never the pre-activation `z`.
/// Backpropagation only keeps the forward outputs, so every implementation
/// must honour this convention.
pub trait Activation {
    fn activation(k: f64) -> f64;
    fn activation_dir(k: f64) -> f64;
}
