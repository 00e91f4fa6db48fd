pub mod error;
pub mod math;
pub mod activation;
pub mod loss;
pub mod network;
pub mod train;

// Convenience re-exports
pub use error::{NetworkError, ShapeError};
pub use math::matrix::Matrix;
pub use activation::{Activation, Logistic, Tanh};
pub use loss::{AbsoluteError, ErrorFunction, SquaredError};
pub use network::{Network, NetworkConfig};
pub use train::{train_loop, train_samples, EpochStats, Sample, TrainConfig};
