use thiserror::Error;

/// Raised when dynamically sized data does not fit a fixed-size buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("shape mismatch: expected {expected_rows}x{expected_cols}, got {actual_rows}x{actual_cols}")]
pub struct ShapeError {
    pub expected_rows: usize,
    pub expected_cols: usize,
    pub actual_rows: usize,
    pub actual_cols: usize,
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("learning rate must be finite and positive, got {0}")]
    InvalidLearningRate(f64),

    #[error("initial weight standard deviation must be finite and non-negative, got {0}")]
    InvalidStdDev(f64),

    #[error("invalid network configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetworkError>;
