use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

pub const DEFAULT_LEARNING_RATE: f64 = 0.8;
pub const DEFAULT_INIT_STD_DEV: f64 = 0.1;

/// Construction-time settings for a [`Network`](crate::Network).
///
/// Every field has a default, so a partial JSON document such as
/// `{"seed": 42}` is a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Step size applied to every weight update.
    pub learning_rate: f64,
    /// Standard deviation of the zero-mean normal used to initialise weights.
    pub init_std_dev: f64,
    /// Seed for weight initialisation. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl NetworkConfig {
    pub fn new(learning_rate: f64) -> Self {
        NetworkConfig { learning_rate, ..NetworkConfig::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses and validates an in-memory JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: NetworkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(NetworkError::InvalidLearningRate(self.learning_rate));
        }
        if !self.init_std_dev.is_finite() || self.init_std_dev < 0.0 {
            return Err(NetworkError::InvalidStdDev(self.init_std_dev));
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            learning_rate: DEFAULT_LEARNING_RATE,
            init_std_dev: DEFAULT_INIT_STD_DEV,
            seed: None,
        }
    }
}
