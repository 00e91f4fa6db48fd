pub mod epoch_stats;
pub mod loop_fn;
pub mod sample;
pub mod train_config;

pub use epoch_stats::EpochStats;
pub use loop_fn::{train_loop, train_samples};
pub use sample::Sample;
pub use train_config::TrainConfig;
