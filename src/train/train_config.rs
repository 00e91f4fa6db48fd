use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`      : number of full passes over the examples
/// - `log_every`   : emit an `info!` line every this many epochs; `0` disables it
/// - `progress_tx` : optional channel; one `EpochStats` is sent per completed
///                   epoch. Dropping the receiver ends training early.
/// - `stop_flag`   : optional flag; when set to `true` from another thread the
///                   loop stops after the current epoch.
pub struct TrainConfig {
    pub epochs: usize,
    pub log_every: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel, no stop flag
    /// and no periodic logging.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            log_every: 0,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }
}
