use serde::{Serialize, Deserialize};

/// Per-epoch statistics emitted by `train_loop`.
///
/// When `TrainConfig::progress_tx` is set, one value is sent at the end of
/// every completed epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean per-example error over the epoch, measured on each example's
    /// forward pass just before its weight update.
    pub mean_loss: f64,
    /// Wall-clock duration of this epoch in milliseconds.
    pub elapsed_ms: u64,
}
