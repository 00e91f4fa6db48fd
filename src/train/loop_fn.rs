use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{info, trace};

use crate::activation::Activation;
use crate::loss::ErrorFunction;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::sample::Sample;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs over the `P` stacked examples
/// and returns the mean loss of the **last completed epoch** (`0.0` if no
/// epoch ran).
///
/// Each epoch visits rows `0..P` in order with one online update per row,
/// exactly like [`Network::train_batch`].
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
pub fn train_loop<const I: usize, const H: usize, const O: usize, const P: usize, A, E>(
    network: &mut Network<I, H, O, A, E>,
    inputs: &Matrix<P, I>,
    targets: &Matrix<P, O>,
    config: &TrainConfig,
) -> f64
where
    A: Activation,
    E: ErrorFunction,
{
    let mut last_loss = 0.0;
    let mut completed = 0;

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            break;
        }

        let t_start = Instant::now();
        let mean_loss = run_one_epoch(
            network,
            inputs.rows_iter().zip(targets.rows_iter()),
            P,
        );
        last_loss = mean_loss;
        completed = epoch;

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            mean_loss,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        trace!("epoch {}/{}: mean loss {:.6}", epoch, config.epochs, mean_loss);
        if config.log_every > 0 && epoch % config.log_every == 0 {
            info!("epoch {}/{}: mean loss {:.6}", epoch, config.epochs, mean_loss);
        }

        if let Some(ref tx) = config.progress_tx {
            // Receiver gone: nobody is listening, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    info!(
        "training finished after {}/{} epochs, last mean loss {:.6}",
        completed, config.epochs, last_loss
    );
    last_loss
}

/// One online pass over `samples` in slice order. Returns the mean loss.
pub fn train_samples<const I: usize, const H: usize, const O: usize, A, E>(
    network: &mut Network<I, H, O, A, E>,
    samples: &[Sample<I, O>],
) -> f64
where
    A: Activation,
    E: ErrorFunction,
{
    run_one_epoch(
        network,
        samples.iter().map(|s| (&s.input, &s.target)),
        samples.len(),
    )
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Forward pass, loss, backprop for every example. Returns the mean loss.
fn run_one_epoch<'a, const I: usize, const H: usize, const O: usize, A, E, It>(
    network: &mut Network<I, H, O, A, E>,
    examples: It,
    count: usize,
) -> f64
where
    A: Activation,
    E: ErrorFunction,
    It: Iterator<Item = (&'a [f64; I], &'a [f64; O])>,
{
    if count == 0 {
        return 0.0;
    }

    let mut total_loss = 0.0;
    for (input, target) in examples {
        network.calculate_activation(input);
        total_loss += network.loss(target);
        network.backprop(target);
    }
    total_loss / count as f64
}

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}
