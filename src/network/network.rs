use std::fmt;
use std::marker::PhantomData;

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::activation::{Activation, Logistic};
use crate::error::Result;
use crate::loss::{total_error, ErrorFunction, SquaredError};
use crate::math::matrix::Matrix;
use crate::network::config::{NetworkConfig, DEFAULT_INIT_STD_DEV, DEFAULT_LEARNING_RATE};

/// Fully connected `I -> H -> O` network without bias terms.
///
/// Layer sizes are fixed at compile time, so inputs and targets of the wrong
/// length do not type-check. `A` picks the nonlinearity used by both the
/// hidden and output layers, `E` picks the training objective.
///
/// The three activation buffers hold the most recent forward pass and are
/// what [`backprop`](Network::backprop) reads; always run
/// [`calculate_activation`](Network::calculate_activation) on an example
/// before backpropagating its target. Every mutating operation takes
/// `&mut self`, so sharing one network across threads needs a `Mutex` or one
/// network per worker.
pub struct Network<
    const I: usize,
    const H: usize,
    const O: usize,
    A = Logistic,
    E = SquaredError,
> {
    learning_rate: f64,
    weights_input_to_hidden: Matrix<I, H>,
    weights_hidden_to_output: Matrix<H, O>,

    activation_input: [f64; I],
    activation_hidden: [f64; H],
    activation_output: [f64; O],

    policy: PhantomData<fn() -> (A, E)>,
}

impl<const I: usize, const H: usize, const O: usize, A, E> Network<I, H, O, A, E>
where
    A: Activation,
    E: ErrorFunction,
{
    /// Creates a network with all weights zero. Call one of the `randomize`
    /// methods before training; zero weights keep every hidden unit identical.
    pub fn new(learning_rate: f64) -> Self {
        Network {
            learning_rate,
            weights_input_to_hidden: Matrix::zeros(),
            weights_hidden_to_output: Matrix::zeros(),
            activation_input: [0.0; I],
            activation_hidden: [0.0; H],
            activation_output: [0.0; O],
            policy: PhantomData,
        }
    }

    /// Validates `config` and returns a randomized network.
    pub fn from_config(config: &NetworkConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            "building {}-{}-{} network: learning_rate={}, init_std_dev={}, seed={:?}",
            I, H, O, config.learning_rate, config.init_std_dev, config.seed
        );

        let mut network = Network::new(config.learning_rate);
        match config.seed {
            Some(seed) => {
                network.randomize_with(&mut ChaCha8Rng::seed_from_u64(seed), config.init_std_dev)
            }
            None => network.randomize_with(&mut rand::thread_rng(), config.init_std_dev),
        }
        Ok(network)
    }

    /// Draws every weight from N(0, 0.1) using a fresh thread RNG.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng(), DEFAULT_INIT_STD_DEV);
    }

    /// Like [`randomize`](Network::randomize) but reproducible: equal seeds give equal weights.
    pub fn randomize_seeded(&mut self, seed: u64) {
        self.randomize_with(&mut ChaCha8Rng::seed_from_u64(seed), DEFAULT_INIT_STD_DEV);
    }

    /// Fills input->hidden weights, then hidden->output weights, each in
    /// row-major order, from N(0, `std_dev`).
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R, std_dev: f64) {
        debug!("randomizing {}-{}-{} weights with std_dev={}", I, H, O, std_dev);
        self.weights_input_to_hidden.fill_normal(rng, 0.0, std_dev);
        self.weights_hidden_to_output.fill_normal(rng, 0.0, std_dev);
    }

    /// Forward pass. Overwrites all three activation buffers and returns the
    /// output layer.
    pub fn calculate_activation(&mut self, input: &[f64; I]) -> &[f64; O] {
        self.activation_input = *input;

        for j in 0..H {
            let mut sum = 0.0;
            for i in 0..I {
                sum += self.activation_input[i] * self.weights_input_to_hidden[(i, j)];
            }
            self.activation_hidden[j] = A::activation(sum);
        }

        for j in 0..O {
            let mut sum = 0.0;
            for i in 0..H {
                sum += self.activation_hidden[i] * self.weights_hidden_to_output[(i, j)];
            }
            self.activation_output[j] = A::activation(sum);
        }

        &self.activation_output
    }

    /// Backward pass against `target`, using the buffers left by the last
    /// forward pass.
    ///
    /// Both delta vectors are computed from the current weights before any
    /// weight changes, so the hidden deltas never see a half-updated
    /// hidden->output matrix.
    pub fn backprop(&mut self, target: &[f64; O]) {
        let mut output_deltas = [0.0; O];
        for (i, delta) in output_deltas.iter_mut().enumerate() {
            let out = self.activation_output[i];
            *delta = E::error_dir(target[i], out) * A::activation_dir(out);
        }

        let mut hidden_deltas = [0.0; H];
        for (i, delta) in hidden_deltas.iter_mut().enumerate() {
            let mut error_sum = 0.0;
            for (k, &out_delta) in output_deltas.iter().enumerate() {
                error_sum += out_delta * self.weights_hidden_to_output[(i, k)];
            }
            *delta = error_sum * A::activation_dir(self.activation_hidden[i]);
        }

        let lr = self.learning_rate;
        for k in 0..H {
            for i in 0..O {
                self.weights_hidden_to_output[(k, i)] +=
                    lr * output_deltas[i] * self.activation_hidden[k];
            }
        }

        for k in 0..I {
            for i in 0..H {
                self.weights_input_to_hidden[(k, i)] +=
                    lr * hidden_deltas[i] * self.activation_input[k];
            }
        }
    }

    /// One online update: forward pass on `input`, then backprop against `target`.
    pub fn train(&mut self, input: &[f64; I], target: &[f64; O]) {
        self.calculate_activation(input);
        self.backprop(target);
    }

    /// Trains on each row pair in index order `0..P`, one online update per
    /// example. No shuffling, no averaging.
    pub fn train_batch<const P: usize>(&mut self, inputs: &Matrix<P, I>, targets: &Matrix<P, O>) {
        for (input, target) in inputs.rows_iter().zip(targets.rows_iter()) {
            self.train(input, target);
        }
    }

    /// Runs the forward pass and returns a copy of the output layer. Weights
    /// are left untouched.
    pub fn predict(&mut self, input: &[f64; I]) -> [f64; O] {
        *self.calculate_activation(input)
    }

    /// Error of the current output buffer against `target`, summed over outputs.
    pub fn loss(&self, target: &[f64; O]) -> f64 {
        total_error::<E>(target, &self.activation_output)
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    pub fn weights_input_to_hidden(&self) -> &Matrix<I, H> {
        &self.weights_input_to_hidden
    }

    pub fn weights_input_to_hidden_mut(&mut self) -> &mut Matrix<I, H> {
        &mut self.weights_input_to_hidden
    }

    pub fn weights_hidden_to_output(&self) -> &Matrix<H, O> {
        &self.weights_hidden_to_output
    }

    pub fn weights_hidden_to_output_mut(&mut self) -> &mut Matrix<H, O> {
        &mut self.weights_hidden_to_output
    }

    pub fn activation_input(&self) -> &[f64; I] {
        &self.activation_input
    }

    pub fn activation_hidden(&self) -> &[f64; H] {
        &self.activation_hidden
    }

    pub fn activation_output(&self) -> &[f64; O] {
        &self.activation_output
    }
}

impl<const I: usize, const H: usize, const O: usize, A, E> Default for Network<I, H, O, A, E>
where
    A: Activation,
    E: ErrorFunction,
{
    fn default() -> Self {
        Network::new(DEFAULT_LEARNING_RATE)
    }
}

// Manual impls: derives would demand `A: Clone`/`A: Debug` on the marker types.
impl<const I: usize, const H: usize, const O: usize, A, E> Clone for Network<I, H, O, A, E> {
    fn clone(&self) -> Self {
        Network {
            learning_rate: self.learning_rate,
            weights_input_to_hidden: self.weights_input_to_hidden,
            weights_hidden_to_output: self.weights_hidden_to_output,
            activation_input: self.activation_input,
            activation_hidden: self.activation_hidden,
            activation_output: self.activation_output,
            policy: PhantomData,
        }
    }
}

impl<const I: usize, const H: usize, const O: usize, A, E> fmt::Debug for Network<I, H, O, A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("learning_rate", &self.learning_rate)
            .field("weights_input_to_hidden", &self.weights_input_to_hidden)
            .field("weights_hidden_to_output", &self.weights_hidden_to_output)
            .field("activation_input", &self.activation_input)
            .field("activation_hidden", &self.activation_hidden)
            .field("activation_output", &self.activation_output)
            .finish()
    }
}
