use std::cell::RefCell;

use ferrite_mlp::{
    train_loop, Activation, Logistic, Matrix, Network, NetworkConfig, Sample, SquaredError,
    TrainConfig,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_input<const N: usize>(rng: &mut ChaCha8Rng) -> [f64; N] {
    let mut v = [0.0; N];
    for x in &mut v {
        *x = rng.gen_range(-1.0..1.0);
    }
    v
}

#[test]
fn predict_is_deterministic_for_fixed_weights() {
    let mut net: Network<3, 4, 2> = Network::default();
    net.randomize_seeded(21);

    let first = net.predict(&[0.2, -0.7, 1.0]);
    // A different example in between must not leak into the next prediction.
    net.predict(&[5.0, 5.0, 5.0]);
    let second = net.predict(&[0.2, -0.7, 1.0]);
    assert_eq!(first, second);
}

#[test]
fn logistic_outputs_stay_in_open_unit_interval() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut net: Network<10, 5, 3> = Network::default();

    for _ in 0..50 {
        net.randomize_with(&mut rng, 1.0);
        let input = random_input::<10>(&mut rng);
        for out in net.predict(&input) {
            assert!(out > 0.0 && out < 1.0, "output {out} escaped (0, 1)");
        }
    }
}

#[test]
fn repeated_training_on_one_example_cuts_loss_below_one_percent() {
    let input = [0.5, -0.3, 0.8];
    let target = [0.9, 0.1];

    for seed in [0, 1, 2] {
        let mut net: Network<3, 4, 2> = Network::default();
        net.randomize_seeded(seed);

        net.calculate_activation(&input);
        let initial = net.loss(&target);
        for _ in 0..200 {
            net.train(&input, &target);
        }
        net.calculate_activation(&input);
        let last = net.loss(&target);

        assert!(
            last < 0.01 * initial,
            "seed {seed}: loss went from {initial} to {last}"
        );
    }
}

#[test]
fn learns_xor_with_a_constant_bias_input() {
    // The model has no bias terms, so the third input is pinned to 1.0.
    let inputs: Matrix<4, 3> = Matrix::from_array([
        [0.0, 0.0, 1.0],
        [0.0, 1.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
    ]);
    let targets: Matrix<4, 1> = Matrix::from_array([[0.0], [1.0], [1.0], [0.0]]);

    let config = NetworkConfig::default().with_seed(42);
    let mut net: Network<3, 12, 1> = Network::from_config(&config).unwrap();
    train_loop(&mut net, &inputs, &targets, &TrainConfig::new(6000));

    for (input, target) in inputs.rows_iter().zip(targets.rows_iter()) {
        let out = net.predict(input)[0];
        assert!(
            (out - target[0]).abs() < 0.1,
            "{input:?} -> {out}, expected {}",
            target[0]
        );
    }
}

fn assert_shapes<const I: usize, const H: usize, const O: usize>() {
    let net: Network<I, H, O> = Network::default();
    let wih = net.weights_input_to_hidden();
    let who = net.weights_hidden_to_output();

    assert_eq!(wih.len(), I * H);
    assert_eq!(wih.as_flat().len(), I * H);
    assert_eq!((wih.rows(), wih.cols()), (I, H));
    assert_eq!(who.len(), H * O);
    assert_eq!(who.as_flat().len(), H * O);
    assert_eq!((who.rows(), who.cols()), (H, O));

    let addressable = (0..I).flat_map(|x| (0..H).map(move |y| (x, y)))
        .filter(|&(x, y)| wih.get(x, y).is_some())
        .count();
    assert_eq!(addressable, I * H);
    assert!(wih.get(I, 0).is_none());
    assert!(who.get(0, O).is_none());

    assert_eq!(net.activation_input().len(), I);
    assert_eq!(net.activation_hidden().len(), H);
    assert_eq!(net.activation_output().len(), O);
}

#[test]
fn weight_matrices_have_layer_product_shapes() {
    assert_shapes::<3, 4, 2>();
    assert_shapes::<1, 1, 1>();
    assert_shapes::<10, 5, 3>();
}

#[test]
fn train_batch_equals_sequential_single_training() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut inputs = Matrix::<6, 3>::zeros();
    let mut targets = Matrix::<6, 2>::zeros();
    inputs.fill_with((0..18).map(|_| rng.gen_range(-1.0..1.0)));
    targets.fill_with((0..12).map(|_| rng.gen_range(0.0..1.0)));

    let mut batched: Network<3, 4, 2> = Network::default();
    batched.randomize_seeded(77);
    let mut looped = batched.clone();

    batched.train_batch(&inputs, &targets);
    for p in 0..6 {
        looped.train(inputs.row(p), targets.row(p));
    }

    assert_eq!(batched.weights_input_to_hidden(), looped.weights_input_to_hidden());
    assert_eq!(batched.weights_hidden_to_output(), looped.weights_hidden_to_output());
}

#[test]
fn randomize_draws_fresh_weights_unless_seeded() {
    let mut net: Network<4, 4, 2> = Network::default();
    net.randomize();
    let first = *net.weights_input_to_hidden();
    net.randomize();
    assert_ne!(&first, net.weights_input_to_hidden());

    net.randomize_seeded(3);
    let seeded = (*net.weights_input_to_hidden(), *net.weights_hidden_to_output());
    net.randomize();
    net.randomize_seeded(3);
    assert_eq!(seeded, (*net.weights_input_to_hidden(), *net.weights_hidden_to_output()));
}

thread_local! {
    static DERIVATIVE_ARGS: RefCell<Vec<f64>> = const { RefCell::new(Vec::new()) };
}

/// Logistic that records every argument handed to its derivative.
struct RecordingLogistic;

impl Activation for RecordingLogistic {
    fn activation(k: f64) -> f64 {
        Logistic::activation(k)
    }

    fn activation_dir(k: f64) -> f64 {
        DERIVATIVE_ARGS.with(|args| args.borrow_mut().push(k));
        Logistic::activation_dir(k)
    }
}

#[test]
fn derivative_is_fed_forward_outputs_not_weighted_sums() {
    let mut net: Network<2, 3, 2, RecordingLogistic, SquaredError> = Network::new(0.8);
    net.randomize_seeded(5);
    net.calculate_activation(&[0.9, -0.4]);

    DERIVATIVE_ARGS.with(|args| args.borrow_mut().clear());
    net.backprop(&[1.0, 0.0]);
    let recorded = DERIVATIVE_ARGS.with(|args| args.borrow().clone());

    let mut expected = net.activation_output().to_vec();
    expected.extend_from_slice(net.activation_hidden());
    assert_eq!(recorded, expected);
}

#[test]
fn one_network_per_worker_matches_serial_training() {
    let samples: Vec<Sample<2, 1>> = [
        (vec![0.0, 1.0], vec![1.0]),
        (vec![1.0, 0.0], vec![1.0]),
        (vec![1.0, 1.0], vec![0.0]),
    ]
    .iter()
    .map(|(i, t)| Sample::try_from_slices(i, t).unwrap())
    .collect();

    let train = |seed: u64| {
        let mut net: Network<2, 3, 1> = Network::default();
        net.randomize_seeded(seed);
        for _ in 0..100 {
            ferrite_mlp::train_samples(&mut net, &samples);
        }
        *net.weights_hidden_to_output()
    };

    let serial: Vec<_> = (0..4).map(train).collect();
    let parallel: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|seed| s.spawn(move || train(seed))).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(serial, parallel);
}
