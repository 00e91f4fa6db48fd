use ferrite_mlp::{train_loop, Matrix, Network, NetworkConfig, TrainConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Third input is a constant 1.0 so the hidden layer can learn offsets.
    let inputs: Matrix<4, 3> = Matrix::from_rows(&[
        vec![1.0, 0.0, 1.0],
        vec![1.0, 1.0, 1.0],
        vec![0.0, 1.0, 1.0],
        vec![0.0, 0.0, 1.0],
    ])?;
    let expected_outputs: Matrix<4, 1> = Matrix::from_rows(&[
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ])?;

    let mut network: Network<3, 12, 1> = Network::from_config(&NetworkConfig::new(0.8).with_seed(7))?;

    let epochs = 6000;
    let report_every = 1000;
    for chunk in 1..=epochs / report_every {
        let loss = train_loop(
            &mut network,
            &inputs,
            &expected_outputs,
            &TrainConfig::new(report_every),
        );
        println!("Epoch {}: loss = {loss:.6}", chunk * report_every);
    }

    for input in inputs.rows_iter() {
        println!("Input: {:?} -> Output: {:.4}", input, network.predict(input)[0]);
    }
    Ok(())
}
