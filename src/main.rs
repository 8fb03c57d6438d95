use grad_light::data::{accuracy, generate_disc_set};
use grad_light::error::GradError;
use grad_light::nn::{Linear, Module, MseLoss, ReLU, Sequential, Sigmoid};
use grad_light::optim::sgd::sgd_step;

use itertools::izip;
use ndarray::{s, Array2};
use rand::prelude::*;

fn main() -> Result<(), GradError> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);

    let (train_input, train_target) = generate_disc_set::<f32, _>(1000, &mut rng);
    let (test_input, test_target) = generate_disc_set::<f32, _>(1000, &mut rng);

    let mut model = Sequential::new(vec![
        Box::new(Linear::new(2, 25, &mut rng)) as Box<dyn Module<f32>>,
        Box::new(ReLU::new()),
        Box::new(Linear::new(25, 25, &mut rng)),
        Box::new(ReLU::new()),
        Box::new(Linear::new(25, 25, &mut rng)),
        Box::new(ReLU::new()),
        Box::new(Linear::new(25, 25, &mut rng)),
        Box::new(ReLU::new()),
        Box::new(Linear::new(25, 2, &mut rng)),
        Box::new(Sigmoid::new()),
    ]);
    let mut criterion = MseLoss::new();

    let batch_size = 10;
    let epochs = 200;
    let learning_rate = 0.5;

    let samples = train_input.nrows();
    let batch_starts: Vec<usize> = (0..samples).step_by(batch_size).collect();
    for epoch in 0..epochs {
        let mut epoch_loss = 0.0;
        for &start in &batch_starts {
            let input: Array2<f32> = train_input
                .slice(s![start..start + batch_size, ..])
                .to_owned();
            let target: Array2<f32> = train_target
                .slice(s![start..start + batch_size, ..])
                .to_owned();

            let output = model.forward(&input)?;
            let loss = criterion.forward(&output, &target)?;
            model.zero_grad();
            let seed = criterion.backward()?;
            model.backward_step(&seed)?;
            sgd_step(&mut model, learning_rate);

            epoch_loss += loss;
        }

        if epoch % 10 == 0 {
            let output = model.forward(&test_input)?;
            let val_loss = criterion.forward(&output, &test_target)?;
            println!(
                "epoch {epoch}: train loss {:.4e}, val loss {:.4e}, val acc {:.2}",
                epoch_loss / batch_starts.len() as f32,
                val_loss,
                accuracy(&output, &test_target),
            );
        }
    }

    let output = model.forward(&test_input)?;
    let test_loss = criterion.forward(&output, &test_target)?;
    let test_accuracy = accuracy(&output, &test_target);
    println!("final test loss {test_loss:.4e}, accuracy {test_accuracy:.2}");

    for (point, prediction, target) in
        izip!(test_input.rows(), output.rows(), test_target.rows()).take(5)
    {
        println!(
            "  ({:.2}, {:.2}) -> [{:.2}, {:.2}] (target [{:.0}, {:.0}])",
            point[0], point[1], prediction[0], prediction[1], target[0], target[1],
        );
    }

    Ok(())
}
