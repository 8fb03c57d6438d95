use grad_light::data::{accuracy, generate_disc_set};
use grad_light::nn::{Linear, Module, MseLoss, ReLU, Sequential, Sigmoid};
use grad_light::optim::sgd_step;
use ndarray::{s, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Trains the point-in-disk classifier end to end and checks that it
/// actually learns the decision boundary.
#[test]
fn test_disc_classifier_reaches_90_percent_accuracy() {
    let mut rng = StdRng::seed_from_u64(42);
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
    let learning_rate = 0.5;
    for _epoch in 0..200 {
        for start in (0..train_input.nrows()).step_by(batch_size) {
            let input: Array2<f32> = train_input
                .slice(s![start..start + batch_size, ..])
                .to_owned();
            let target: Array2<f32> = train_target
                .slice(s![start..start + batch_size, ..])
                .to_owned();

            let output = model.forward(&input).unwrap();
            criterion.forward(&output, &target).unwrap();
            model.zero_grad();
            let seed = criterion.backward().unwrap();
            model.backward_step(&seed).unwrap();
            sgd_step(&mut model, learning_rate);
        }
    }

    let output = model.forward(&test_input).unwrap();
    let test_accuracy = accuracy(&output, &test_target);
    assert!(
        test_accuracy > 0.9,
        "test accuracy {test_accuracy} did not clear 0.9"
    );
}

/// Training must also move the loss itself, not just the argmax.
#[test]
fn test_short_training_run_reduces_loss() {
    let mut rng = StdRng::seed_from_u64(7);
    let (train_input, train_target) = generate_disc_set::<f32, _>(200, &mut rng);

    let mut model = Sequential::new(vec![
        Box::new(Linear::new(2, 25, &mut rng)) as Box<dyn Module<f32>>,
        Box::new(ReLU::new()),
        Box::new(Linear::new(25, 2, &mut rng)),
        Box::new(Sigmoid::new()),
    ]);
    let mut criterion = MseLoss::new();

    let initial_output = model.forward(&train_input).unwrap();
    let initial_loss = criterion.forward(&initial_output, &train_target).unwrap();

    for _epoch in 0..50 {
        let output = model.forward(&train_input).unwrap();
        criterion.forward(&output, &train_target).unwrap();
        model.zero_grad();
        let seed = criterion.backward().unwrap();
        model.backward_step(&seed).unwrap();
        sgd_step(&mut model, 0.2);
    }

    let final_output = model.forward(&train_input).unwrap();
    let final_loss = criterion.forward(&final_output, &train_target).unwrap();
    assert!(
        final_loss < initial_loss,
        "loss went from {initial_loss} to {final_loss}"
    );
}
