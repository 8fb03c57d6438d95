use ndarray::{Array2, Axis};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::GradError;
use crate::nn::{Module, Parameter};
use crate::numeric::{cast, Numeric};

/// Affine transform `y = x · Wᵀ + b` over a batched input.
///
/// Weights have shape `(out_features, in_features)`; the bias is kept as a
/// `(1, out_features)` row so it broadcasts over the batch dimension.
pub struct Linear<T>
where
    T: Numeric,
{
    pub weights: Parameter<T>,
    pub bias: Parameter<T>,
    input: Option<Array2<T>>,
}

impl<T> Linear<T>
where
    T: Numeric,
{
    /// Fan-in initialization: every entry drawn uniformly from `[-k, k]`
    /// with `k = sqrt(1/in_features)`, using the caller's RNG so runs are
    /// reproducible under a fixed seed.
    pub fn new<R: Rng>(in_features: usize, out_features: usize, rng: &mut R) -> Self {
        let k = (T::one() / cast::<T>(in_features)).sqrt();
        let dist = Uniform::new(-k, k);
        let weights = Array2::from_shape_fn((out_features, in_features), |_| dist.sample(rng));
        let bias = Array2::from_shape_fn((1, out_features), |_| dist.sample(rng));
        Linear::from_parts(weights, bias)
    }

    /// Builds a layer from explicit weight and bias tensors.
    pub fn from_parts(weights: Array2<T>, bias: Array2<T>) -> Self {
        assert_eq!(bias.dim(), (1, weights.nrows()), "bias must be a (1, out_features) row");
        Linear {
            weights: Parameter::new(weights),
            bias: Parameter::new(bias),
            input: None,
        }
    }

    pub fn in_features(&self) -> usize {
        self.weights.value.ncols()
    }

    pub fn out_features(&self) -> usize {
        self.weights.value.nrows()
    }
}

impl<T: Numeric> crate::nn::module::private::Private for Linear<T> {}

impl<T: Numeric> Module<T> for Linear<T> {
    fn forward(&mut self, input: &Array2<T>) -> Result<Array2<T>, GradError> {
        if input.ncols() != self.in_features() {
            return Err(GradError::ShapeMismatch {
                module: self.name(),
                expected: vec![input.nrows(), self.in_features()],
                got: input.shape().to_vec(),
            });
        }
        let output = input.dot(&self.weights.value.t()) + &self.bias.value;
        self.input = Some(input.clone());
        Ok(output)
    }

    fn backward_step(&mut self, grad_output: &Array2<T>) -> Result<Array2<T>, GradError> {
        let input = self
            .input
            .take()
            .ok_or(GradError::StaleBackward { module: self.name() })?;
        let batch = input.nrows();
        if grad_output.dim() != (batch, self.out_features()) {
            return Err(GradError::ShapeMismatch {
                module: self.name(),
                expected: vec![batch, self.out_features()],
                got: grad_output.shape().to_vec(),
            });
        }

        let grad_input = grad_output.dot(&self.weights.value);

        // Parameter gradients are averaged over the batch: the summed outer
        // products gᵀ·x for the weights, the summed rows of g for the bias.
        let scale = T::one() / cast::<T>(batch);
        let grad_weights = grad_output.t().dot(&input).mapv(|v| v * scale);
        let grad_bias = grad_output
            .sum_axis(Axis(0))
            .mapv(|v| v * scale)
            .insert_axis(Axis(0));
        self.weights.accumulate(&grad_weights);
        self.bias.accumulate(&grad_bias);

        Ok(grad_input)
    }

    fn parameters(&mut self) -> Vec<&mut Parameter<T>> {
        vec![&mut self.weights, &mut self.bias]
    }

    fn name(&self) -> &'static str {
        "Linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;

    #[test]
    fn test_forward_values() {
        let mut layer = Linear::from_parts(
            array![[1.0_f32, -2.0], [-1.5, 0.5]],
            array![[1.0_f32, 1.0]],
        );
        let input = array![[1.0_f32, 2.0]];
        let output = layer.forward(&input).unwrap();
        assert_eq!(output, array![[-2.0_f32, 0.5]]);
    }

    #[test]
    fn test_forward_feature_mismatch() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let mut layer = Linear::<f32>::new(3, 2, &mut rng);
        let input = Array2::zeros((4, 5));
        let err = layer.forward(&input).unwrap_err();
        assert_eq!(
            err,
            GradError::ShapeMismatch {
                module: "Linear",
                expected: vec![4, 3],
                got: vec![4, 5],
            }
        );
    }

    #[test]
    fn test_backward_values() {
        // Single sample, identity-free numbers small enough to check by hand.
        let mut layer = Linear::from_parts(
            array![[1.0_f64, 2.0], [3.0, 4.0], [5.0, 6.0]],
            array![[0.0_f64, 0.0, 0.0]],
        );
        let input = array![[1.0_f64, -1.0]];
        layer.forward(&input).unwrap();

        let grad_output = array![[1.0_f64, 0.0, -1.0]];
        let grad_input = layer.backward_step(&grad_output).unwrap();
        // g · W = [1*1 + 0*3 - 1*5, 1*2 + 0*4 - 1*6]
        assert_eq!(grad_input, array![[-4.0_f64, -4.0]]);
        assert_eq!(
            layer.weights.grad().unwrap(),
            &array![[1.0_f64, -1.0], [0.0, 0.0], [-1.0, 1.0]]
        );
        assert_eq!(layer.bias.grad().unwrap(), &array![[1.0_f64, 0.0, -1.0]]);
    }

    #[test]
    fn test_backward_without_forward() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let mut layer = Linear::<f32>::new(2, 2, &mut rng);
        let grad = Array2::zeros((1, 2));
        assert_eq!(
            layer.backward_step(&grad).unwrap_err(),
            GradError::StaleBackward { module: "Linear" }
        );
    }

    #[test]
    fn test_double_backward_is_stale() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let mut layer = Linear::<f32>::new(2, 2, &mut rng);
        let input = Array2::ones((3, 2));
        layer.forward(&input).unwrap();
        let grad = Array2::ones((3, 2));
        layer.backward_step(&grad).unwrap();
        assert_eq!(
            layer.backward_step(&grad).unwrap_err(),
            GradError::StaleBackward { module: "Linear" }
        );
    }

    #[test]
    fn test_init_is_reproducible_and_bounded() {
        let mut rng_a = rand::rngs::StdRng::seed_from_u64(7);
        let mut rng_b = rand::rngs::StdRng::seed_from_u64(7);
        let layer_a = Linear::<f64>::new(16, 4, &mut rng_a);
        let layer_b = Linear::<f64>::new(16, 4, &mut rng_b);
        assert_eq!(layer_a.weights.value, layer_b.weights.value);
        assert_eq!(layer_a.bias.value, layer_b.bias.value);

        let k = (1.0_f64 / 16.0).sqrt();
        assert!(layer_a.weights.value.iter().all(|w| w.abs() <= k));
    }
}
