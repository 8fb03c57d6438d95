use ndarray::Array2;

use crate::error::GradError;
use crate::nn::Module;
use crate::numeric::Numeric;

// All three activations are elementwise and parameter-free: forward caches
// the local derivative evaluated at the input, backward multiplies it into
// the incoming gradient. The cache is taken, so each forward pays for exactly
// one backward.
fn elementwise_backward<T: Numeric>(
    module: &'static str,
    local_grad: &mut Option<Array2<T>>,
    grad_output: &Array2<T>,
) -> Result<Array2<T>, GradError> {
    let local = local_grad
        .take()
        .ok_or(GradError::StaleBackward { module })?;
    if grad_output.dim() != local.dim() {
        return Err(GradError::ShapeMismatch {
            module,
            expected: local.shape().to_vec(),
            got: grad_output.shape().to_vec(),
        });
    }
    Ok(grad_output * &local)
}

/// `slope · max(x, 0)`, derivative `slope` where `x > 0` and `0` elsewhere.
pub struct ReLU<T>
where
    T: Numeric,
{
    slope: T,
    local_grad: Option<Array2<T>>,
}

impl<T: Numeric> ReLU<T> {
    pub fn new() -> Self {
        ReLU::with_slope(T::one())
    }

    pub fn with_slope(slope: T) -> Self {
        assert!(slope > T::zero(), "slope must be positive");
        ReLU { slope, local_grad: None }
    }
}

impl<T: Numeric> Default for ReLU<T> {
    fn default() -> Self {
        ReLU::new()
    }
}

impl<T: Numeric> crate::nn::module::private::Private for ReLU<T> {}

impl<T: Numeric> Module<T> for ReLU<T> {
    fn forward(&mut self, input: &Array2<T>) -> Result<Array2<T>, GradError> {
        let zero = T::zero();
        let slope = self.slope;
        self.local_grad = Some(input.mapv(|v| if v > zero { slope } else { zero }));
        Ok(input.mapv(|v| slope * v.max(zero)))
    }

    fn backward_step(&mut self, grad_output: &Array2<T>) -> Result<Array2<T>, GradError> {
        elementwise_backward(self.name(), &mut self.local_grad, grad_output)
    }

    fn name(&self) -> &'static str {
        "ReLU"
    }
}

/// `1 / (1 + e^{-x})`, derivative `s · (1 - s)` with `s` the forward output.
pub struct Sigmoid<T>
where
    T: Numeric,
{
    local_grad: Option<Array2<T>>,
}

impl<T: Numeric> Sigmoid<T> {
    pub fn new() -> Self {
        Sigmoid { local_grad: None }
    }
}

impl<T: Numeric> Default for Sigmoid<T> {
    fn default() -> Self {
        Sigmoid::new()
    }
}

impl<T: Numeric> crate::nn::module::private::Private for Sigmoid<T> {}

impl<T: Numeric> Module<T> for Sigmoid<T> {
    fn forward(&mut self, input: &Array2<T>) -> Result<Array2<T>, GradError> {
        let one = T::one();
        let output = input.mapv(|v| one / (one + (-v).exp()));
        self.local_grad = Some(output.mapv(|s| s * (one - s)));
        Ok(output)
    }

    fn backward_step(&mut self, grad_output: &Array2<T>) -> Result<Array2<T>, GradError> {
        elementwise_backward(self.name(), &mut self.local_grad, grad_output)
    }

    fn name(&self) -> &'static str {
        "Sigmoid"
    }
}

/// `tanh(x)`, derivative `1 / cosh(x)²`.
pub struct Tanh<T>
where
    T: Numeric,
{
    local_grad: Option<Array2<T>>,
}

impl<T: Numeric> Tanh<T> {
    pub fn new() -> Self {
        Tanh { local_grad: None }
    }
}

impl<T: Numeric> Default for Tanh<T> {
    fn default() -> Self {
        Tanh::new()
    }
}

impl<T: Numeric> crate::nn::module::private::Private for Tanh<T> {}

impl<T: Numeric> Module<T> for Tanh<T> {
    fn forward(&mut self, input: &Array2<T>) -> Result<Array2<T>, GradError> {
        let one = T::one();
        self.local_grad = Some(input.mapv(|v| (one / v.cosh()).powi(2)));
        Ok(input.mapv(|v| v.tanh()))
    }

    fn backward_step(&mut self, grad_output: &Array2<T>) -> Result<Array2<T>, GradError> {
        elementwise_backward(self.name(), &mut self.local_grad, grad_output)
    }

    fn name(&self) -> &'static str {
        "Tanh"
    }
}
