use ndarray::Array2;

use crate::error::GradError;
use crate::nn::Parameter;
use crate::numeric::Numeric;

pub(crate) mod private {
    pub trait Private {}
}

/// A unit of differentiable computation.
///
/// The trait is sealed: the set of module kinds (Linear, the activations,
/// Sequential) is fixed, and the backward pass relies on every implementor
/// caching its own derivative state during `forward`.
///
/// `backward_step` consumes the state recorded by the most recent `forward`.
/// Calling it with no recorded state (no forward yet, or two backward calls
/// in a row) fails with [`GradError::StaleBackward`] rather than silently
/// reusing stale gradients.
pub trait Module<T: Numeric>: private::Private {
    /// Runs the module on a `(batch, features)` input, recording whatever
    /// local state the backward pass will need.
    fn forward(&mut self, input: &Array2<T>) -> Result<Array2<T>, GradError>;

    /// Maps the gradient w.r.t. the recorded output to the gradient w.r.t.
    /// the recorded input, accumulating parameter gradients along the way.
    fn backward_step(&mut self, grad_output: &Array2<T>) -> Result<Array2<T>, GradError>;

    /// All learnable parameters, in a stable order: weights before bias,
    /// layers in chain order. The same order is used for zeroing, updates
    /// and serialization.
    fn parameters(&mut self) -> Vec<&mut Parameter<T>> {
        Vec::new()
    }

    /// Zeroes every parameter's gradient accumulator, allocating any that
    /// have not been touched yet.
    fn zero_grad(&mut self) {
        for param in self.parameters() {
            param.zero_grad();
        }
    }

    /// Short module name used in error reporting.
    fn name(&self) -> &'static str;
}
