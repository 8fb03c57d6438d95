use ndarray::Array2;

use crate::error::GradError;
use crate::numeric::Numeric;

/// Mean-squared-error loss and the entry point of the backward pass.
///
/// `forward` returns the squared error averaged over batch and feature
/// dimensions jointly; `backward` hands back the raw `prediction - target`
/// error as the seed gradient for the chain.
///
/// Scaling convention: the seed gradient deliberately omits both the factor
/// 2 from d(e²)/de and the 1/N of the mean reduction. Downstream, `Linear`
/// averages parameter gradients over the batch, so the accumulated gradients
/// equal the textbook gradients of the mean loss times `out_features / 2`.
/// The constant is absorbed into the learning rate (and is exactly 1 for a
/// two-unit output head, as in the demo classifier).
#[derive(Debug, Default)]
pub struct MseLoss<T>
where
    T: Numeric,
{
    error: Option<Array2<T>>,
}

impl<T: Numeric> MseLoss<T> {
    pub fn new() -> Self {
        MseLoss { error: None }
    }

    /// Computes the scalar loss and records the error tensor for `backward`.
    pub fn forward(&mut self, prediction: &Array2<T>, target: &Array2<T>) -> Result<T, GradError> {
        if prediction.dim() != target.dim() {
            return Err(GradError::ShapeMismatch {
                module: "MseLoss",
                expected: target.shape().to_vec(),
                got: prediction.shape().to_vec(),
            });
        }
        let error = prediction - target;
        let loss = error.mapv(|v| v * v).mean().unwrap_or_else(T::zero);
        self.error = Some(error);
        Ok(loss)
    }

    /// Takes the recorded error and returns it as the seed gradient.
    pub fn backward(&mut self) -> Result<Array2<T>, GradError> {
        self.error
            .take()
            .ok_or(GradError::StaleBackward { module: "MseLoss" })
    }
}
