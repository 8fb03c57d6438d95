use thiserror::Error;

/// Errors raised by the forward/backward machinery.
///
/// Both variants are precondition violations: they abort the current pass and
/// leave parameter state untouched, so a caller can recover by re-running a
/// forward pass with corrected inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradError {
    #[error("{module}: expected input of shape {expected:?}, got {got:?}")]
    ShapeMismatch {
        module: &'static str,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// `backward_step` was called without a matching `forward`: either none
    /// ever ran, or the recorded state was already consumed by an earlier
    /// backward pass.
    #[error("{module}: backward_step called without a matching forward")]
    StaleBackward { module: &'static str },
}
