use log::debug;

use crate::nn::Module;
use crate::numeric::Numeric;

/// One plain gradient-descent step: `value -= learning_rate * grad` for every
/// parameter with an accumulated gradient. Parameters whose accumulator has
/// never been touched are skipped.
pub fn sgd_step<T: Numeric>(module: &mut dyn Module<T>, learning_rate: T) {
    assert!(learning_rate > T::zero(), "learning rate must be positive");
    for (index, param) in module.parameters().into_iter().enumerate() {
        let update = param.grad().map(|grad| grad.mapv(|v| v * learning_rate));
        match update {
            Some(update) => param.value -= &update,
            None => debug!("sgd_step: parameter {index} has no gradient, skipping"),
        }
    }
}
