use ndarray::Array2;

use crate::error::GradError;
use crate::nn::{Module, Parameter, Tape};
use crate::numeric::Numeric;

/// An ordered chain of modules composed into one module.
///
/// `forward` threads the input through the chain while recording the
/// application order on a [`Tape`]; `backward_step` unwinds the tape,
/// feeding each module's input gradient to the one before it. The chain
/// structure is opaque to callers, and because a nested `Sequential` is
/// itself a module that returns the gradient w.r.t. its own input, gradient
/// flow continues into an enclosing chain across the nesting boundary.
pub struct Sequential<T>
where
    T: Numeric,
{
    modules: Vec<Box<dyn Module<T>>>,
    tape: Tape,
}

impl<T: Numeric> Sequential<T> {
    pub fn new(modules: Vec<Box<dyn Module<T>>>) -> Self {
        Sequential {
            modules,
            tape: Tape::new(),
        }
    }

    /// Appends a module to the end of the chain. Any recorded forward pass
    /// belongs to the old chain, so the tape is discarded.
    pub fn add(&mut self, module: Box<dyn Module<T>>) {
        self.modules.push(module);
        self.tape.reset();
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<T: Numeric> Default for Sequential<T> {
    fn default() -> Self {
        Sequential::new(Vec::new())
    }
}

impl<T: Numeric> crate::nn::module::private::Private for Sequential<T> {}

impl<T: Numeric> Module<T> for Sequential<T> {
    fn forward(&mut self, input: &Array2<T>) -> Result<Array2<T>, GradError> {
        // The caller's input is the graph root; nothing upstream of it is
        // recorded.
        self.tape.reset();
        let mut output = input.clone();
        for (index, module) in self.modules.iter_mut().enumerate() {
            output = module.forward(&output)?;
            self.tape.record(index);
        }
        Ok(output)
    }

    fn backward_step(&mut self, grad_output: &Array2<T>) -> Result<Array2<T>, GradError> {
        if self.tape.is_empty() {
            return Err(GradError::StaleBackward { module: self.name() });
        }
        let mut grad = grad_output.clone();
        while let Some(index) = self.tape.unwind() {
            grad = self.modules[index].backward_step(&grad)?;
        }
        Ok(grad)
    }

    fn parameters(&mut self) -> Vec<&mut Parameter<T>> {
        self.modules
            .iter_mut()
            .flat_map(|module| module.parameters())
            .collect()
    }

    fn name(&self) -> &'static str {
        "Sequential"
    }
}
