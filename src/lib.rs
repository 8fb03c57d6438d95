//! A small neural-network training engine with hand-rolled reverse-mode
//! gradient propagation. Layers cache their local derivative state during
//! `forward`; a tape of module applications replays the chain backward.

pub mod data;
pub mod error;
pub mod nn;
pub mod numeric;
pub mod optim;

pub use error::GradError;
pub use numeric::Numeric;
