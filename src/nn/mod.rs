pub mod activation;
pub mod linear;
pub mod loss;
pub mod module;
pub mod parameter;
pub mod sequential;
pub mod tape;

pub use activation::{ReLU, Sigmoid, Tanh};
pub use linear::Linear;
pub use loss::MseLoss;
pub use module::Module;
pub use parameter::Parameter;
pub use sequential::Sequential;
pub use tape::Tape;
