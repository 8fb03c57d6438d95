pub mod sgd;

pub use sgd::sgd_step;
