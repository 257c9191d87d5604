//! Mathematical core: squared-error loss, penalty, gradient, and the closed-form solver.

pub mod loss;
pub mod solve;

pub use loss::*;
pub use solve::*;
