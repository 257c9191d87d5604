//! Data preparation collaborators: feature scaling and synthetic datasets.

pub mod scaler;
pub mod synthetic;

pub use scaler::*;
pub use synthetic::*;
