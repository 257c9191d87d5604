//! Iterative fitting.
//!
//! Responsibilities:
//!
//! - draw mini-batches with replacement (`sampler`)
//! - detect loss plateaus (`early_stop`)
//! - run gradient descent (`trainer`)
//! - score weights on a split (`evaluate`)

pub mod early_stop;
pub mod evaluate;
pub mod sampler;
pub mod trainer;

pub use early_stop::*;
pub use evaluate::*;
pub use sampler::*;
pub use trainer::*;
