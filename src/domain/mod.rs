//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the row-aligned `Dataset` container
//! - hyperparameters (`TrainConfig`, `WeightInit`, `ScalerKind`)
//! - trainer outputs (`TrainReport`, `Checkpoint`, `TrainEvent`)

pub mod types;

pub use types::*;
