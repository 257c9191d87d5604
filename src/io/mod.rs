//! Input/output helpers.
//!
//! - CSV ingest, scaling, and bias insertion (`ingest`)
//! - prediction / weight / report exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
