//! `lr-fit` library crate.
//!
//! The binary (`lr`) is a thin wrapper around this library so that:
//!
//! - the numeric core (`math`, `fit`) is testable without spawning processes
//! - the core stays free of I/O; CSV and terminal concerns live in `io`, `report`, `app`

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod report;
