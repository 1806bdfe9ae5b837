//! Polynomial fitting.
//!
//! Responsibilities:
//!
//! - least-squares fit for a single degree (`fitter`)
//! - total squared error across every admissible degree (`sweep`, parallel)

pub mod fitter;
pub mod sweep;

pub use fitter::*;
pub use sweep::*;
