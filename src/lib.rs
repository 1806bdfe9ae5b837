//! `lsq-explorer` library crate.
//!
//! The binary (`lsq`) is a thin wrapper around this library so that:
//!
//! - the fitting session is testable without a terminal
//! - front-ends (line output, TUI) share one core
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod plot;
pub mod report;
pub mod session;
pub mod tui;
