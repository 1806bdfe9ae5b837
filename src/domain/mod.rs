//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - observations and sampling domains (`Point`, `SampleDomain`, `PlotBounds`)
//! - the display snapshot pushed to front-ends (`DisplayState`)
//! - resolved run configuration (`SessionConfig`, `DataSource`)

pub mod types;

pub use types::*;
