//! Input/output helpers.
//!
//! - CSV point ingest (`ingest`)
//! - session exports (JSON snapshot, per-point CSV) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
