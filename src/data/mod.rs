//! Point-set sources that need no input file.

pub mod reference;
pub mod sample;

pub use reference::*;
pub use sample::*;
