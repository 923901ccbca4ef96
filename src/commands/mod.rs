//! Command implementations for covruns.

pub mod covered;

pub use covered::{CoveredRegionsCommand, ScanStats};
