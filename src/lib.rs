//! covruns: covered-region detection from per-base depth tables.
//!
//! Scans a `chrom position depth` table in a single pass and reports
//! every run of consecutive positions with `depth >= min_depth` that is
//! at least `min_length` long, as half-open BED3 intervals.
//!
//! # Example
//!
//! ```rust
//! use covruns::{find_runs, CoverageRecord, Interval, RunConfig};
//!
//! let records = vec![
//!     CoverageRecord::new("chr1", 1, 2),
//!     CoverageRecord::new("chr1", 2, 3),
//!     CoverageRecord::new("chr1", 3, 1),
//!     CoverageRecord::new("chr1", 4, 0),
//! ];
//! let config = RunConfig::new().with_min_length(3);
//!
//! assert_eq!(find_runs(records, &config), vec![Interval::new("chr1", 0, 3)]);
//! ```

pub mod commands;
pub mod config;
pub mod coverage;
pub mod detector;
pub mod interval;
pub mod streaming;

// Re-export commonly used types
pub use config::RunConfig;
pub use coverage::{CoverageError, CoverageReader, CoverageRecord};
pub use detector::{find_runs, scan, RunState, Runs};
pub use interval::Interval;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::commands::{CoveredRegionsCommand, ScanStats};
    pub use crate::config::RunConfig;
    pub use crate::coverage::{CoverageError, CoverageReader, CoverageRecord};
    pub use crate::detector::{find_runs, scan, Runs};
    pub use crate::interval::Interval;
}
