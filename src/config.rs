//! Run detection thresholds.
//!
//! The thresholds are plain values handed to each scan; nothing here is
//! global, so several scans with different settings can coexist.

/// Default minimum depth for a position to count as covered.
pub const DEFAULT_MIN_DEPTH: u64 = 1;

/// Default minimum number of consecutive covered positions to report.
pub const DEFAULT_MIN_LENGTH: u64 = 300;

/// Thresholds applied by the run detector.
///
/// Both comparisons are inclusive: a position qualifies when
/// `depth >= min_depth`, and a run is reported when its length is
/// `>= min_length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub min_depth: u64,
    pub min_length: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RunConfig {
    pub const fn new() -> Self {
        Self {
            min_depth: DEFAULT_MIN_DEPTH,
            min_length: DEFAULT_MIN_LENGTH,
        }
    }

    /// Set the minimum depth (builder pattern).
    pub fn with_min_depth(mut self, min_depth: u64) -> Self {
        self.min_depth = min_depth;
        self
    }

    /// Set the minimum run length (builder pattern).
    pub fn with_min_length(mut self, min_length: u64) -> Self {
        self.min_length = min_length;
        self
    }

    /// Whether a position with this depth extends a run.
    #[inline]
    pub fn is_covered(&self, depth: u64) -> bool {
        depth >= self.min_depth
    }

    /// Whether a finished run of this length is reported.
    ///
    /// Empty runs are never reported, even with `min_length == 0`.
    #[inline]
    pub fn is_reportable(&self, run_length: u64) -> bool {
        run_length > 0 && run_length >= self.min_length
    }
}
