//! Covered-regions command: depth table in, BED3 runs out.
//!
//! Streams the depth table once, feeding every record through the run
//! detector and writing each qualifying run as soon as it closes.
//!
//! # Memory Complexity
//!
//! O(1) - one input line and the current run.

use crate::config::RunConfig;
use crate::coverage::{CoverageError, CoverageReader};
use crate::detector::Runs;
use crate::streaming::BedWriter;
use log::debug;
use std::fmt;
use std::io::{self, Read, Write};
use std::path::Path;

/// Covered-regions command configuration.
#[derive(Debug, Clone, Default)]
pub struct CoveredRegionsCommand {
    pub config: RunConfig,
}

impl CoveredRegionsCommand {
    pub fn new() -> Self {
        Self {
            config: RunConfig::new(),
        }
    }

    /// Set the minimum depth for a position to count as covered.
    pub fn with_min_depth(mut self, min_depth: u64) -> Self {
        self.config.min_depth = min_depth;
        self
    }

    /// Set the minimum run length to report.
    pub fn with_min_length(mut self, min_length: u64) -> Self {
        self.config.min_length = min_length;
        self
    }

    /// Replace both thresholds.
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Scan a depth table file.
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        input_path: P,
        output: &mut W,
    ) -> Result<ScanStats, CoverageError> {
        let reader = CoverageReader::from_path(input_path.as_ref())?;
        self.run_streaming(reader, output)
    }

    /// Scan a depth table from stdin.
    pub fn run_stdin<W: Write>(&self, output: &mut W) -> Result<ScanStats, CoverageError> {
        let stdin = io::stdin();
        let reader = CoverageReader::new(stdin.lock());
        self.run_streaming(reader, output)
    }

    /// Core streaming loop.
    ///
    /// Runs written before an input error are flushed to `output` before
    /// the error is returned.
    pub fn run_streaming<R: Read, W: Write>(
        &self,
        reader: CoverageReader<R>,
        output: &mut W,
    ) -> Result<ScanStats, CoverageError> {
        debug!(
            "Scanning with min_depth={} min_length={}",
            self.config.min_depth, self.config.min_length
        );

        let mut writer = BedWriter::new(output);
        let mut stats = ScanStats::default();
        let mut runs = Runs::new(reader.records(), self.config);

        let outcome = (&mut runs).try_for_each(|run| {
            let run = run?;
            stats.runs_written += 1;
            stats.bases_covered += run.len();
            writer.write_interval(&run)
        });

        stats.records_read = runs.records_seen();
        stats.chromosomes = runs.chromosomes_seen();

        // Flush what was written even when the input was bad.
        writer.flush()?;
        outcome?;

        debug!("Scan finished: {}", stats);
        Ok(stats)
    }
}

/// Statistics from a covered-regions scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    /// Number of depth records read
    pub records_read: usize,
    /// Number of chromosome blocks seen
    pub chromosomes: usize,
    /// Number of runs written
    pub runs_written: usize,
    /// Total length of the runs written
    pub bases_covered: u64,
}

impl ScanStats {
    /// Fraction of scanned positions that fall in a reported run.
    pub fn covered_fraction(&self) -> f64 {
        if self.records_read == 0 {
            0.0
        } else {
            self.bases_covered as f64 / self.records_read as f64
        }
    }
}

impl fmt::Display for ScanStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Read: {}, Chromosomes: {}, Runs: {}, Bases: {} ({:.2}%)",
            self.records_read,
            self.chromosomes,
            self.runs_written,
            self.bases_covered,
            self.covered_fraction() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_depth_content(rows: &[(&str, u64, u64)]) -> String {
        rows.iter()
            .map(|(c, p, d)| format!("{}\t{}\t{}", c, p, d))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn run_on(
        cmd: &CoveredRegionsCommand,
        content: &str,
    ) -> (Result<ScanStats, CoverageError>, String) {
        let reader = CoverageReader::new(content.as_bytes());
        let mut output = Vec::new();
        let result = cmd.run_streaming(reader, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_basic_scan() {
        let content = make_depth_content(&[
            ("chr1", 1, 2),
            ("chr1", 2, 3),
            ("chr1", 3, 1),
            ("chr1", 4, 0),
        ]);
        let cmd = CoveredRegionsCommand::new().with_min_length(3);
        let (result, output) = run_on(&cmd, &content);
        let stats = result.unwrap();

        assert_eq!(output, "chr1\t0\t3\n");
        assert_eq!(stats.records_read, 4);
        assert_eq!(stats.chromosomes, 1);
        assert_eq!(stats.runs_written, 1);
        assert_eq!(stats.bases_covered, 3);
    }

    #[test]
    fn test_default_min_length() {
        let content: String = (1..=300).map(|p| format!("chr1\t{}\t1\n", p)).collect();
        let (result, output) = run_on(&CoveredRegionsCommand::new(), &content);
        result.unwrap();
        assert_eq!(output, "chr1\t0\t300\n");

        let content: String = (1..=299).map(|p| format!("chr1\t{}\t1\n", p)).collect();
        let (result, output) = run_on(&CoveredRegionsCommand::new(), &content);
        result.unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_two_chromosomes() {
        let content = make_depth_content(&[
            ("chr1", 1, 5),
            ("chr1", 2, 5),
            ("chr1", 3, 5),
            ("chr2", 1, 5),
            ("chr2", 2, 5),
            ("chr2", 3, 5),
        ]);
        let cmd = CoveredRegionsCommand::new().with_min_length(3);
        let (result, output) = run_on(&cmd, &content);

        assert_eq!(output, "chr1\t0\t3\nchr2\t0\t3\n");
        assert_eq!(result.unwrap().chromosomes, 2);
    }

    #[test]
    fn test_negative_position_keeps_earlier_output() {
        let content = "chr1 1 5\nchr1 2 0\nchr1 3 5\nchr1 -4 5\nchr1 5 5\n";
        let cmd = CoveredRegionsCommand::new().with_min_length(1);
        let (result, output) = run_on(&cmd, content);

        assert!(matches!(result, Err(CoverageError::NegativePosition { .. })));
        assert_eq!(output, "chr1\t0\t1\n");
    }

    #[test]
    fn test_truncated_input_flushes_pending_run() {
        let content = "chr1 1 5\nchr1 2 5\nchr1 3";
        let cmd = CoveredRegionsCommand::new().with_min_length(2);
        let (result, output) = run_on(&cmd, content);

        assert!(result.unwrap_err().is_truncation());
        assert_eq!(output, "chr1\t0\t2\n");
    }

    #[test]
    fn test_stats_display() {
        let stats = ScanStats {
            records_read: 4,
            chromosomes: 1,
            runs_written: 1,
            bases_covered: 3,
        };
        assert_eq!(
            stats.to_string(),
            "Read: 4, Chromosomes: 1, Runs: 1, Bases: 3 (75.00%)"
        );
    }
}
