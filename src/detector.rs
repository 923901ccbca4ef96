//! Single-pass detection of covered runs.
//!
//! # Algorithm
//!
//! For each record, in input order:
//! 1. Same chromosome, covered: extend the current run.
//! 2. Same chromosome, not covered: flush the current run, reset to 0.
//! 3. New chromosome: flush the previous chromosome's run, then start
//!    a run of 1 or 0 depending on this record's depth.
//!
//! The position of every record is remembered after it is handled, so a
//! flush always ends at the position processed *before* the record that
//! triggered it. At end of input the pending run is flushed once more.
//!
//! # Memory Complexity
//!
//! O(1) - only the current chromosome name and two counters.
//!
//! Input is not checked for sort order or gaps; positions are trusted to
//! be 1-based and contiguous within a chromosome.

use crate::config::RunConfig;
use crate::coverage::{CoverageError, CoverageRecord};
use crate::interval::Interval;
use log::warn;
use std::iter::Peekable;

/// Mutable state of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    tracked_chrom: String,
    run_length: u64,
    last_position: u64,
}

impl RunState {
    /// Start tracking `chrom` with an empty run.
    pub fn new(chrom: impl Into<String>) -> Self {
        Self {
            tracked_chrom: chrom.into(),
            run_length: 0,
            last_position: 1,
        }
    }

    pub fn tracked_chrom(&self) -> &str {
        &self.tracked_chrom
    }

    pub fn run_length(&self) -> u64 {
        self.run_length
    }

    pub fn last_position(&self) -> u64 {
        self.last_position
    }

    /// Apply one record. Returns the run it closed, if that run qualifies.
    pub fn step(&mut self, record: CoverageRecord, config: &RunConfig) -> Option<Interval> {
        let covered = config.is_covered(record.depth);
        let flushed = if record.chrom == self.tracked_chrom {
            if covered {
                self.run_length += 1;
                None
            } else {
                let run = self.flush(config);
                self.run_length = 0;
                run
            }
        } else {
            let run = self.flush(config);
            self.tracked_chrom = record.chrom;
            self.run_length = u64::from(covered);
            run
        };
        self.last_position = record.position;
        flushed
    }

    /// Report the current run if it qualifies. Does not reset the counter.
    pub fn flush(&self, config: &RunConfig) -> Option<Interval> {
        if !config.is_reportable(self.run_length) {
            return None;
        }
        let (interval, clamped) =
            Interval::ending_at(self.tracked_chrom.as_str(), self.last_position, self.run_length);
        if clamped {
            warn!(
                "Run of {} positions on {} ends at position {}; start clamped to 0 (is the input 1-based?)",
                self.run_length, self.tracked_chrom, self.last_position
            );
        }
        Some(interval)
    }
}

/// Lazy iterator over qualifying runs.
///
/// Wraps a stream of records and yields each qualifying run as soon as
/// it closes. A truncated input still yields the pending run before the
/// error; any other error ends the sequence immediately.
pub struct Runs<I: Iterator> {
    records: Peekable<I>,
    config: RunConfig,
    state: Option<RunState>,
    deferred_error: Option<CoverageError>,
    finished: bool,
    records_seen: usize,
    chromosomes_seen: usize,
}

impl<I> Runs<I>
where
    I: Iterator<Item = Result<CoverageRecord, CoverageError>>,
{
    pub fn new(records: I, config: RunConfig) -> Self {
        Self {
            records: records.peekable(),
            config,
            state: None,
            deferred_error: None,
            finished: false,
            records_seen: 0,
            chromosomes_seen: 0,
        }
    }

    /// Number of records consumed so far.
    pub fn records_seen(&self) -> usize {
        self.records_seen
    }

    /// Number of chromosome blocks seen so far.
    pub fn chromosomes_seen(&self) -> usize {
        self.chromosomes_seen
    }

    /// Seed the tracked chromosome from the first record without consuming it.
    fn init_state(&mut self) {
        if self.state.is_some() {
            return;
        }
        if let Some(Ok(first)) = self.records.peek() {
            self.state = Some(RunState::new(first.chrom.as_str()));
            self.chromosomes_seen = 1;
        }
    }

    /// Final flush at end of input; always attempted once.
    fn finish(&mut self) -> Option<Interval> {
        self.finished = true;
        self.state.as_ref().and_then(|state| state.flush(&self.config))
    }
}

impl<I> Iterator for Runs<I>
where
    I: Iterator<Item = Result<CoverageRecord, CoverageError>>,
{
    type Item = Result<Interval, CoverageError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return self.deferred_error.take().map(Err);
        }
        self.init_state();

        loop {
            match self.records.next() {
                Some(Ok(record)) => {
                    self.records_seen += 1;
                    let Some(state) = self.state.as_mut() else {
                        // Only reachable if the first item was an error.
                        self.finished = true;
                        return None;
                    };
                    if record.chrom != state.tracked_chrom() {
                        self.chromosomes_seen += 1;
                    }
                    if let Some(run) = state.step(record, &self.config) {
                        return Some(Ok(run));
                    }
                }
                Some(Err(e)) if e.is_truncation() => {
                    self.deferred_error = Some(e);
                    if let Some(run) = self.finish() {
                        return Some(Ok(run));
                    }
                    return self.deferred_error.take().map(Err);
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e));
                }
                None => {
                    if let Some(run) = self.finish() {
                        return Some(Ok(run));
                    }
                    return None;
                }
            }
        }
    }
}

/// Scan `records` and call `emit` for every qualifying run, in order.
///
/// Stops at the first input error and returns it; runs emitted before
/// the error stay emitted.
pub fn scan<I, F>(records: I, config: &RunConfig, mut emit: F) -> Result<(), CoverageError>
where
    I: IntoIterator<Item = Result<CoverageRecord, CoverageError>>,
    F: FnMut(Interval),
{
    for run in Runs::new(records.into_iter(), *config) {
        emit(run?);
    }
    Ok(())
}

/// Collect the qualifying runs of an in-memory record list.
pub fn find_runs<I>(records: I, config: &RunConfig) -> Vec<Interval>
where
    I: IntoIterator<Item = CoverageRecord>,
{
    let mut runs = Vec::new();
    // Infallible input, so scan cannot fail.
    let _ = scan(records.into_iter().map(Ok), config, |run| runs.push(run));
    runs
}
