//! Streaming reader for per-base depth tables.
//!
//! A depth table is a flat stream of whitespace separated
//! `chrom position depth` triples, as written by `samtools depth` or
//! `bedtools genomecov -d`. Line breaks carry no meaning beyond
//! separating tokens; they are only counted for error messages.

use crate::streaming::buffers::{DEFAULT_INPUT_BUFFER, DEFAULT_LINE_BUFFER};
use crate::streaming::parsing::{next_token, parse_position, parse_u64_checked, PositionToken};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading a depth table.
#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Negative position at line {line}: '{token}'")]
    NegativePosition { line: usize, token: String },

    #[error("Invalid {field} at line {line}: '{token}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        token: String,
    },

    #[error("Unexpected end of input at line {line}: record is missing {missing} of 3 fields")]
    Truncated { line: usize, missing: usize },
}

impl CoverageError {
    /// Whether the input ended in the middle of a record.
    ///
    /// Everything read before a truncation is well formed, so the scan
    /// still flushes its pending run before reporting it.
    pub fn is_truncation(&self) -> bool {
        matches!(self, CoverageError::Truncated { .. })
    }
}

pub type Result<T> = std::result::Result<T, CoverageError>;

/// One row of a depth table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageRecord {
    pub chrom: String,
    /// 1-based position.
    pub position: u64,
    pub depth: u64,
}

impl CoverageRecord {
    pub fn new(chrom: impl Into<String>, position: u64, depth: u64) -> Self {
        Self {
            chrom: chrom.into(),
            position,
            depth,
        }
    }
}

/// A streaming depth table reader.
pub struct CoverageReader<R: Read> {
    reader: BufReader<R>,
    line: Vec<u8>,
    cursor: usize,
    line_number: usize,
}

impl CoverageReader<File> {
    /// Open a depth table from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::with_capacity(file, DEFAULT_INPUT_BUFFER))
    }
}

impl<R: Read> CoverageReader<R> {
    /// Create a new reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_INPUT_BUFFER)
    }

    /// Create a reader with custom buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line: Vec::with_capacity(DEFAULT_LINE_BUFFER),
            cursor: 0,
            line_number: 0,
        }
    }

    /// Current line number (1-based, 0 before anything is read).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Advance to the next token, refilling the line buffer as needed.
    fn advance(&mut self) -> Result<Option<(usize, usize)>> {
        loop {
            if let Some((start, end)) = next_token(&self.line, self.cursor) {
                self.cursor = end;
                return Ok(Some((start, end)));
            }
            self.line.clear();
            self.cursor = 0;
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;
        }
    }

    fn token_string(&self, (start, end): (usize, usize)) -> String {
        String::from_utf8_lossy(&self.line[start..end]).into_owned()
    }

    /// Read the next record.
    ///
    /// Returns Ok(None) at a clean end of input.
    pub fn read_record(&mut self) -> Result<Option<CoverageRecord>> {
        let chrom = match self.advance()? {
            Some(span) => self.token_string(span),
            None => return Ok(None),
        };

        let span = self.advance()?.ok_or(CoverageError::Truncated {
            line: self.line_number,
            missing: 2,
        })?;
        let position = match parse_position(&self.line[span.0..span.1]) {
            PositionToken::Valid(p) => p,
            PositionToken::Negative => {
                return Err(CoverageError::NegativePosition {
                    line: self.line_number,
                    token: self.token_string(span),
                })
            }
            PositionToken::Invalid => {
                return Err(CoverageError::InvalidNumber {
                    line: self.line_number,
                    field: "position",
                    token: self.token_string(span),
                })
            }
        };

        let span = self.advance()?.ok_or(CoverageError::Truncated {
            line: self.line_number,
            missing: 1,
        })?;
        let depth = parse_u64_checked(&self.line[span.0..span.1]).ok_or_else(|| {
            CoverageError::InvalidNumber {
                line: self.line_number,
                field: "depth",
                token: self.token_string(span),
            }
        })?;

        Ok(Some(CoverageRecord {
            chrom,
            position,
            depth,
        }))
    }

    /// Get an iterator over all records.
    pub fn records(self) -> CoverageRecordIter<R> {
        CoverageRecordIter {
            reader: self,
            failed: false,
        }
    }
}

/// Iterator over depth table records. Stops after the first error.
pub struct CoverageRecordIter<R: Read> {
    reader: CoverageReader<R>,
    failed: bool,
}

impl<R: Read> Iterator for CoverageRecordIter<R> {
    type Item = Result<CoverageRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.reader.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Parse records from a string (useful for testing).
pub fn parse_records(content: &str) -> Result<Vec<CoverageRecord>> {
    CoverageReader::new(content.as_bytes()).records().collect()
}
