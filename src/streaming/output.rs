//! Efficient BED3 output for reported runs.
//!
//! Uses itoa for integer formatting to avoid allocation in the hot path.

use crate::coverage::CoverageError;
use crate::interval::Interval;
use crate::streaming::buffers::DEFAULT_OUTPUT_BUFFER;
use std::io::{BufWriter, Write};

/// Buffered BED3 writer.
pub struct BedWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
}

impl<W: Write> BedWriter<W> {
    /// Create a new BedWriter with the default 2MB buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_BUFFER, output)
    }

    /// Create a new BedWriter with specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
        }
    }

    /// Write a BED3 record (chrom, start, end) followed by newline.
    #[inline]
    pub fn write_bed3_line(
        &mut self,
        chrom: &[u8],
        start: u64,
        end: u64,
    ) -> Result<(), CoverageError> {
        self.writer.write_all(chrom)?;
        self.writer.write_all(b"\t")?;
        self.writer.write_all(self.itoa_buf.format(start).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer.write_all(self.itoa_buf.format(end).as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write an interval as a BED3 line.
    #[inline]
    pub fn write_interval(&mut self, interval: &Interval) -> Result<(), CoverageError> {
        self.write_bed3_line(interval.chrom.as_bytes(), interval.start, interval.end)
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<(), CoverageError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_bed3() {
        let mut output = Vec::new();
        {
            let mut writer = BedWriter::new(&mut output);
            writer.write_bed3_line(b"chr1", 100, 200).unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(output, b"chr1\t100\t200\n");
    }

    #[test]
    fn test_write_interval_matches_display() {
        let interval = Interval::new("chr2", 0, 300);
        let mut output = Vec::new();
        {
            let mut writer = BedWriter::with_capacity(16, &mut output);
            writer.write_interval(&interval).unwrap();
            writer.write_interval(&interval).unwrap();
            writer.flush().unwrap();
        }
        let expected = format!("{}\n{}\n", interval, interval);
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }
}
