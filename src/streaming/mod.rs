//! Streaming utilities shared by the reader and the output path.
//!
//! - Zero-allocation token parsing
//! - Buffered BED3 output
//!
//! Nothing here holds more than one line of input at a time.

pub mod buffers;
pub mod output;
pub mod parsing;

pub use output::BedWriter;
pub use parsing::{next_token, parse_position, parse_u64_checked, PositionToken};
