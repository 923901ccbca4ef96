//! Zero-allocation token parsing for depth tables.
//!
//! Depth tables are a flat stream of whitespace separated tokens. These
//! helpers locate tokens in a byte buffer and parse numeric fields
//! without going through `str`.

use memchr::memchr3;

/// Result of parsing a signed decimal position token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionToken {
    Valid(u64),
    Negative,
    Invalid,
}

/// Whether `b` separates tokens.
#[inline(always)]
pub fn is_delimiter(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

/// Find the next token in `buf` at or after `from`.
///
/// Returns the token's byte range, or None when only delimiters remain.
#[inline]
pub fn next_token(buf: &[u8], from: usize) -> Option<(usize, usize)> {
    let start = from + buf.get(from..)?.iter().position(|&b| !is_delimiter(b))?;
    let rest = &buf[start..];
    // memchr3 covers tab, space and newline; CR and friends need a rescan.
    let len = memchr3(b'\t', b' ', b'\n', rest).unwrap_or(rest.len());
    let len = rest[..len]
        .iter()
        .position(|&b| is_delimiter(b))
        .unwrap_or(len);
    Some((start, start + len))
}

/// Checked u64 parsing - no allocation, rejects overflow.
///
/// Returns None if the input is empty, contains non-digit characters,
/// or does not fit in a u64.
#[inline(always)]
pub fn parse_u64_checked(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(d as u64)?;
    }
    Some(n)
}

/// Parse a position token, distinguishing negative values from garbage.
///
/// A leading `+` is accepted. `-0` is zero, not negative.
#[inline]
pub fn parse_position(bytes: &[u8]) -> PositionToken {
    match bytes.first() {
        Some(b'-') => match parse_u64_checked(&bytes[1..]) {
            Some(0) => PositionToken::Valid(0),
            Some(_) => PositionToken::Negative,
            // Too large for u64 but still a negative number
            None if !bytes[1..].is_empty() && bytes[1..].iter().all(u8::is_ascii_digit) => {
                PositionToken::Negative
            }
            None => PositionToken::Invalid,
        },
        Some(b'+') => parse_u64_checked(&bytes[1..])
            .map(PositionToken::Valid)
            .unwrap_or(PositionToken::Invalid),
        _ => parse_u64_checked(bytes)
            .map(PositionToken::Valid)
            .unwrap_or(PositionToken::Invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64_checked() {
        assert_eq!(parse_u64_checked(b"12345"), Some(12345));
        assert_eq!(parse_u64_checked(b"0"), Some(0));
        assert_eq!(parse_u64_checked(b""), None);
        assert_eq!(parse_u64_checked(b"abc"), None);
        assert_eq!(parse_u64_checked(b"123abc"), None);
        assert_eq!(parse_u64_checked(b"18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_u64_checked(b"18446744073709551616"), None);
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position(b"42"), PositionToken::Valid(42));
        assert_eq!(parse_position(b"+42"), PositionToken::Valid(42));
        assert_eq!(parse_position(b"-0"), PositionToken::Valid(0));
        assert_eq!(parse_position(b"-7"), PositionToken::Negative);
        assert_eq!(
            parse_position(b"-99999999999999999999999"),
            PositionToken::Negative
        );
        assert_eq!(parse_position(b"-"), PositionToken::Invalid);
        assert_eq!(parse_position(b"1e5"), PositionToken::Invalid);
    }

    #[test]
    fn test_next_token() {
        let buf = b"  chr1\t12 \r\n";
        assert_eq!(next_token(buf, 0), Some((2, 6)));
        assert_eq!(next_token(buf, 6), Some((7, 9)));
        assert_eq!(next_token(buf, 9), None);
        assert_eq!(next_token(buf, buf.len()), None);
        assert_eq!(next_token(buf, buf.len() + 1), None);
    }

    #[test]
    fn test_next_token_carriage_return() {
        let buf = b"7\r";
        assert_eq!(next_token(buf, 0), Some((0, 1)));
    }
}
