//! Strict `strtol`-style integer parsing.
//!
//! The accepted grammar is `[+-][0x|0X]DIGITS` with nothing before or
//! after it. Unlike `strtol`, leading whitespace and trailing bytes are
//! errors, and out-of-range values fail instead of clamping.

use std::time::Duration;

use crate::bytescan;
use crate::error::{Error, Result};

const MAX_FRACTION_DIGITS: usize = 9;

fn digit_value(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some((b - b'0') as u32),
        b'a'..=b'z' => Some((b - b'a') as u32 + 10),
        b'A'..=b'Z' => Some((b - b'A') as u32 + 10),
        _ => None,
    }
}

fn has_hex_prefix(s: &[u8]) -> bool {
    s.len() > 1 && s[0] == b'0' && (s[1] == b'x' || s[1] == b'X')
}

/// Parse `s` as a signed 64-bit integer in `base`.
///
/// `base` is 0 (auto-detect: `0x` is hex, a leading `0` is octal,
/// anything else decimal) or 2..=36. Base 16 also accepts the `0x`
/// prefix.
///
/// # Errors
///
/// `InvalidArgument` for a missing string or unsupported base,
/// `InvalidNumber` when the text is not exactly one number, and
/// `OutOfRange` when the value does not fit in an `i64`.
pub fn parse_long(s: Option<&[u8]>, base: u32) -> Result<i64> {
    let s = bytescan::terminated(s.ok_or(Error::InvalidArgument("missing number"))?);
    if base == 1 || base > 36 {
        return Err(Error::InvalidArgument("unsupported base"));
    }

    let (negative, mut rest) = match s.first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let base = match base {
        0 if has_hex_prefix(rest) => {
            rest = &rest[2..];
            16
        }
        0 if rest.len() > 1 && rest[0] == b'0' => {
            rest = &rest[1..];
            8
        }
        0 => 10,
        16 if has_hex_prefix(rest) => {
            rest = &rest[2..];
            16
        }
        b => b,
    };

    if rest.is_empty() {
        return Err(Error::InvalidNumber);
    }

    let mut magnitude: u64 = 0;
    for &b in rest {
        let d = match digit_value(b) {
            Some(d) if d < base => d,
            _ => return Err(Error::InvalidNumber),
        };
        magnitude = magnitude
            .checked_mul(base as u64)
            .and_then(|m| m.checked_add(d as u64))
            .ok_or(Error::OutOfRange)?;
    }

    if negative {
        // i64::MIN has no positive counterpart, so it is matched on the
        // unsigned magnitude.
        if magnitude > i64::MIN.unsigned_abs() {
            return Err(Error::OutOfRange);
        }
        Ok(0i64.wrapping_sub_unsigned(magnitude))
    } else {
        i64::try_from(magnitude).map_err(|_| Error::OutOfRange)
    }
}

/// Parse `s` like [`parse_long`] and narrow the result to `T`.
///
/// # Errors
///
/// Everything [`parse_long`] reports, plus `OutOfRange` when the value
/// does not fit in `T`.
pub fn parse_as<T: TryFrom<i64>>(s: Option<&[u8]>, base: u32) -> Result<T> {
    let n = parse_long(s, base)?;
    T::try_from(n).map_err(|_| Error::OutOfRange)
}

/// Convert `"SECONDS"` or `"SECONDS.FRACTION"` into a [`Duration`].
///
/// Seconds are decimal and non-negative; the fraction has at most nine
/// digits (nanosecond resolution).
///
/// # Errors
///
/// `InvalidArgument` for a missing string, `InvalidNumber` for malformed
/// text and `OutOfRange` when the seconds overflow.
pub fn num_to_duration(s: Option<&[u8]>) -> Result<Duration> {
    let s = bytescan::terminated(s.ok_or(Error::InvalidArgument("missing number"))?);

    let (secs, frac) = match bytescan::strchr(Some(s), b'.') {
        Some(dot) => (&s[..dot], Some(&s[dot + 1..])),
        None => (s, None),
    };

    if secs.first().is_some_and(|b| !b.is_ascii_digit()) {
        return Err(Error::InvalidNumber);
    }
    let secs = if secs.is_empty() {
        if frac.is_none() {
            return Err(Error::InvalidNumber);
        }
        0
    } else {
        parse_as::<u64>(Some(secs), 10)?
    };

    let nanos = match frac {
        None => 0,
        Some(f) => {
            if f.is_empty() || f.len() > MAX_FRACTION_DIGITS {
                return Err(Error::InvalidNumber);
            }
            if !f.iter().all(u8::is_ascii_digit) {
                return Err(Error::InvalidNumber);
            }
            let value = parse_as::<u32>(Some(f), 10)?;
            value * 10u32.pow((MAX_FRACTION_DIGITS - f.len()) as u32)
        }
    };

    Ok(Duration::new(secs, nanos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(s: &str, base: u32) -> Result<i64> {
        parse_long(Some(s.as_bytes()), base)
    }

    #[test]
    fn parse_long_table() {
        let tests: &[(&str, u32, Result<i64>)] = &[
            ("foo", 10, Err(Error::InvalidNumber)),
            ("0", 10, Ok(0)),
            ("3abc", 10, Err(Error::InvalidNumber)),
            ("abc3", 10, Err(Error::InvalidNumber)),
            ("-1", 10, Ok(-1)),
            ("-17", 10, Ok(-17)),
            ("17", 10, Ok(17)),
            ("+17", 10, Ok(17)),
            ("0X7FFFFFFFFFFFFFFF", 16, Ok(i64::MAX)),
            ("0X8000000000000000", 16, Err(Error::OutOfRange)),
            ("-9223372036854775808", 10, Ok(i64::MIN)),
            ("-9223372036854775809", 10, Err(Error::OutOfRange)),
            ("9223372036854775807", 10, Ok(i64::MAX)),
            ("9223372036854775808", 10, Err(Error::OutOfRange)),
            ("99999999999999999999999", 10, Err(Error::OutOfRange)),
        ];
        for (s, base, expected) in tests {
            assert_eq!(parse(s, *base), *expected, "parse({:?}, {})", s, base);
        }
    }

    #[test]
    fn parse_long_rejects_missing_and_bad_base() {
        assert_eq!(parse_long(None, 0), Err(Error::InvalidArgument("missing number")));
        assert_eq!(parse("1", 1), Err(Error::InvalidArgument("unsupported base")));
        assert_eq!(parse("1", 37), Err(Error::InvalidArgument("unsupported base")));
    }

    #[test]
    fn parse_long_rejects_garbage() {
        for s in ["", "-", "+", " 1", "1 ", "1\n", "0x", "--1", "1_000"] {
            assert_eq!(parse(s, 10), Err(Error::InvalidNumber), "{:?}", s);
        }
        assert_eq!(parse("0x", 16), Err(Error::InvalidNumber));
        assert_eq!(parse("0xg", 16), Err(Error::InvalidNumber));
        assert_eq!(parse("8", 8), Err(Error::InvalidNumber));
    }

    #[test]
    fn parse_long_auto_base() {
        assert_eq!(parse("0x1f", 0), Ok(31));
        assert_eq!(parse("-0X10", 0), Ok(-16));
        assert_eq!(parse("017", 0), Ok(15));
        assert_eq!(parse("0", 0), Ok(0));
        assert_eq!(parse("42", 0), Ok(42));
        assert_eq!(parse("09", 0), Err(Error::InvalidNumber));
    }

    #[test]
    fn parse_long_other_bases() {
        assert_eq!(parse("101", 2), Ok(5));
        assert_eq!(parse("zz", 36), Ok(35 * 36 + 35));
        assert_eq!(parse("ff", 16), Ok(255));
        assert_eq!(parse("FF", 16), Ok(255));
    }

    #[test]
    fn parse_long_stops_at_nul() {
        assert_eq!(parse_long(Some(b"12\0junk"), 10), Ok(12));
    }

    #[test]
    fn parse_as_narrows() {
        assert_eq!(parse_as::<u8>(Some(b"255"), 10), Ok(255u8));
        assert_eq!(parse_as::<u8>(Some(b"256"), 10), Err(Error::OutOfRange));
        assert_eq!(parse_as::<u32>(Some(b"-1"), 10), Err(Error::OutOfRange));
        assert_eq!(parse_as::<i32>(Some(b"-2147483648"), 10), Ok(i32::MIN));
    }

    #[test]
    fn durations() {
        let d = |s: &str| num_to_duration(Some(s.as_bytes()));
        assert_eq!(d("0"), Ok(Duration::ZERO));
        assert_eq!(d("3"), Ok(Duration::from_secs(3)));
        assert_eq!(d("1.5"), Ok(Duration::from_millis(1500)));
        assert_eq!(d(".25"), Ok(Duration::from_millis(250)));
        assert_eq!(d("2.000000001"), Ok(Duration::new(2, 1)));
        assert_eq!(d("1."), Err(Error::InvalidNumber));
        assert_eq!(d("."), Err(Error::InvalidNumber));
        assert_eq!(d(""), Err(Error::InvalidNumber));
        assert_eq!(d("-1"), Err(Error::InvalidNumber));
        assert_eq!(d("+1"), Err(Error::InvalidNumber));
        assert_eq!(d("1.0000000001"), Err(Error::InvalidNumber));
        assert_eq!(d("1.-5"), Err(Error::InvalidNumber));
        assert_eq!(d("1s"), Err(Error::InvalidNumber));
        assert_eq!(num_to_duration(None), Err(Error::InvalidArgument("missing number")));
    }
}
