//! Hybrid logical timestamps and their canonical text form.
//!
//! A [`Timestamp`] pairs a physical reading (nanoseconds since the Unix epoch)
//! with a logical counter that breaks ties between events sharing the same
//! physical reading. Timestamps order lexicographically over
//! `(physical, logical)`.
//!
//! The text form is `"<physical-hex>-<logical-hex>"`, lowercase base-16 with no
//! prefix and no padding. Only the numeric fields are authoritative for
//! ordering; two encoded strings of different lengths do not compare
//! meaningfully as text.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FormatError;

const DOUBLE_QUOTE: char = '"';
const DASH: char = '-';

/// A point in hybrid logical time.
///
/// Field order matters: the derived `Ord` compares `physical` first and
/// `logical` on a tie.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
    physical: i64,
    logical: i64,
}

impl Timestamp {
    /// Builds a timestamp from its parts.
    ///
    /// Both parts should be non-negative. A negative part encodes with a
    /// leading `-`, which collides with the segment separator, so such a
    /// timestamp does not decode.
    pub const fn new(physical: i64, logical: i64) -> Self {
        Timestamp { physical, logical }
    }

    /// Physical component, in nanoseconds.
    pub const fn physical(&self) -> i64 {
        self.physical
    }

    /// Logical counter component.
    pub const fn logical(&self) -> i64 {
        self.logical
    }

    /// Returns `true` if `self` strictly precedes `other` in the total order.
    pub fn precedes(&self, other: &Timestamp) -> bool {
        self < other
    }

    /// Canonical text form, e.g. `17f1c2a3b4c5d6e7-3`.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parses the canonical text form.
    ///
    /// One pair of surrounding double quotes is accepted and stripped, so the
    /// raw bytes of a JSON string field decode as well.
    pub fn decode(text: &str) -> Result<Self, FormatError> {
        let body = text
            .strip_prefix(DOUBLE_QUOTE)
            .and_then(|rest| rest.strip_suffix(DOUBLE_QUOTE))
            .unwrap_or(text);

        let segments: Vec<&str> = body.split(DASH).collect();
        let [physical, logical] = segments.as_slice() else {
            tracing::debug!(
                "rejecting timestamp {:?}: {} segments",
                text,
                segments.len()
            );
            return Err(FormatError::SegmentCount(segments.len()));
        };

        Ok(Timestamp {
            physical: parse_hex(physical, 0)?,
            logical: parse_hex(logical, 1)?,
        })
    }
}

fn parse_hex(segment: &str, index: usize) -> Result<i64, FormatError> {
    i64::from_str_radix(segment, 16).map_err(|source| {
        tracing::debug!("rejecting timestamp segment {} {:?}: {}", index, segment, source);
        FormatError::InvalidSegment { index, source }
    })
}

/// Minimal signed hex: a leading `-` for negative values, never two's complement.
struct SignedHex(i64);

impl fmt::Display for SignedHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-{:x}", self.0.unsigned_abs())
        } else {
            write!(f, "{:x}", self.0)
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", SignedHex(self.physical), DASH, SignedHex(self.logical))
    }
}

impl FromStr for Timestamp {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timestamp::decode(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a hybrid logical timestamp string \"<physical-hex>-<logical-hex>\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
        Timestamp::decode(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(TimestampVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_lowercase_unpadded_hex() {
        assert_eq!(Timestamp::new(0, 0).encode(), "0-0");
        assert_eq!(Timestamp::new(255, 10).encode(), "ff-a");
        assert_eq!(Timestamp::new(0x17f1c2a3b4c5d6e7, 3).encode(), "17f1c2a3b4c5d6e7-3");
        assert_eq!(Timestamp::new(i64::MAX, 1).encode(), "7fffffffffffffff-1");
    }

    #[test]
    fn test_encode_negative_uses_sign() {
        assert_eq!(SignedHex(-255).to_string(), "-ff");
        assert_eq!(SignedHex(i64::MIN).to_string(), "-8000000000000000");
    }

    #[test]
    fn test_negative_parts_do_not_decode() {
        let ts = Timestamp::new(-1, 0);
        assert_eq!(ts.encode(), "-1-0");
        assert_eq!(Timestamp::decode(&ts.encode()), Err(FormatError::SegmentCount(3)));
        assert!(matches!(
            Timestamp::decode(&Timestamp::new(1, -1).encode()),
            Err(FormatError::SegmentCount(3))
        ));
    }

    #[test]
    fn test_decode_assigns_second_segment_to_logical() {
        let ts = Timestamp::decode("64-5").unwrap();
        assert_eq!(ts.physical(), 100);
        assert_eq!(ts.logical(), 5);
    }

    #[test]
    fn test_decode_strips_one_pair_of_quotes() {
        assert_eq!(Timestamp::decode("\"a-1\"").unwrap(), Timestamp::new(10, 1));
        assert!(matches!(
            Timestamp::decode("\"\"a-1\"\""),
            Err(FormatError::InvalidSegment { index: 0, .. })
        ));
        // An unmatched quote is part of the body.
        assert!(Timestamp::decode("\"a-1").is_err());
    }

    #[test]
    fn test_decode_accepts_uppercase_hex() {
        assert_eq!(Timestamp::decode("FF-A").unwrap(), Timestamp::new(255, 10));
    }

    #[test]
    fn test_decode_segment_count_errors() {
        assert_eq!(Timestamp::decode("badformat"), Err(FormatError::SegmentCount(1)));
        assert_eq!(Timestamp::decode("1-2-3"), Err(FormatError::SegmentCount(3)));
        assert_eq!(Timestamp::decode(""), Err(FormatError::SegmentCount(1)));
    }

    #[test]
    fn test_decode_invalid_segments() {
        assert!(matches!(
            Timestamp::decode("xyz-1"),
            Err(FormatError::InvalidSegment { index: 0, .. })
        ));
        assert!(matches!(
            Timestamp::decode("1-"),
            Err(FormatError::InvalidSegment { index: 1, .. })
        ));
        assert!(matches!(
            Timestamp::decode("1-0x2"),
            Err(FormatError::InvalidSegment { index: 1, .. })
        ));
        // 17 hex digits overflow i64.
        assert!(matches!(
            Timestamp::decode("10000000000000000-0"),
            Err(FormatError::InvalidSegment { index: 0, .. })
        ));
    }

    #[test]
    fn test_precedes_physical_then_logical() {
        let a = Timestamp::new(1, 9);
        let b = Timestamp::new(2, 0);
        let c = Timestamp::new(2, 1);
        assert!(a.precedes(&b));
        assert!(b.precedes(&c));
        assert!(a.precedes(&c));
        assert!(!b.precedes(&a));
        assert!(!b.precedes(&b));
    }

    #[test]
    fn test_from_str_matches_decode() {
        let ts: Timestamp = "2a-0".parse().unwrap();
        assert_eq!(ts, Timestamp::new(42, 0));
    }
}
