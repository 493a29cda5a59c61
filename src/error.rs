//!
//! Defines error types for hlc-core.

use std::num::ParseIntError;

/// Raised when the text form of a [`Timestamp`](crate::time::Timestamp) cannot be decoded.
///
/// This is the only failure mode in the crate; clock operations are total.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The body did not split into exactly two dash-separated segments.
    #[error("wrong format: expected 2 dash-separated segments, found {0}")]
    SegmentCount(usize),
    /// A segment is not a base-16 signed 64-bit integer.
    #[error("wrong format: segment {index} is not a base-16 i64: {source}")]
    InvalidSegment {
        index: usize,
        #[source]
        source: ParseIntError,
    },
}
