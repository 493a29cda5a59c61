#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! hlc-core is a Hybrid Logical Clock: timestamps that track wall-clock time
//! while staying strictly ordered on every node and across message exchanges.
//!
//! ```
//! use hlc_core::{Clock, Timestamp};
//!
//! let mut node_a = Clock::new();
//! let mut node_b = Clock::new();
//!
//! let sent = node_a.tick();
//! let wire = serde_json::to_string(&sent).unwrap();
//!
//! let received: Timestamp = serde_json::from_str(&wire).unwrap();
//! node_b.receive(&received);
//! assert!(sent.precedes(&node_b.current()));
//! ```

// Module for error types.
pub mod error;

// Module for timestamps and the hybrid clock.
pub mod time;

pub use error::FormatError;
pub use time::{Clock, PhysicalClock, SystemClock, Timestamp};
