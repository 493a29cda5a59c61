//! Hybrid logical time: timestamps, the clock that issues them, and the
//! physical-time sources it reads.

pub mod clock;
pub mod physical;
pub mod timestamp;

// Re-export for convenience
pub use clock::Clock;
pub use physical::{PhysicalClock, SystemClock};
pub use timestamp::Timestamp;

#[cfg(feature = "test-utils")]
pub use physical::ManualClock;
