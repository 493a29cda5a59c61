//! Physical-time sources.
//!
//! A [`PhysicalClock`] supplies the wall-clock half of every hybrid timestamp.
//! The hybrid [`Clock`](crate::time::Clock) is generic over this trait so that
//! tests can pin physical time while production code reads the host clock.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of physical-time readings, in nanoseconds since a fixed epoch.
///
/// Readings are expected to be roughly wall-clock aligned across nodes but need
/// not be monotonic; the hybrid clock absorbs backward steps.
pub trait PhysicalClock {
    fn now_nanos(&self) -> i64;
}

/// Host wall clock, UTC nanoseconds since the Unix epoch.
///
/// Readings before the epoch clamp to `0`, readings past year 2262 saturate at
/// `i64::MAX`.
#[derive(Default, Debug, Clone, Copy)]
pub struct SystemClock;

impl PhysicalClock for SystemClock {
    fn now_nanos(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX),
            Err(e) => {
                tracing::warn!(
                    "system clock is {:?} before the Unix epoch; clamping physical time to 0",
                    e.duration()
                );
                0
            }
        }
    }
}

impl<P: PhysicalClock + ?Sized> PhysicalClock for &P {
    fn now_nanos(&self) -> i64 {
        (**self).now_nanos()
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "test-utils"))]
mod manual {
    use super::PhysicalClock;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    /// Settable physical clock for deterministic tests.
    ///
    /// Clones share the same reading, so a test can keep one handle and move
    /// another into the [`Clock`](crate::time::Clock) under test.
    #[derive(Default, Debug, Clone)]
    pub struct ManualClock {
        nanos: Arc<AtomicI64>,
    }

    impl ManualClock {
        pub fn new(nanos: i64) -> Self {
            ManualClock { nanos: Arc::new(AtomicI64::new(nanos)) }
        }

        pub fn set(&self, nanos: i64) {
            self.nanos.store(nanos, Ordering::SeqCst);
        }

        pub fn advance(&self, delta: i64) {
            self.nanos.fetch_add(delta, Ordering::SeqCst);
        }

        pub fn get(&self) -> i64 {
            self.nanos.load(Ordering::SeqCst)
        }
    }

    impl PhysicalClock for ManualClock {
        fn now_nanos(&self) -> i64 {
            self.get()
        }
    }
}
