//! The hybrid logical clock state machine.
//!
//! A [`Clock`] is owned by exactly one node. It advances on local events
//! ([`Clock::tick`]) and on receipt of a remote timestamp ([`Clock::receive`]).
//! Both operations are total, synchronous and never move the clock backward.
//!
//! The clock holds no lock. Callers sharing one clock between threads wrap it
//! in a `Mutex` (or give it a single owning task) themselves.

use crate::time::physical::{PhysicalClock, SystemClock};
use crate::time::timestamp::Timestamp;

fn max2(a: i64, b: i64) -> i64 {
    if a < b {
        b
    } else {
        a
    }
}

fn max3(a: i64, b: i64, c: i64) -> i64 {
    max2(max2(a, b), c)
}

/// Next point after `(physical, logical)` at the same physical time.
///
/// An exhausted logical counter carries into the physical component so the
/// result still strictly follows its input. At `(i64::MAX, i64::MAX)` there is
/// no later point and the clock stays put.
fn successor(physical: i64, logical: i64) -> (i64, i64) {
    if let Some(next) = logical.checked_add(1) {
        return (physical, next);
    }
    match physical.checked_add(1) {
        Some(carried) => {
            tracing::warn!(
                "logical counter exhausted at physical {}; carrying into physical time",
                physical
            );
            (carried, 0)
        }
        None => {
            tracing::warn!("hybrid clock exhausted at its maximum timestamp; holding");
            (physical, logical)
        }
    }
}

/// Hybrid logical clock for a single node.
#[derive(Debug, Clone)]
pub struct Clock<P: PhysicalClock = SystemClock> {
    physical: i64,
    logical: i64,
    source: P,
}

impl Clock<SystemClock> {
    /// Creates a zeroed clock that reads the host wall clock.
    ///
    /// Call once per node.
    pub fn new() -> Self {
        Clock::with_source(SystemClock)
    }
}

impl Default for Clock<SystemClock> {
    fn default() -> Self {
        Clock::new()
    }
}

impl<P: PhysicalClock> Clock<P> {
    /// Creates a zeroed clock that reads physical time from `source`.
    pub fn with_source(source: P) -> Self {
        Clock { physical: 0, logical: 0, source }
    }

    /// Current state, without advancing the clock.
    pub fn current(&self) -> Timestamp {
        Timestamp::new(self.physical, self.logical)
    }

    /// Advances the clock for a local or send event and returns the new time.
    ///
    /// The result strictly follows every timestamp this clock has produced or
    /// absorbed.
    pub fn tick(&mut self) -> Timestamp {
        let pt = self.source.now_nanos();
        let previous = self.physical;
        let t = max2(previous, pt);

        if t == previous {
            (self.physical, self.logical) = successor(t, self.logical);
        } else {
            self.physical = t;
            self.logical = 0;
        }

        tracing::trace!(physical = self.physical, logical = self.logical, "tick");
        self.current()
    }

    /// Merges a timestamp observed on an inbound message.
    ///
    /// Afterwards the clock strictly follows both its previous state and
    /// `remote`, unless it is pinned at `(i64::MAX, i64::MAX)`. Use [`Clock::current`] or [`Clock::tick`] to obtain a
    /// timestamp.
    pub fn receive(&mut self, remote: &Timestamp) {
        let pt = self.source.now_nanos();
        let previous = self.physical;
        let remote_physical = remote.physical();
        let t = max3(previous, remote_physical, pt);

        if remote_physical > pt {
            tracing::debug!(
                "remote timestamp {} is {}ns ahead of local physical time",
                remote,
                remote_physical.saturating_sub(pt)
            );
        }

        (self.physical, self.logical) = if t == previous && t == remote_physical {
            successor(t, max2(self.logical, remote.logical()))
        } else if t == previous {
            successor(t, self.logical)
        } else if t == remote_physical {
            successor(t, remote.logical())
        } else {
            (t, 0)
        };

        tracing::trace!(physical = self.physical, logical = self.logical, "receive");
    }
}
