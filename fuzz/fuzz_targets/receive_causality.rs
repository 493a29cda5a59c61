#![no_main]

// Harness: receive_causality – any interleaving of ticks and receives keeps the
// clock strictly increasing and ahead of every timestamp it has received.

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use hlc_core::time::{Clock, ManualClock, Timestamp};

#[derive(Arbitrary, Debug, Clone)]
enum Step {
    Tick { reading: u32 },
    Receive { reading: u32, physical: u32, logical: u32 },
}

fuzz_target!(|steps: Vec<Step>| {
    let pt = ManualClock::new(0);
    let mut clock = Clock::with_source(pt.clone());
    let mut before = clock.current();

    for step in steps {
        let after = match step {
            Step::Tick { reading } => {
                pt.set(i64::from(reading));
                clock.tick()
            }
            Step::Receive { reading, physical, logical } => {
                pt.set(i64::from(reading));
                let remote = Timestamp::new(i64::from(physical), i64::from(logical));
                clock.receive(&remote);
                assert!(remote.precedes(&clock.current()));
                clock.current()
            }
        };
        assert!(before.precedes(&after));
        before = after;
    }
});
