#![no_main]

//! Snapshot loader fuzzer.
//!
//! Arbitrary bytes must either fail to load with an error or produce a
//! universe that survives a save/load round trip unchanged and can then be
//! ticked without panicking.

use blasebox::{TICK_MS, Universe};
use libfuzzer_sys::fuzz_target;

/// Ticks to run on every universe that loads.
const TICKS: i64 = 64;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(mut universe) = Universe::from_json(text) else {
        return;
    };

    let json = universe.to_json().expect("loaded universe serializes");
    let again = Universe::from_json(&json).expect("saved universe loads");
    assert_eq!(again, universe);

    let start = universe.sim.state().time;
    let goal = start.saturating_add(TICKS * TICK_MS);
    universe
        .sim
        .run_to_time(goal)
        .expect("validated universe ticks");
    assert!(universe.sim.state().time >= goal);
});
