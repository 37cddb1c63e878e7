//! Fuzz target: `InputClassifier::sample`
//!
//! Drives arbitrary level-mask/time-delta sequences into the classifier
//! and asserts that it never panics and never yields more than one event
//! per button in a single tick.
//!
//! cargo fuzz run fuzz_classifier

#![no_main]

use climahmi::config::HmiConfig;
use climahmi::input::{ButtonEvent, ButtonId, InputClassifier};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut cls = InputClassifier::new(&HmiConfig::default());
    let mut now: u32 = 0;

    // Each step consumes three bytes: two for the level mask, one for the
    // time delta (clock is monotone non-decreasing by construction).
    for chunk in data.chunks_exact(3) {
        let mask = u16::from_le_bytes([chunk[0], chunk[1]]);
        now = now.wrapping_add(u32::from(chunk[2]));

        let mut raw = [false; ButtonId::COUNT];
        for (i, level) in raw.iter_mut().enumerate() {
            *level = mask & (1 << i) != 0;
        }

        let events = cls.sample(&raw, now);
        assert!(events.len() <= ButtonId::COUNT);

        for id in ButtonId::ALL {
            let count = events
                .iter()
                .filter(|ev| match ev {
                    ButtonEvent::ShortClick(b)
                    | ButtonEvent::LongPress(b)
                    | ButtonEvent::Repeat(b) => *b == id,
                    ButtonEvent::FactoryResetHold => id == ButtonId::FactoryReset,
                })
                .count();
            assert!(count <= 1, "button {id:?} fired {count} times in one tick");
        }
    }
});
