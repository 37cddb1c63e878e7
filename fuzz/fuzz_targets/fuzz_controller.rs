//! Fuzz target: `ApplianceController::step`
//!
//! Feeds arbitrary event/confirmation streams into the controller and
//! asserts the core state invariants: the setpoint stays in bounds,
//! exhaust and pump are never both active, and a powered-off unit is
//! fully quiescent.
//!
//! cargo fuzz run fuzz_controller

#![no_main]

use climahmi::app::events::AppEvent;
use climahmi::app::ports::EventSink;
use climahmi::config::HmiConfig;
use climahmi::controller::{ApplianceController, CommandBuf, DrainPhase};
use climahmi::input::{ButtonEvent, ButtonId};
use libfuzzer_sys::fuzz_target;

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let config = HmiConfig::default();
    let mut ctl = ApplianceController::new(&config);
    let mut sink = NullSink;

    // Each step consumes two bytes: one event selector, one confirmation.
    for chunk in data.chunks_exact(2) {
        let id = ButtonId::from_index(usize::from(chunk[0] % 10));
        let event = match chunk[0] / 10 % 4 {
            0 => ButtonEvent::ShortClick(id),
            1 => ButtonEvent::LongPress(id),
            2 => ButtonEvent::Repeat(id),
            _ => ButtonEvent::FactoryResetHold,
        };
        let confirmation = (chunk[1] != 0).then_some(char::from(chunk[1]));

        let mut out = CommandBuf::new();
        let _ = ctl.step(&[event], confirmation, &mut out, &mut sink);

        assert!(ctl.frequency() >= config.freq_min && ctl.frequency() <= config.freq_max);
        assert!(!(ctl.exhaust_on() && ctl.pump_on()));
        if !ctl.power_on() {
            assert!(!ctl.pump_on() && !ctl.swing_on() && !ctl.exhaust_on());
            assert_eq!(ctl.drain_phase(), DrainPhase::Idle);
        }
    }
});
