//! End-to-end tests for the drain hand-shake: request, confirmation
//! symbols, panel lockout, and the Power-abort liveness guarantee.

use crate::mock_hw::Harness;

use climahmi::app::commands::InverterCommand;
use climahmi::app::events::AppEvent;
use climahmi::controller::{DrainPhase, LedIntents};
use climahmi::input::ButtonId;

#[test]
fn drain_click_requests_cycle_and_isolates_the_drain_led() {
    let mut h = Harness::new();
    h.power_on();
    h.click(ButtonId::Climatize);
    h.click(ButtonId::Swing);
    h.drain_commands();

    h.click(ButtonId::Drain);

    assert_eq!(h.drain_commands(), [InverterCommand::SolicitarDreno]);
    assert_eq!(h.service.drain_phase(), DrainPhase::AwaitingConfirmation);
    assert_eq!(
        h.panel.leds,
        LedIntents {
            drain: true,
            ..LedIntents::ALL_OFF
        },
        "only the drain indicator may be lit during a cycle"
    );
}

#[test]
fn confirmation_symbols_walk_the_phases_and_power_off() {
    let mut h = Harness::new();
    h.power_on();
    h.click(ButtonId::Drain);
    h.drain_commands();

    h.confirm('L');
    assert_eq!(h.service.drain_phase(), DrainPhase::InProgress);
    assert!(h.sink.events.contains(&AppEvent::DrainPhaseChanged {
        from: DrainPhase::AwaitingConfirmation,
        to: DrainPhase::InProgress,
    }));

    h.confirm('F');
    assert_eq!(h.service.drain_phase(), DrainPhase::Idle);
    assert!(!h.service.power_on(), "drain completion always powers off");
    assert_eq!(h.drain_commands(), [InverterCommand::Stop]);
    assert_eq!(h.panel.leds, LedIntents::ALL_OFF);
}

#[test]
fn lowercase_symbols_are_accepted() {
    let mut h = Harness::new();
    h.power_on();
    h.click(ButtonId::Drain);

    h.confirm('l');
    assert_eq!(h.service.drain_phase(), DrainPhase::InProgress);
    h.confirm('f');
    assert_eq!(h.service.drain_phase(), DrainPhase::Idle);
}

#[test]
fn junk_symbols_never_advance_the_handshake() {
    let mut h = Harness::new();
    h.power_on();
    h.click(ButtonId::Drain);

    for junk in ['x', '0', 'F', '\n', 'Z'] {
        // 'F' is junk here too: finish before start must not count.
        h.confirm(junk);
        assert_eq!(h.service.drain_phase(), DrainPhase::AwaitingConfirmation);
    }
    assert!(h.service.power_on());
}

#[test]
fn panel_is_locked_while_awaiting_and_while_draining() {
    let mut h = Harness::new();
    h.power_on();
    h.click(ButtonId::Drain);
    h.drain_commands();

    h.click(ButtonId::Climatize);
    h.click(ButtonId::Exhaust);
    h.click(ButtonId::Increase);
    h.click(ButtonId::Set);
    assert!(h.drain_commands().is_empty(), "locked panel must stay silent");
    assert_eq!(h.service.frequency(), 10);

    h.confirm('L');
    h.click(ButtonId::Swing);
    assert!(h.drain_commands().is_empty());

    // The dropped clicks must not replay once the cycle completes.
    h.confirm('F');
    assert_eq!(h.drain_commands(), [InverterCommand::Stop]);
}

#[test]
fn power_click_aborts_from_awaiting_confirmation() {
    let mut h = Harness::new();
    h.power_on();
    h.click(ButtonId::Drain);
    h.drain_commands();

    h.click(ButtonId::Power);
    assert_eq!(h.drain_commands(), [InverterCommand::Stop]);
    assert_eq!(h.service.drain_phase(), DrainPhase::Idle);
    assert!(!h.service.power_on());
    assert_eq!(h.panel.leds, LedIntents::ALL_OFF);
}

#[test]
fn power_click_aborts_mid_drain() {
    let mut h = Harness::new();
    h.power_on();
    h.click(ButtonId::Drain);
    h.confirm('L');
    assert_eq!(h.service.drain_phase(), DrainPhase::InProgress);
    h.drain_commands();

    h.click(ButtonId::Power);
    assert_eq!(h.drain_commands(), [InverterCommand::Stop]);
    assert_eq!(h.service.drain_phase(), DrainPhase::Idle);
    assert!(!h.service.power_on());
}

#[test]
fn handshake_survives_a_long_silent_wait() {
    let mut h = Harness::new();
    h.power_on();
    h.click(ButtonId::Drain);
    h.drain_commands();

    // Two minutes of silence from the module: phase holds, panel stays
    // locked, and the abort path still works.
    h.run_ms(120_000);
    assert_eq!(h.service.drain_phase(), DrainPhase::AwaitingConfirmation);
    assert!(h.drain_commands().is_empty());

    h.click(ButtonId::Power);
    assert!(!h.service.power_on());
    assert_eq!(h.service.drain_phase(), DrainPhase::Idle);
}

#[test]
fn a_second_drain_cycle_can_start_after_completion() {
    let mut h = Harness::new();
    h.power_on();
    h.click(ButtonId::Drain);
    h.confirm('L');
    h.confirm('F');
    assert!(!h.service.power_on());
    h.drain_commands();

    h.power_on();
    h.click(ButtonId::Drain);
    assert_eq!(h.drain_commands(), [InverterCommand::SolicitarDreno]);
    assert_eq!(h.service.drain_phase(), DrainPhase::AwaitingConfirmation);
}
