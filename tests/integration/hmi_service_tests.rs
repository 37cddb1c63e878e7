//! Integration tests for the button → classifier → controller → link
//! pipeline.
//!
//! These run on the host (x86_64) and verify that the full chain from a
//! raw GPIO level change down to an inverter command and LED refresh works
//! correctly without any real hardware.

use crate::mock_hw::{Harness, MockReset};

use climahmi::app::commands::InverterCommand;
use climahmi::app::events::AppEvent;
use climahmi::app::ports::ResetPort;
use climahmi::controller::{DrainPhase, LedIntents, UiMode};
use climahmi::input::ButtonId;

// ── Power-up and idle behaviour ───────────────────────────────

#[test]
fn panel_is_dark_and_silent_until_powered() {
    let mut h = Harness::new();
    h.run_ticks(50);
    assert!(h.drain_commands().is_empty());
    assert_eq!(h.panel.leds, LedIntents::ALL_OFF);

    h.click(ButtonId::Climatize);
    h.click(ButtonId::Swing);
    assert!(h.drain_commands().is_empty(), "mode clicks ignored while off");
}

#[test]
fn power_click_starts_the_unit_and_lights_ventilate() {
    let mut h = Harness::new();
    h.click(ButtonId::Power);
    assert_eq!(h.drain_commands(), [InverterCommand::Start]);
    assert!(h.service.power_on());
    assert!(h.sink.events.contains(&AppEvent::PowerChanged(true)));

    // No pump, no exhaust: the ventilate indicator is the resting state.
    assert!(h.panel.leds.ventilate);
    assert!(!h.panel.leds.climatize && !h.panel.leds.swing);
}

#[test]
fn power_off_with_exhaust_active_clears_everything() {
    let mut h = Harness::new();
    h.power_on();
    h.click(ButtonId::Exhaust);
    assert!(h.panel.leds.exhaust);
    h.drain_commands();

    h.click(ButtonId::Power);
    assert_eq!(h.drain_commands(), [InverterCommand::Stop]);
    assert!(!h.service.power_on());
    assert_eq!(h.service.drain_phase(), DrainPhase::Idle);
    assert_eq!(h.panel.leds, LedIntents::ALL_OFF);
}

// ── Frequency adjustment ──────────────────────────────────────

#[test]
fn five_increase_clicks_raise_the_setpoint_by_five() {
    let mut h = Harness::new();
    h.power_on();

    for _ in 0..5 {
        h.click(ButtonId::Increase);
    }

    assert_eq!(h.service.frequency(), 15);
    assert_eq!(
        h.drain_commands(),
        [
            InverterCommand::Velocidade(11),
            InverterCommand::Velocidade(12),
            InverterCommand::Velocidade(13),
            InverterCommand::Velocidade(14),
            InverterCommand::Velocidade(15),
        ]
    );
}

#[test]
fn holding_increase_auto_repeats() {
    let mut h = Harness::new();
    h.power_on();

    // Held for ~2 s: one repeat after the 600 ms delay, then one every
    // 150 ms.  Release after a repeat must not add a short click.
    h.hold(ButtonId::Increase, 2000);

    let freq = h.service.frequency();
    assert!(
        (15..=22).contains(&freq),
        "expected roughly (2000-600)/150 ≈ 9 repeats, got freq {}",
        freq
    );

    let cmds = h.drain_commands();
    let expected: Vec<_> = (11..=freq).map(InverterCommand::Velocidade).collect();
    assert_eq!(cmds, expected, "strictly rising setpoints, nothing extra");
}

#[test]
fn setpoint_never_escapes_the_configured_bounds() {
    let mut h = Harness::new();
    h.power_on();

    h.hold(ButtonId::Increase, 15_000);
    assert_eq!(h.service.frequency(), 60);

    h.hold(ButtonId::Decrease, 15_000);
    assert_eq!(h.service.frequency(), 10);

    h.drain_commands();
    h.click(ButtonId::Decrease);
    assert!(h.drain_commands().is_empty(), "no VELOCIDADE at the floor");
}

// ── Exhaust memory ────────────────────────────────────────────

#[test]
fn exhaust_round_trip_restores_climatize() {
    let mut h = Harness::new();
    h.power_on();
    h.click(ButtonId::Climatize);
    h.drain_commands();

    h.click(ButtonId::Exhaust);
    assert_eq!(h.drain_commands(), [InverterCommand::Exaustao(true)]);
    assert!(h.panel.leds.exhaust && !h.panel.leds.climatize);

    h.click(ButtonId::Exhaust);
    assert_eq!(
        h.drain_commands(),
        [InverterCommand::Exaustao(false), InverterCommand::Bomba(true)]
    );
    assert!(h.panel.leds.climatize && !h.panel.leds.exhaust);
}

// ── Menu ──────────────────────────────────────────────────────

#[test]
fn set_enters_menu_and_long_press_leaves_it() {
    let mut h = Harness::new();
    h.power_on();

    h.click(ButtonId::Set);
    assert_eq!(h.service.ui_mode(), UiMode::Menu);

    // Adjustments inside the menu never reach the inverter.
    h.click(ButtonId::Increase);
    assert!(h.drain_commands().is_empty());
    assert_eq!(h.service.frequency(), 10);

    h.hold(ButtonId::Set, 2000);
    assert_eq!(h.service.ui_mode(), UiMode::Operating);
}

#[test]
fn short_set_hold_below_threshold_still_counts_as_click() {
    let mut h = Harness::new();
    h.power_on();
    // 800 ms < 1500 ms long-press threshold: enters the menu.
    h.hold(ButtonId::Set, 800);
    assert_eq!(h.service.ui_mode(), UiMode::Menu);
}

// ── Factory reset ─────────────────────────────────────────────

#[test]
fn factory_reset_requires_the_full_hold() {
    let mut h = Harness::new();
    h.power_on();

    h.hold(ButtonId::FactoryReset, 3000);
    assert!(!h.sink.events.contains(&AppEvent::FactoryResetRequested));

    // Wire the outcome to a reset port the way the control loop does.
    let mut reset = MockReset::new();
    h.panel.levels[ButtonId::FactoryReset as usize] = true;
    for _ in 0..600 {
        if h.tick().factory_reset {
            reset.factory_reset();
            break;
        }
    }
    assert_eq!(reset.resets, 1, "5 s hold must trigger the reset request");
    assert!(h.sink.events.contains(&AppEvent::FactoryResetRequested));
}

#[test]
fn bouncy_button_produces_a_single_click() {
    let mut h = Harness::new();
    h.power_on();

    // 30 ms of chatter before the level finally settles pressed.
    for _ in 0..3 {
        h.panel.levels[ButtonId::Swing as usize] = true;
        h.tick();
        h.panel.levels[ButtonId::Swing as usize] = false;
        h.tick();
    }
    h.panel.levels[ButtonId::Swing as usize] = true;
    h.run_ms(100);
    h.panel.levels[ButtonId::Swing as usize] = false;
    h.run_ms(100);

    assert_eq!(h.drain_commands(), [InverterCommand::Swing(true)]);
}
