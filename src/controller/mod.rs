//! Appliance control state machine.
//!
//! Consumes the per-tick event set from the input classifier and owns every
//! piece of appliance state: power, operating modes (pump / swing /
//! exhaust), inverter frequency, the settings menu, and the drain
//! hand-shake.  Emits typed inverter commands and the desired LED states.
//!
//! ## Dispatch priority (highest first)
//!
//! ```text
//!  1. Power short-click            — always honored, even mid-drain
//!  2. powered off?                 — drop everything else
//!  3. drain cycle active?          — only the confirmation channel advances
//!  4. factory-reset hold
//!  5. Set (menu enter/exit/cycle)
//!  6. Increase / Decrease
//!  7. Exhaust   8. Climatize   9. Ventilate   10. Swing   11. Drain
//! ```
//!
//! ## Drain hand-shake
//!
//! ```text
//!  IDLE ──[Drain click]──▶ AWAITING ──['L' from MI]──▶ IN_PROGRESS
//!    ▲                        │                            │
//!    │◀──[Power click]────────┘◀────────[Power click]──────┤
//!    └────────────['F' from MI → power off]────────────────┘
//! ```
//!
//! While the hand-shake is anywhere but IDLE, every event except the Power
//! click is dropped unprocessed — drained water and a running pump do not
//! mix, and the panel must stay inert until the module reports completion.

use heapless::Vec;
use log::{info, warn};

use crate::app::commands::InverterCommand;
use crate::app::events::{AppEvent, MenuAction};
use crate::app::ports::EventSink;
use crate::config::HmiConfig;
use crate::input::{ButtonEvent, ButtonId};

// ---------------------------------------------------------------------------
// State vocabulary
// ---------------------------------------------------------------------------

/// Top-level UI mode.  Menu mode reroutes Set/Increase/Decrease; everything
/// else behaves identically in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Operating,
    Menu,
}

/// Phase of the condensate-drain hand-shake with the inverter module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainPhase {
    /// No drain cycle active.
    Idle,
    /// Drain requested; waiting for the module's start confirmation ('L').
    AwaitingConfirmation,
    /// Module confirmed; draining until the finish confirmation ('F').
    InProgress,
}

/// Panel indicator identity.
/// Must stay in sync with the pin table in [`crate::pins::LED_GPIOS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LedId {
    Swing = 0,
    Drain = 1,
    Climatize = 2,
    Ventilate = 3,
    Exhaust = 4,
}

impl LedId {
    pub const COUNT: usize = 5;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Swing,
        Self::Drain,
        Self::Climatize,
        Self::Ventilate,
        Self::Exhaust,
    ];
}

/// Desired on/off value per indicator, re-derived from scratch every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedIntents {
    pub swing: bool,
    pub drain: bool,
    pub climatize: bool,
    pub ventilate: bool,
    pub exhaust: bool,
}

impl LedIntents {
    pub const ALL_OFF: Self = Self {
        swing: false,
        drain: false,
        climatize: false,
        ventilate: false,
        exhaust: false,
    };

    pub fn get(&self, id: LedId) -> bool {
        match id {
            LedId::Swing => self.swing,
            LedId::Drain => self.drain,
            LedId::Climatize => self.climatize,
            LedId::Ventilate => self.ventilate,
            LedId::Exhaust => self.exhaust,
        }
    }
}

/// Per-tick outbound command buffer.  Sized for the worst-case tick
/// (several buttons released in the same scan, each emitting up to two
/// commands).
pub type CommandBuf = Vec<InverterCommand, 16>;

/// What the service must do after a step, beyond flushing commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepOutcome {
    /// The factory-reset hold was honored; invoke the reset port.
    pub factory_reset: bool,
}

// ---------------------------------------------------------------------------
// ApplianceController
// ---------------------------------------------------------------------------

/// The appliance state machine.  Created once at startup; mutated
/// exclusively by [`step`](Self::step) for the life of the process.
pub struct ApplianceController {
    power_on: bool,
    ui_mode: UiMode,
    /// Inverter setpoint, clamped to `[freq_min, freq_max]`.
    frequency: u8,

    pump_on: bool,
    swing_on: bool,
    exhaust_on: bool,
    /// Snapshot of `pump_on` taken when exhaust mode is entered, restored on
    /// exit.  Meaningful only while `exhaust_on` is true.
    saved_pump_on: bool,

    drain_phase: DrainPhase,

    /// Selected parameter slot while in Menu mode.
    menu_slot: u8,

    freq_min: u8,
    freq_max: u8,
    menu_param_slots: u8,
}

impl ApplianceController {
    pub fn new(config: &HmiConfig) -> Self {
        Self {
            power_on: false,
            ui_mode: UiMode::Operating,
            frequency: config.freq_min,
            pump_on: false,
            swing_on: false,
            exhaust_on: false,
            saved_pump_on: false,
            drain_phase: DrainPhase::Idle,
            menu_slot: 0,
            freq_min: config.freq_min,
            freq_max: config.freq_max,
            menu_param_slots: config.menu_param_slots.max(1),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn power_on(&self) -> bool {
        self.power_on
    }

    pub fn ui_mode(&self) -> UiMode {
        self.ui_mode
    }

    pub fn frequency(&self) -> u8 {
        self.frequency
    }

    pub fn pump_on(&self) -> bool {
        self.pump_on
    }

    pub fn swing_on(&self) -> bool {
        self.swing_on
    }

    pub fn exhaust_on(&self) -> bool {
        self.exhaust_on
    }

    pub fn drain_phase(&self) -> DrainPhase {
        self.drain_phase
    }

    pub fn menu_slot(&self) -> u8 {
        self.menu_slot
    }

    // ── Per-tick step ─────────────────────────────────────────

    /// Apply one tick's worth of events and the optional inbound
    /// confirmation symbol.  Commands for the inverter module are pushed
    /// into `out` in emission order.
    ///
    /// Illegal events (mode clicks while off, anything but Power while
    /// draining) are dropped silently — they do not queue for later ticks.
    pub fn step(
        &mut self,
        events: &[ButtonEvent],
        confirmation: Option<char>,
        out: &mut CommandBuf,
        sink: &mut impl EventSink,
    ) -> StepOutcome {
        let mut outcome = StepOutcome::default();

        // 1. Power — highest priority, effective in every phase.
        if clicked(events, ButtonId::Power) {
            self.toggle_power(out, sink);
        }

        // 2. Powered off: every other event this tick is dropped.
        if !self.power_on {
            return outcome;
        }

        // 3. Drain gate: only the confirmation channel advances state.
        if self.drain_phase != DrainPhase::Idle {
            self.advance_drain(confirmation, out, sink);
            return outcome;
        }

        // 4. Factory reset.
        if events.contains(&ButtonEvent::FactoryResetHold) {
            warn!("factory reset requested from panel");
            sink.emit(&AppEvent::FactoryResetRequested);
            outcome.factory_reset = true;
            return outcome;
        }

        // 5. Set: menu enter / exit / cycle.
        self.handle_set(events, sink);

        // 6. Increase / Decrease.
        self.handle_adjust(events, ButtonId::Increase, 1, out, sink);
        self.handle_adjust(events, ButtonId::Decrease, -1, out, sink);

        // 7. Exhaust toggle (with pump memory).
        if clicked(events, ButtonId::Exhaust) {
            self.toggle_exhaust(out);
        }

        // 8. Climatize / 9. Ventilate.
        if clicked(events, ButtonId::Climatize) {
            self.select_pump_mode(true, out);
        }
        if clicked(events, ButtonId::Ventilate) {
            self.select_pump_mode(false, out);
        }

        // 10. Swing toggle.
        if clicked(events, ButtonId::Swing) {
            self.swing_on = !self.swing_on;
            push(out, InverterCommand::Swing(self.swing_on));
        }

        // 11. Drain request (phase is Idle here by the gate above).
        if clicked(events, ButtonId::Drain) {
            self.request_drain(out, sink);
        }

        // A confirmation arriving on the same tick as the request is
        // honored — the channel is polled once per tick regardless of phase.
        if self.drain_phase != DrainPhase::Idle {
            self.advance_drain(confirmation, out, sink);
        }

        outcome
    }

    /// Desired indicator states — a pure function of the current state.
    pub fn led_intents(&self) -> LedIntents {
        if !self.power_on {
            return LedIntents::ALL_OFF;
        }

        // An active drain cycle overrides everything: only its own
        // indicator may be lit.
        if self.drain_phase != DrainPhase::Idle {
            return LedIntents {
                drain: true,
                ..LedIntents::ALL_OFF
            };
        }

        LedIntents {
            swing: self.swing_on,
            drain: false,
            climatize: self.pump_on && !self.exhaust_on,
            ventilate: !self.pump_on && !self.exhaust_on,
            exhaust: self.exhaust_on,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn toggle_power(&mut self, out: &mut CommandBuf, sink: &mut impl EventSink) {
        self.power_on = !self.power_on;
        if self.power_on {
            info!("power ON");
            push(out, InverterCommand::Start);
        } else {
            info!("power OFF — all modes cleared");
            self.pump_on = false;
            self.swing_on = false;
            self.exhaust_on = false;
            if self.drain_phase != DrainPhase::Idle {
                let from = self.drain_phase;
                self.drain_phase = DrainPhase::Idle;
                sink.emit(&AppEvent::DrainPhaseChanged {
                    from,
                    to: DrainPhase::Idle,
                });
            }
            push(out, InverterCommand::Stop);
        }
        sink.emit(&AppEvent::PowerChanged(self.power_on));
    }

    fn handle_set(&mut self, events: &[ButtonEvent], sink: &mut impl EventSink) {
        if events.contains(&ButtonEvent::LongPress(ButtonId::Set)) {
            if self.ui_mode == UiMode::Menu {
                info!("menu exit");
                self.ui_mode = UiMode::Operating;
                self.menu_slot = 0;
                sink.emit(&AppEvent::Menu(MenuAction::Exited));
            }
        } else if clicked(events, ButtonId::Set) {
            match self.ui_mode {
                UiMode::Operating => {
                    info!("menu enter");
                    self.ui_mode = UiMode::Menu;
                    self.menu_slot = 0;
                    sink.emit(&AppEvent::Menu(MenuAction::Entered));
                }
                UiMode::Menu => {
                    self.menu_slot = (self.menu_slot + 1) % self.menu_param_slots;
                    sink.emit(&AppEvent::Menu(MenuAction::SlotSelected(self.menu_slot)));
                }
            }
        }
    }

    fn handle_adjust(
        &mut self,
        events: &[ButtonEvent],
        id: ButtonId,
        delta: i8,
        out: &mut CommandBuf,
        sink: &mut impl EventSink,
    ) {
        let short = clicked(events, id);
        let repeat = events.contains(&ButtonEvent::Repeat(id));
        if !short && !repeat {
            return;
        }

        match self.ui_mode {
            UiMode::Operating => {
                let next = (i16::from(self.frequency) + i16::from(delta))
                    .clamp(i16::from(self.freq_min), i16::from(self.freq_max))
                    as u8;
                // Only an actual change goes on the wire.
                if next != self.frequency {
                    self.frequency = next;
                    push(out, InverterCommand::Velocidade(next));
                    sink.emit(&AppEvent::FrequencyChanged(next));
                }
            }
            UiMode::Menu => {
                // Single step per click: auto-repeat does not apply to
                // menu parameter editing.
                if short {
                    sink.emit(&AppEvent::Menu(MenuAction::Adjust {
                        slot: self.menu_slot,
                        delta,
                    }));
                }
            }
        }
    }

    fn toggle_exhaust(&mut self, out: &mut CommandBuf) {
        if self.exhaust_on {
            self.exhaust_on = false;
            self.pump_on = self.saved_pump_on;
            // Re-sync order matters: the module must see exhaust drop
            // before the pump command that restores the previous mode.
            push(out, InverterCommand::Exaustao(false));
            push(out, InverterCommand::Bomba(self.pump_on));
        } else {
            self.saved_pump_on = self.pump_on;
            self.exhaust_on = true;
            self.pump_on = false;
            push(out, InverterCommand::Exaustao(true));
        }
    }

    /// Climatize (`pump = true`) or Ventilate (`pump = false`).  Either one
    /// kicks the unit out of exhaust mode first.
    fn select_pump_mode(&mut self, pump: bool, out: &mut CommandBuf) {
        if self.exhaust_on {
            self.exhaust_on = false;
            push(out, InverterCommand::Exaustao(false));
        }
        self.pump_on = pump;
        push(out, InverterCommand::Bomba(pump));
    }

    fn request_drain(&mut self, out: &mut CommandBuf, sink: &mut impl EventSink) {
        warn!("drain cycle requested — modes cleared, panel locked");
        push(out, InverterCommand::SolicitarDreno);
        // Fail-safe: no mode may run concurrently with a drain cycle.
        self.pump_on = false;
        self.swing_on = false;
        self.exhaust_on = false;
        self.drain_phase = DrainPhase::AwaitingConfirmation;
        sink.emit(&AppEvent::DrainPhaseChanged {
            from: DrainPhase::Idle,
            to: DrainPhase::AwaitingConfirmation,
        });
    }

    /// Interpret the inbound confirmation symbol while a drain cycle is
    /// active.  Unrecognized symbols are ignored.
    fn advance_drain(
        &mut self,
        confirmation: Option<char>,
        out: &mut CommandBuf,
        sink: &mut impl EventSink,
    ) {
        let Some(ch) = confirmation else { return };

        match (self.drain_phase, ch.to_ascii_uppercase()) {
            (DrainPhase::AwaitingConfirmation, 'L') => {
                info!("MI confirmed drain start");
                self.drain_phase = DrainPhase::InProgress;
                sink.emit(&AppEvent::DrainPhaseChanged {
                    from: DrainPhase::AwaitingConfirmation,
                    to: DrainPhase::InProgress,
                });
            }
            (DrainPhase::InProgress, 'F') => {
                warn!("MI reports drain finished — powering off");
                self.drain_phase = DrainPhase::Idle;
                self.power_on = false;
                push(out, InverterCommand::Stop);
                sink.emit(&AppEvent::DrainPhaseChanged {
                    from: DrainPhase::InProgress,
                    to: DrainPhase::Idle,
                });
                sink.emit(&AppEvent::PowerChanged(false));
            }
            _ => {}
        }
    }
}

/// Shorthand: did this tick carry a short click of `id`?
fn clicked(events: &[ButtonEvent], id: ButtonId) -> bool {
    events.contains(&ButtonEvent::ShortClick(id))
}

/// Push a command, logging if the per-tick buffer would overflow (the
/// capacity covers the worst legal tick, so this indicates a logic bug).
fn push(out: &mut CommandBuf, cmd: InverterCommand) {
    if out.push(cmd).is_err() {
        warn!("command buffer full, dropping {:?}", cmd);
    }
}
