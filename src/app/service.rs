//! Application service — the hexagonal core.
//!
//! [`HmiService`] owns the input classifier and the appliance controller
//! and exposes a clean, hardware-agnostic per-tick API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!   InputPort ──▶ ┌──────────────────────────────┐ ──▶ InverterPort
//!                 │          HmiService           │
//!   PanelPort ◀── │  InputClassifier · Controller │ ──▶ EventSink
//!                 └──────────────────────────────┘
//! ```

use log::info;

use crate::config::HmiConfig;
use crate::controller::{ApplianceController, CommandBuf, DrainPhase, LedIntents, UiMode};
use crate::input::InputClassifier;

use super::events::AppEvent;
use super::ports::{EventSink, InputPort, InverterPort, PanelPort};

/// What the control loop must act on after a tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickOutcome {
    /// Invoke [`ResetPort::factory_reset`](super::ports::ResetPort::factory_reset);
    /// no further ticks are expected afterwards.
    pub factory_reset: bool,
}

/// The application service orchestrates one full control cycle per tick.
pub struct HmiService {
    classifier: InputClassifier,
    controller: ApplianceController,
    tick_count: u64,
}

impl HmiService {
    /// Construct the service from configuration.
    pub fn new(config: &HmiConfig) -> Self {
        Self {
            classifier: InputClassifier::new(config),
            controller: ApplianceController::new(config),
            tick_count: 0,
        }
    }

    /// Announce startup.  The appliance begins powered off with all
    /// indicators dark; no commands are sent until the operator acts.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!("HmiService started (powered off, freq {})", self.frequency());
    }

    /// Run one full control cycle:
    /// read buttons → classify → poll confirmation → controller step →
    /// flush commands → apply LED intents.
    ///
    /// `now_ms` must be monotonically non-decreasing across calls.
    /// The `panel` parameter satisfies **both** [`InputPort`] and
    /// [`PanelPort`] — this avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u32,
        panel: &mut (impl InputPort + PanelPort),
        link: &mut impl InverterPort,
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        self.tick_count += 1;

        // 1. Sample and classify the panel buttons.
        let raw = panel.read_buttons();
        let events = self.classifier.sample(&raw, now_ms);

        // 2. Confirmation channel: polled once per tick regardless of
        // drain phase (at-most-one-pending-symbol contract).
        let confirmation = link.poll_confirmation();

        // 3. Appliance state machine.
        let mut commands = CommandBuf::new();
        let step = self
            .controller
            .step(&events, confirmation, &mut commands, sink);

        // 4. Flush outbound commands in emission order.
        for cmd in &commands {
            link.send(*cmd);
        }

        // 5. Indicator refresh — full re-derivation every tick.
        panel.apply_leds(&self.controller.led_intents());

        TickOutcome {
            factory_reset: step.factory_reset,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current desired indicator states.
    pub fn led_intents(&self) -> LedIntents {
        self.controller.led_intents()
    }

    pub fn power_on(&self) -> bool {
        self.controller.power_on()
    }

    pub fn ui_mode(&self) -> UiMode {
        self.controller.ui_mode()
    }

    pub fn frequency(&self) -> u8 {
        self.controller.frequency()
    }

    pub fn drain_phase(&self) -> DrainPhase {
        self.controller.drain_phase()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
