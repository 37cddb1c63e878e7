//! Mock hardware adapters for integration tests.
//!
//! The panel mock lets a test script raw button levels tick by tick; the
//! link mock records every outbound command and feeds scripted
//! confirmation symbols back.  A harness drives the full service with a
//! synthetic millisecond clock so debounce and gesture timing behave
//! exactly as on hardware.

use std::collections::VecDeque;

use climahmi::app::commands::InverterCommand;
use climahmi::app::events::AppEvent;
use climahmi::app::ports::{EventSink, InputPort, InverterPort, PanelPort, ResetPort};
use climahmi::app::service::{HmiService, TickOutcome};
use climahmi::config::HmiConfig;
use climahmi::controller::LedIntents;
use climahmi::input::{ButtonId, RawLevels};

// ── MockPanel ─────────────────────────────────────────────────

/// Scriptable button levels in, recorded LED intents out.
pub struct MockPanel {
    pub levels: RawLevels,
    pub leds: LedIntents,
}

impl MockPanel {
    pub fn new() -> Self {
        Self {
            levels: [false; ButtonId::COUNT],
            leds: LedIntents::ALL_OFF,
        }
    }
}

impl InputPort for MockPanel {
    fn read_buttons(&mut self) -> RawLevels {
        self.levels
    }
}

impl PanelPort for MockPanel {
    fn apply_leds(&mut self, intents: &LedIntents) {
        self.leds = *intents;
    }
}

// ── MockInverterLink ──────────────────────────────────────────

/// Records every command; hands out scripted confirmation symbols.
pub struct MockInverterLink {
    pub sent: Vec<InverterCommand>,
    pub rx: VecDeque<char>,
}

impl MockInverterLink {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            rx: VecDeque::new(),
        }
    }
}

impl InverterPort for MockInverterLink {
    fn send(&mut self, cmd: InverterCommand) {
        self.sent.push(cmd);
    }

    fn poll_confirmation(&mut self) -> Option<char> {
        self.rx.pop_front()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── MockReset ─────────────────────────────────────────────────

/// Records factory-reset invocations instead of restarting anything.
pub struct MockReset {
    pub resets: u32,
}

#[allow(dead_code)]
impl MockReset {
    pub fn new() -> Self {
        Self { resets: 0 }
    }
}

impl ResetPort for MockReset {
    fn factory_reset(&mut self) {
        self.resets += 1;
    }
}

// ── Harness ───────────────────────────────────────────────────

/// Drives the full service with a synthetic clock at the configured tick
/// cadence.  Button helpers hold levels long enough to clear debounce.
pub struct Harness {
    pub service: HmiService,
    pub panel: MockPanel,
    pub link: MockInverterLink,
    pub sink: RecordingSink,
    pub now_ms: u32,
    tick_ms: u32,
    settle_ticks: u32,
}

#[allow(dead_code)]
impl Harness {
    pub fn new() -> Self {
        Self::with_config(&HmiConfig::default())
    }

    pub fn with_config(config: &HmiConfig) -> Self {
        let mut service = HmiService::new(config);
        let mut sink = RecordingSink::new();
        service.start(&mut sink);
        Self {
            service,
            panel: MockPanel::new(),
            link: MockInverterLink::new(),
            sink,
            now_ms: 0,
            tick_ms: config.control_loop_interval_ms,
            // Enough ticks past the debounce window for an edge to settle.
            settle_ticks: config.debounce_ms / config.control_loop_interval_ms + 2,
        }
    }

    /// Advance the clock one tick and run the service.
    pub fn tick(&mut self) -> TickOutcome {
        self.now_ms += self.tick_ms;
        self.service
            .tick(self.now_ms, &mut self.panel, &mut self.link, &mut self.sink)
    }

    pub fn run_ticks(&mut self, n: u32) {
        for _ in 0..n {
            self.tick();
        }
    }

    pub fn run_ms(&mut self, ms: u32) {
        self.run_ticks(ms / self.tick_ms);
    }

    fn set_level(&mut self, id: ButtonId, asserted: bool) {
        self.panel.levels[id as usize] = asserted;
    }

    /// Press, settle, release, settle — one debounced short click.
    pub fn click(&mut self, id: ButtonId) {
        self.set_level(id, true);
        self.run_ticks(self.settle_ticks);
        self.set_level(id, false);
        self.run_ticks(self.settle_ticks);
    }

    /// Hold a button for `ms`, then release and settle.
    pub fn hold(&mut self, id: ButtonId, ms: u32) {
        self.set_level(id, true);
        self.run_ms(ms);
        self.set_level(id, false);
        self.run_ticks(self.settle_ticks);
    }

    /// Queue an inbound confirmation symbol and let the next tick poll it.
    pub fn confirm(&mut self, symbol: char) {
        self.link.rx.push_back(symbol);
        self.tick();
    }

    /// Take every command sent since the last call.
    pub fn drain_commands(&mut self) -> Vec<InverterCommand> {
        std::mem::take(&mut self.link.sent)
    }

    pub fn power_on(&mut self) {
        self.click(ButtonId::Power);
        assert!(self.service.power_on(), "power-on click did not register");
        self.drain_commands();
    }
}
