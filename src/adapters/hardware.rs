//! Panel hardware adapter — bridges the button/LED GPIOs to the domain
//! port traits.
//!
//! This is the only module in the system that knows the panel's electrical
//! polarity: buttons are momentary switches to ground (pressed = LOW) and
//! the indicators are sink-driven (lit = LOW).  Both are folded into plain
//! logical booleans at this boundary, so the domain core never sees a raw
//! level.  On non-espidf targets the underlying GPIO calls are simulation
//! stubs.

use crate::app::ports::{InputPort, PanelPort};
use crate::controller::{LedId, LedIntents};
use crate::drivers::hw_init;
use crate::input::{ButtonId, RawLevels};
use crate::pins;

/// Concrete adapter that owns the panel GPIO bank.
pub struct PanelAdapter;

impl PanelAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PanelAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for PanelAdapter {
    fn read_buttons(&mut self) -> RawLevels {
        let mut raw = [false; ButtonId::COUNT];
        for (i, &pin) in pins::BTN_GPIOS.iter().enumerate() {
            // Active-low: a pressed button pulls the pin to ground.
            raw[i] = !hw_init::gpio_read(pin);
        }
        raw
    }
}

// ── PanelPort implementation ──────────────────────────────────

impl PanelPort for PanelAdapter {
    fn apply_leds(&mut self, intents: &LedIntents) {
        for id in LedId::ALL {
            // Active-low: drive the pin LOW to light the indicator.
            hw_init::gpio_write(pins::LED_GPIOS[id as usize], !intents.get(id));
        }
    }
}
