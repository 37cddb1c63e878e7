//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future display adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::{AppEvent, MenuAction};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | panel ready"),
            AppEvent::PowerChanged(on) => {
                info!("POWER | {}", if *on { "ON" } else { "OFF" });
            }
            AppEvent::FrequencyChanged(hz) => info!("FREQ  | {} Hz", hz),
            AppEvent::DrainPhaseChanged { from, to } => {
                info!("DRENO | {:?} -> {:?}", from, to);
            }
            AppEvent::Menu(action) => match action {
                MenuAction::Entered => info!("MENU  | entered"),
                MenuAction::Exited => info!("MENU  | exited"),
                MenuAction::SlotSelected(slot) => info!("MENU  | slot {}", slot),
                MenuAction::Adjust { slot, delta } => {
                    info!("MENU  | slot {} {}", slot, if *delta > 0 { "UP" } else { "DOWN" });
                }
            },
            AppEvent::FactoryResetRequested => {
                warn!("RESET | factory reset requested");
            }
        }
    }
}
