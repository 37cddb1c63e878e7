//! Outbound application events.
//!
//! The controller and [`HmiService`](super::service::HmiService) emit these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them — log to serial, render on a
//! future display, etc.

use crate::controller::DrainPhase;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The HMI service has started.
    Started,

    /// The unit was switched on (`true`) or off (`false`).
    PowerChanged(bool),

    /// The inverter frequency setpoint changed (Hz).
    FrequencyChanged(u8),

    /// The drain hand-shake moved between phases.
    DrainPhaseChanged { from: DrainPhase, to: DrainPhase },

    /// Settings-menu navigation or adjustment.
    Menu(MenuAction),

    /// The factory-reset button was held; the reset port will be invoked.
    FactoryResetRequested,
}

/// Menu interactions surfaced to external collaborators.  Parameter values
/// themselves live outside the core — the panel only reports navigation
/// and adjustment intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Entered,
    Exited,
    /// The selection cursor moved to this parameter slot.
    SlotSelected(u8),
    /// The selected slot was nudged up (+1) or down (-1).
    Adjust { slot: u8, delta: i8 },
}
