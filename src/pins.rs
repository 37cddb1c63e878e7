//! GPIO / peripheral pin assignments for the climatizador HMI panel board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! Buttons are momentary switches to ground with internal pull-ups enabled,
//! so the electrical "asserted" level is LOW.  Panel LEDs are driven through
//! sink transistors and are likewise active-LOW.

use crate::controller::LedId;
use crate::input::ButtonId;

// ---------------------------------------------------------------------------
// Front-panel buttons (active-low, internal pull-up)
// ---------------------------------------------------------------------------

/// Button GPIO numbers, indexed by `ButtonId as usize`.
pub const BTN_GPIOS: [i32; ButtonId::COUNT] = [
    32, // Increase
    33, // Decrease
    25, // Climatize
    26, // Ventilate
    27, // Drain
    14, // Swing
    12, // Exhaust
    13, // Power
    4,  // Set
    5,  // FactoryReset
];

// ---------------------------------------------------------------------------
// Panel indicator LEDs (active-low, sink-driven)
// ---------------------------------------------------------------------------

/// Indicator GPIO numbers, indexed by `LedId as usize`.
pub const LED_GPIOS: [i32; LedId::COUNT] = [
    18, // Swing
    19, // Drain
    21, // Climatize
    22, // Ventilate
    23, // Exhaust
];

// ---------------------------------------------------------------------------
// Inverter-module UART link
// ---------------------------------------------------------------------------

/// UART port connected to the inverter module (UART0, shared with the
/// console on the current board revision).
pub const INVERTER_UART: u32 = 0;
pub const INVERTER_UART_BAUD: u32 = 115_200;
