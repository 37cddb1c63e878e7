//! System configuration parameters
//!
//! All tunable parameters for the HMI panel: input timing policy, frequency
//! bounds, and control-loop cadence.  Values can be overridden via NVS.

use serde::{Deserialize, Serialize};

/// Core panel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HmiConfig {
    // --- Input timing ---
    /// Debounce quiet period (milliseconds).  A raw level must hold this
    /// long without changing before it counts as a stable edge.
    pub debounce_ms: u32,
    /// Hold time for a Set long-press (milliseconds)
    pub long_press_ms: u32,
    /// Hold time for the factory-reset button (milliseconds)
    pub factory_reset_hold_ms: u32,
    /// Delay before auto-repeat starts on Increase/Decrease (milliseconds)
    pub repeat_delay_ms: u32,
    /// Interval between auto-repeat firings (milliseconds)
    pub repeat_rate_ms: u32,

    // --- Inverter frequency ---
    /// Lowest commandable inverter frequency (Hz)
    pub freq_min: u8,
    /// Highest commandable inverter frequency (Hz)
    pub freq_max: u8,

    // --- Menu ---
    /// Number of editable parameter slots in the settings menu
    pub menu_param_slots: u8,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
}

impl Default for HmiConfig {
    fn default() -> Self {
        Self {
            // Input timing
            debounce_ms: 50,
            long_press_ms: 1500,
            factory_reset_hold_ms: 5000,
            repeat_delay_ms: 600,
            repeat_rate_ms: 150,

            // Frequency bounds
            freq_min: 10,
            freq_max: 60,

            // Menu
            menu_param_slots: 4,

            // Timing
            control_loop_interval_ms: 10, // 100 Hz panel scan
        }
    }
}
