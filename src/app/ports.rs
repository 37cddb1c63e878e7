//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ HmiService (domain)
//! ```
//!
//! Driven adapters (GPIO panel, UART link, NVS, event sinks) implement
//! these traits.  The [`HmiService`](super::service::HmiService) consumes
//! them via generics, so the domain core never touches hardware directly.

use crate::app::commands::InverterCommand;
use crate::config::HmiConfig;
use crate::controller::LedIntents;
use crate::input::RawLevels;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: panel hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick to obtain a raw
/// level snapshot of every button (`true` = electrically asserted).
/// The adapter folds active-low wiring into the booleans.
pub trait InputPort {
    fn read_buttons(&mut self) -> RawLevels;
}

// ───────────────────────────────────────────────────────────────
// Panel port (driven adapter: domain → indicator LEDs)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain hands over the desired on/off value of
/// every indicator each tick; the adapter owns the pin drive (and the
/// active-low inversion).
pub trait PanelPort {
    fn apply_leds(&mut self, intents: &LedIntents);
}

// ───────────────────────────────────────────────────────────────
// Inverter link port (domain ↔ inverter module)
// ───────────────────────────────────────────────────────────────

/// The command/confirmation channel to the external inverter module.
///
/// `poll_confirmation` must be non-blocking and is called exactly once per
/// tick: the control loop has to keep servicing the Power-abort path while
/// a drain cycle waits for the module to answer.  At most one pending
/// symbol is ever delivered; older unread symbols may be dropped.
pub trait InverterPort {
    /// Queue a command for transmission.  Transmission failures are the
    /// adapter's problem (log and drop) — the core never retries.
    fn send(&mut self, cmd: InverterCommand);

    /// Fetch the next confirmation symbol, if one arrived.
    fn poll_confirmation(&mut self) -> Option<char>;
}

// ───────────────────────────────────────────────────────────────
// Reset port (irreversible factory reset)
// ───────────────────────────────────────────────────────────────

/// Erase persistent storage and restart the device.
///
/// On hardware this call does not return; mock implementations record the
/// request instead.  After it is invoked no further control ticks are
/// guaranteed to execute.
pub trait ResetPort {
    fn factory_reset(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, display,
/// etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists panel configuration.
///
/// Implementations MUST validate config values before persisting.  Invalid
/// ranges are rejected with [`ConfigError::ValidationFailed`], not silently
/// clamped — a corrupted blob must not be able to disable debouncing or
/// invert the frequency bounds.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`HmiConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<HmiConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &HmiConfig) -> Result<(), ConfigError>;
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
