//! Front-panel input handling.
//!
//! [`classifier`] turns raw per-tick GPIO level snapshots into debounced,
//! classified button events.  The rest of the system only ever sees
//! [`ButtonEvent`]s — never raw levels.

pub mod classifier;

pub use classifier::{InputClassifier, RawLevels};

// ---------------------------------------------------------------------------
// Button identity
// ---------------------------------------------------------------------------

/// The fixed set of front-panel buttons.
/// Must stay in sync with the pin table in [`crate::pins::BTN_GPIOS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ButtonId {
    Increase = 0,
    Decrease = 1,
    Climatize = 2,
    Ventilate = 3,
    Drain = 4,
    Swing = 5,
    Exhaust = 6,
    Power = 7,
    Set = 8,
    FactoryReset = 9,
}

impl ButtonId {
    /// Total number of buttons — used to size per-button state arrays.
    pub const COUNT: usize = 10;

    /// All buttons, in scan order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Increase,
        Self::Decrease,
        Self::Climatize,
        Self::Ventilate,
        Self::Drain,
        Self::Swing,
        Self::Exhaust,
        Self::Power,
        Self::Set,
        Self::FactoryReset,
    ];

    /// Convert a scan index back to `ButtonId`.  Panics on out-of-range in
    /// debug builds; returns `Power` in release (safe fallback — Power is
    /// always a legal event source).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Increase,
            1 => Self::Decrease,
            2 => Self::Climatize,
            3 => Self::Ventilate,
            4 => Self::Drain,
            5 => Self::Swing,
            6 => Self::Exhaust,
            7 => Self::Power,
            8 => Self::Set,
            9 => Self::FactoryReset,
            _ => {
                debug_assert!(false, "invalid button index: {idx}");
                Self::Power
            }
        }
    }

    /// The timing/gesture policy applied to this button.
    pub fn role(self) -> Role {
        match self {
            Self::Increase | Self::Decrease => Role::Adjust,
            Self::Set => Role::SetKey,
            Self::FactoryReset => Role::FactoryReset,
            _ => Role::Momentary,
        }
    }
}

/// Gesture policy classes.  Role determines which hold behaviours apply
/// and whether a button fires on release at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Auto-repeats while held (Increase / Decrease).
    Adjust,
    /// Short click on release, long-press while held (Set).
    SetKey,
    /// Fires only after a long hold; never produces a short click.
    FactoryReset,
    /// Fires a short click on release; no hold behaviour.
    Momentary,
}

// ---------------------------------------------------------------------------
// Classified events
// ---------------------------------------------------------------------------

/// Button events emitted after debounce and gesture classification.
/// At most one event per button per control tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Press-then-release below the long-press threshold.
    ShortClick(ButtonId),
    /// Hold past the long-press threshold (Set only); suppresses the
    /// release click.
    LongPress(ButtonId),
    /// Periodic firing while held (Increase / Decrease only).
    Repeat(ButtonId),
    /// The factory-reset button was held past its threshold.  Distinguished
    /// from a generic long press because it requests an irreversible action.
    FactoryResetHold,
}
