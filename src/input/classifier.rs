//! Debounce + gesture classification for the front-panel buttons.
//!
//! ## Sampling model
//!
//! The panel is polled: every control tick the caller hands in a snapshot
//! of all ten raw levels (`true` = electrically asserted) plus the current
//! monotonic time in milliseconds.  No interrupts, no queues — the
//! classifier is a pure function of (previous state, snapshot, now).
//!
//! ## Debounce
//!
//! Quiet-period debounce: every raw level change restarts the window, so a
//! level only becomes stable after holding unchanged for `debounce_ms`.
//! Chatter that reverts inside the window produces no edge at all.
//!
//! ## Gestures per role
//!
//! | Role          | While held                                   | On release    |
//! |---------------|----------------------------------------------|---------------|
//! | Momentary     | —                                            | `ShortClick`  |
//! | Adjust        | `Repeat` after `repeat_delay_ms`, then every `repeat_rate_ms` | nothing after a repeat, else `ShortClick` |
//! | SetKey        | `LongPress` once past `long_press_ms`        | `ShortClick` if no long press fired |
//! | FactoryReset  | `FactoryResetHold` once past `factory_reset_hold_ms` | never fires |

use heapless::Vec;

use super::{ButtonEvent, ButtonId, Role};
use crate::config::HmiConfig;

/// Per-tick snapshot of all raw button levels, indexed by `ButtonId as usize`.
/// `true` = electrically asserted (the GPIO adapter folds in active-low wiring).
pub type RawLevels = [bool; ButtonId::COUNT];

/// Events produced in one tick.  A button emits at most one event per tick,
/// so the set is bounded by the button count.
pub type EventSet = Vec<ButtonEvent, { ButtonId::COUNT }>;

// ---------------------------------------------------------------------------
// Per-button state
// ---------------------------------------------------------------------------

/// Press lifecycle, modeled as a single tagged enum so that impossible flag
/// combinations (e.g. "release suppressed" while not pressed) cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressPhase {
    /// Not held.
    Idle,
    /// Held; no hold-triggered event has fired yet, so releasing now would
    /// produce a short click.
    Pressed { pressed_at: u32, next_repeat_at: u32 },
    /// Held, and a repeat / long-press / reset-hold already fired — the
    /// eventual release is silent.  Adjust buttons keep repeating from here.
    HoldFired { next_repeat_at: u32 },
}

#[derive(Debug, Clone, Copy)]
struct ButtonState {
    /// Last raw level seen (pre-stability).
    raw_stable: bool,
    /// Timestamp of the most recent raw level change.
    last_edge_ms: u32,
    phase: PressPhase,
}

impl ButtonState {
    const fn new() -> Self {
        Self {
            raw_stable: false,
            last_edge_ms: 0,
            phase: PressPhase::Idle,
        }
    }
}

// ---------------------------------------------------------------------------
// Timing policy (copied out of HmiConfig at construction)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Timing {
    debounce_ms: u32,
    long_press_ms: u32,
    factory_reset_hold_ms: u32,
    repeat_delay_ms: u32,
    repeat_rate_ms: u32,
}

/// `true` when `now` is strictly past `deadline`, tolerant of u32 wrap.
fn past(now: u32, deadline: u32) -> bool {
    (now.wrapping_sub(deadline) as i32) > 0
}

// ---------------------------------------------------------------------------
// InputClassifier
// ---------------------------------------------------------------------------

/// One independent debounce/gesture automaton per physical button.
pub struct InputClassifier {
    buttons: [ButtonState; ButtonId::COUNT],
    timing: Timing,
}

impl InputClassifier {
    pub fn new(config: &HmiConfig) -> Self {
        Self {
            buttons: [ButtonState::new(); ButtonId::COUNT],
            timing: Timing {
                debounce_ms: config.debounce_ms,
                long_press_ms: config.long_press_ms,
                factory_reset_hold_ms: config.factory_reset_hold_ms,
                repeat_delay_ms: config.repeat_delay_ms,
                repeat_rate_ms: config.repeat_rate_ms,
            },
        }
    }

    /// Whether a button is currently considered held (post-debounce).
    pub fn is_pressed(&self, id: ButtonId) -> bool {
        !matches!(self.buttons[id as usize].phase, PressPhase::Idle)
    }

    /// Advance every button by one tick against the raw level snapshot.
    ///
    /// `now_ms` must be monotonically non-decreasing across calls (u32
    /// millisecond wrap is tolerated).  Returns the classified events for
    /// this tick — at most one per button.
    pub fn sample(&mut self, raw: &RawLevels, now_ms: u32) -> EventSet {
        let timing = self.timing;
        let mut events = EventSet::new();

        for (i, st) in self.buttons.iter_mut().enumerate() {
            let id = ButtonId::from_index(i);

            if raw[i] != st.raw_stable {
                st.raw_stable = raw[i];
                st.last_edge_ms = now_ms;
            }

            // Still inside the quiet period — the level is not yet stable.
            if now_ms.wrapping_sub(st.last_edge_ms) < timing.debounce_ms {
                continue;
            }

            let event = if st.raw_stable {
                press_or_hold(&timing, st, id, now_ms)
            } else {
                release(st, id)
            };

            if let Some(ev) = event {
                // Capacity equals the button count and each button yields at
                // most one event, so this push cannot fail.
                let _ = events.push(ev);
            }
        }

        events
    }
}

/// Stable-asserted processing: press edge, then hold-triggered gestures.
fn press_or_hold(
    timing: &Timing,
    st: &mut ButtonState,
    id: ButtonId,
    now: u32,
) -> Option<ButtonEvent> {
    match st.phase {
        PressPhase::Idle => {
            st.phase = PressPhase::Pressed {
                pressed_at: now,
                next_repeat_at: now.wrapping_add(timing.repeat_delay_ms),
            };
            None
        }

        PressPhase::Pressed {
            pressed_at,
            next_repeat_at,
        } => {
            let held_ms = now.wrapping_sub(pressed_at);
            match id.role() {
                Role::FactoryReset if held_ms >= timing.factory_reset_hold_ms => {
                    st.phase = PressPhase::HoldFired { next_repeat_at };
                    Some(ButtonEvent::FactoryResetHold)
                }
                Role::Adjust if past(now, next_repeat_at) => {
                    st.phase = PressPhase::HoldFired {
                        next_repeat_at: now.wrapping_add(timing.repeat_rate_ms),
                    };
                    Some(ButtonEvent::Repeat(id))
                }
                Role::SetKey if held_ms > timing.long_press_ms => {
                    st.phase = PressPhase::HoldFired { next_repeat_at };
                    Some(ButtonEvent::LongPress(id))
                }
                _ => None,
            }
        }

        PressPhase::HoldFired { next_repeat_at } => {
            if id.role() == Role::Adjust && past(now, next_repeat_at) {
                st.phase = PressPhase::HoldFired {
                    next_repeat_at: now.wrapping_add(timing.repeat_rate_ms),
                };
                Some(ButtonEvent::Repeat(id))
            } else {
                None
            }
        }
    }
}

/// Stable-deasserted processing: release edge.
fn release(st: &mut ButtonState, id: ButtonId) -> Option<ButtonEvent> {
    match st.phase {
        PressPhase::Idle => None,
        PressPhase::Pressed { .. } => {
            st.phase = PressPhase::Idle;
            // The reset button signals exclusively through its hold event.
            if id.role() == Role::FactoryReset {
                None
            } else {
                Some(ButtonEvent::ShortClick(id))
            }
        }
        PressPhase::HoldFired { .. } => {
            st.phase = PressPhase::Idle;
            None
        }
    }
}
