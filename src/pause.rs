//! Pause / break state machine.
//!
//! Two kinds of pause suspend the action timer:
//!
//! - **Manual pause** - user toggled, indefinite, ended only by another toggle.
//! - **Timed break** - drawn at random right after an action, ends on its own
//!   or early on a Pause press.
//!
//! Both disable the Trigger button. Only the Pause button stays live.

use crate::hal::RandomSource;
use crate::time::{elapsed, Millis};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PauseState {
    Active,
    ManualPause,
    TimedBreak { ends_at: Millis },
}

/// Result of a Pause button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PauseToggle {
    /// Entered manual pause.
    Paused,
    /// Left manual pause; the scheduler should resume quickly.
    Resumed,
}

/// Owner of [`PauseState`] transitions.
#[derive(Clone, Debug)]
pub struct PauseMachine {
    state: PauseState,
}

impl Default for PauseMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PauseMachine {
    pub const fn new() -> Self {
        Self {
            state: PauseState::Active,
        }
    }

    pub fn state(&self) -> PauseState {
        self.state
    }

    /// `true` in either kind of pause.
    pub fn is_paused(&self) -> bool {
        self.state != PauseState::Active
    }

    /// Handle a Pause press. Any pause, manual or timed, is ended by it;
    /// only `Active` enters the manual pause.
    pub fn toggle_manual(&mut self) -> PauseToggle {
        match self.state {
            PauseState::Active => {
                self.transition(PauseState::ManualPause);
                PauseToggle::Paused
            }
            PauseState::ManualPause | PauseState::TimedBreak { .. } => {
                self.transition(PauseState::Active);
                PauseToggle::Resumed
            }
        }
    }

    /// End a timed break whose end time has passed. Returns `true` if the
    /// break ended on this call. Manual pause never ends here.
    pub fn maybe_end_break(&mut self, now: Millis) -> bool {
        match self.state {
            PauseState::TimedBreak { ends_at } if now > ends_at => {
                self.transition(PauseState::Active);
                true
            }
            _ => false,
        }
    }

    /// Roll for a timed break after an action. On a hit the break length
    /// is drawn from `[min_ms, max_ms]`; returns the break end time.
    pub fn enter_random_break<R: RandomSource>(
        &mut self,
        now: Millis,
        min_ms: Millis,
        max_ms: Millis,
        probability_pct: u8,
        rng: &mut R,
    ) -> Option<Millis> {
        if self.state != PauseState::Active {
            return None;
        }
        let roll = rng.uniform(0, 99);
        if roll >= i32::from(probability_pct) {
            return None;
        }
        let duration = draw_millis(rng, min_ms, max_ms);
        let ends_at = now.saturating_add(duration);
        self.transition(PauseState::TimedBreak { ends_at });
        Some(ends_at)
    }

    /// Time left in a timed break. `None` when not in a timed break.
    pub fn remaining_ms(&self, now: Millis) -> Option<Millis> {
        match self.state {
            PauseState::TimedBreak { ends_at } => Some(elapsed(ends_at, now)),
            _ => None,
        }
    }

    fn transition(&mut self, next: PauseState) {
        #[cfg(feature = "defmt")]
        defmt::info!("Pause: {} -> {}", self.state, next);
        self.state = next;
    }
}

/// Uniform draw in `[min, max]` milliseconds through the `i32` random source.
pub(crate) fn draw_millis<R: RandomSource>(rng: &mut R, min: Millis, max: Millis) -> Millis {
    let lo = min.min(i32::MAX as u64) as i32;
    let hi = max.min(i32::MAX as u64) as i32;
    let v = rng.uniform(lo, hi.max(lo)).clamp(lo, hi.max(lo));
    v as Millis
}
