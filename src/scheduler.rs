//! Action scheduler.
//!
//! Decides when the next simulated action fires and which one. After
//! every fired action the inter-action delay is redrawn uniformly from
//! the configured range, so the activity never looks periodic.
//!
//! Action mix (defaults):
//!
//! | Action       | Weight | Effect                                       |
//! |--------------|--------|----------------------------------------------|
//! | Micro-jiggle | 70 %   | move by `(dx, dy)`, then by `(-dx, -dy)`     |
//! | Key pulse    | 20 %   | press + release of F15                       |
//! | Scroll tick  | 10 %   | wheel `±1`                                    |

use crate::config::Config;
use crate::hal::{RandomSource, Transport};
use crate::pause::draw_millis;
use crate::time::{elapsed, Millis};

/// Kind of simulated activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionKind {
    MicroJiggle,
    KeyPulse,
    ScrollTick,
}

impl ActionKind {
    /// Human-readable label shown on the display.
    pub const fn label(self) -> &'static str {
        match self {
            ActionKind::MicroJiggle => "Micro-Jiggle",
            ActionKind::KeyPulse => "Pressed F15",
            ActionKind::ScrollTick => "Mouse Scroll",
        }
    }
}

/// Why an action did not reach the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SuppressReason {
    /// Transport reported disconnected at fire time.
    NotConnected,
    /// Transport accepted the connection check but the write failed.
    TransportFault,
}

/// Result of one fire attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionOutcome {
    MicroJiggle,
    KeyPulse,
    ScrollTick,
    Suppressed(SuppressReason),
}

impl ActionOutcome {
    /// `true` if an action actually went out.
    pub const fn fired(self) -> bool {
        !matches!(self, ActionOutcome::Suppressed(_))
    }
}

impl From<ActionKind> for ActionOutcome {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::MicroJiggle => ActionOutcome::MicroJiggle,
            ActionKind::KeyPulse => ActionOutcome::KeyPulse,
            ActionKind::ScrollTick => ActionOutcome::ScrollTick,
        }
    }
}

/// Timer state owned by the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SchedulerState {
    pub last_action_at: Millis,
    pub next_delay_ms: Millis,
    pub last_action_label: &'static str,
}

/// Inverse jiggle move waiting to be sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingReturn {
    due: Millis,
    dx: i8,
    dy: i8,
}

#[derive(Clone, Debug)]
pub struct Scheduler {
    config: Config,
    state: SchedulerState,
    pending_return: Option<PendingReturn>,
}

impl Scheduler {
    pub fn new(config: Config) -> Self {
        Self {
            state: SchedulerState {
                last_action_at: 0,
                next_delay_ms: config.initial_delay_ms,
                last_action_label: "None",
            },
            config,
            pending_return: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Fire an action if the current delay has run out.
    pub fn tick<T: Transport, R: RandomSource>(
        &mut self,
        now: Millis,
        transport: &mut T,
        rng: &mut R,
    ) -> Option<ActionOutcome> {
        if elapsed(now, self.state.last_action_at) <= self.state.next_delay_ms {
            return None;
        }
        Some(self.fire(now, transport, rng))
    }

    /// Fire one action now, regardless of the timer.
    ///
    /// A suppressed action leaves the timer state untouched.
    pub fn fire<T: Transport, R: RandomSource>(
        &mut self,
        now: Millis,
        transport: &mut T,
        rng: &mut R,
    ) -> ActionOutcome {
        if !transport.is_connected() {
            return ActionOutcome::Suppressed(SuppressReason::NotConnected);
        }

        // Finish a previous jiggle first so net displacement stays zero.
        if let Some(pending) = self.pending_return {
            if transport.move_cursor(pending.dx, pending.dy, 0).is_err() {
                return ActionOutcome::Suppressed(SuppressReason::TransportFault);
            }
            self.pending_return = None;
        }

        let kind = self.choose(rng);
        let sent = match kind {
            ActionKind::MicroJiggle => {
                let reach = i32::from(self.config.jiggle_max_offset.max(0));
                let dx = rng.uniform(-reach, reach).clamp(-reach, reach) as i8;
                let dy = rng.uniform(-reach, reach).clamp(-reach, reach) as i8;
                let sent = transport.move_cursor(dx, dy, 0);
                if sent.is_ok() && (dx != 0 || dy != 0) {
                    self.pending_return = Some(PendingReturn {
                        due: now.saturating_add(self.config.jiggle_return_ms),
                        dx: -dx,
                        dy: -dy,
                    });
                }
                sent
            }
            ActionKind::KeyPulse => transport.send_key(self.config.key_code),
            ActionKind::ScrollTick => {
                let wheel = if rng.uniform(0, 1) == 0 { -1 } else { 1 };
                transport.move_cursor(0, 0, wheel)
            }
        };

        if let Err(_e) = sent {
            #[cfg(feature = "defmt")]
            defmt::warn!("Action {} failed: {}", kind, _e);
            return ActionOutcome::Suppressed(SuppressReason::TransportFault);
        }

        self.state.next_delay_ms = draw_millis(
            rng,
            self.config.action_delay_min_ms,
            self.config.action_delay_max_ms,
        );
        self.state.last_action_at = now;
        self.state.last_action_label = kind.label();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "[ACTION] {} (next in {} ms)",
            kind.label(),
            self.state.next_delay_ms
        );

        kind.into()
    }

    /// Send the inverse of the last jiggle once its pause has elapsed.
    /// Returns `true` if the return move went out on this call.
    pub fn flush_return<T: Transport>(&mut self, now: Millis, transport: &mut T) -> bool {
        let Some(pending) = self.pending_return else {
            return false;
        };
        if now < pending.due || !transport.is_connected() {
            return false;
        }
        if transport.move_cursor(pending.dx, pending.dy, 0).is_err() {
            return false;
        }
        self.pending_return = None;
        true
    }

    /// `true` while a jiggle still owes its inverse move.
    pub fn has_pending_return(&self) -> bool {
        self.pending_return.is_some()
    }

    /// Restart the timer with a short delay (after leaving manual pause).
    pub fn resume_quickly(&mut self, now: Millis, delay_ms: Millis) {
        self.state.last_action_at = now;
        self.state.next_delay_ms = delay_ms;
    }

    /// Restart the timer with the current delay (after a timed break).
    pub fn restart_timer(&mut self, now: Millis) {
        self.state.last_action_at = now;
    }

    /// Time until the next scheduled action.
    pub fn remaining_ms(&self, now: Millis) -> Millis {
        self.state
            .next_delay_ms
            .saturating_sub(elapsed(now, self.state.last_action_at))
    }

    fn choose<R: RandomSource>(&self, rng: &mut R) -> ActionKind {
        let roll = rng.uniform(0, 99);
        let jiggle = i32::from(self.config.jiggle_weight_pct);
        let key = jiggle + i32::from(self.config.key_pulse_weight_pct);
        if roll < jiggle {
            ActionKind::MicroJiggle
        } else if roll < key {
            ActionKind::KeyPulse
        } else {
            ActionKind::ScrollTick
        }
    }
}
