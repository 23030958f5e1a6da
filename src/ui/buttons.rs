//! Button debouncing.
//!
//! Buttons are active-low with internal pull-up. A press is reported
//! only after the pin has stayed low for the settle interval, and the
//! pin then stays silent until it is released again. This is a polled
//! state machine, so a held button never stalls the controller tick.

use crate::hal::Level;
use crate::time::{elapsed, Millis};
use crate::ui::{Button, ButtonEdge, ButtonEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum DebounceState {
    Released,
    /// Low level first seen at `since`, not yet confirmed.
    Settling { since: Millis },
    /// Edge already emitted; waiting for the pin to go high.
    AwaitingRelease,
}

/// Per-pin debouncer.
#[derive(Clone, Debug)]
pub struct Debouncer {
    button: Button,
    settle_ms: Millis,
    state: DebounceState,
}

impl Debouncer {
    pub const fn new(button: Button, settle_ms: Millis) -> Self {
        Self {
            button,
            settle_ms,
            state: DebounceState::Released,
        }
    }

    /// Feed the current pin level. Returns an edge at most once per press.
    pub fn poll(&mut self, level: Level, now: Millis) -> Option<ButtonEdge> {
        let pressed = level == Level::Low;

        match self.state {
            DebounceState::Released => {
                if pressed {
                    self.state = DebounceState::Settling { since: now };
                    return self.confirm(now, now);
                }
                None
            }
            DebounceState::Settling { since } => {
                if pressed {
                    self.confirm(now, since)
                } else {
                    // Bounce shorter than the settle interval.
                    self.state = DebounceState::Released;
                    None
                }
            }
            DebounceState::AwaitingRelease => {
                if !pressed {
                    self.state = DebounceState::Released;
                }
                None
            }
        }
    }

    /// `true` while a confirmed press has not been released yet.
    #[cfg(test)]
    pub fn is_held(&self) -> bool {
        self.state == DebounceState::AwaitingRelease
    }

    fn confirm(&mut self, now: Millis, since: Millis) -> Option<ButtonEdge> {
        if elapsed(now, since) < self.settle_ms {
            return None;
        }
        #[cfg(feature = "defmt")]
        defmt::info!("Button: {}", self.button);
        self.state = DebounceState::AwaitingRelease;
        Some(ButtonEdge {
            button: self.button,
            event: ButtonEvent::Pressed,
        })
    }
}
