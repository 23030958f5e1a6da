//! Status presenter.
//!
//! Turns controller state into the two lines shown on the OLED. Periodic
//! refreshes (countdowns) are rate-limited so the I²C display is not
//! flushed on every 10 ms tick; notifications are drawn immediately.

use core::fmt::Write;

use heapless::String;

use crate::hal::StatusDisplay;
use crate::time::{elapsed, whole_secs, Millis};

/// Characters per line: 128 px wide display, 6 px font.
pub const LINE_CAPACITY: usize = 21;

/// What the display should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Normal operation: countdown to the next action plus the last action.
    Active {
        next_in_ms: Millis,
        last_action: &'static str,
    },
    /// Indefinite manual pause.
    Standby,
    /// Timed break with time left.
    Break { remaining_ms: Millis },
    /// Manual pause just ended.
    Resuming,
    /// Trigger button pressed.
    Forced,
    /// Host disconnected; counting down to the restart.
    Waiting { restart_in_ms: Millis },
    /// Restart is imminent.
    Reboot,
}

impl Screen {
    pub fn lines(&self) -> StatusLines {
        let mut out = StatusLines::default();
        match *self {
            Screen::Active {
                next_in_ms,
                last_action,
            } => {
                out.set_top(format_args!("Next: {}s", whole_secs(next_in_ms)));
                out.set_bottom(format_args!("{}", last_action));
            }
            Screen::Standby => {
                out.set_top(format_args!("STATUS: STANDBY"));
                out.set_bottom(format_args!("Manual Pause"));
            }
            Screen::Break { remaining_ms } => {
                out.set_top(format_args!("STATUS: PAUSED"));
                out.set_bottom(format_args!("Break: {}s", whole_secs(remaining_ms)));
            }
            Screen::Resuming => {
                out.set_top(format_args!("STATUS: ACTIVE"));
                out.set_bottom(format_args!("Resuming..."));
            }
            Screen::Forced => {
                out.set_top(format_args!("STATUS: FORCED"));
                out.set_bottom(format_args!("Triggering..."));
            }
            Screen::Waiting { restart_in_ms } => {
                out.set_top(format_args!("STATUS: WAITING"));
                out.set_bottom(format_args!("Reset in {}s", whole_secs(restart_in_ms)));
            }
            Screen::Reboot => {
                out.set_top(format_args!("STATUS: REBOOT"));
                out.set_bottom(format_args!("Fixing link..."));
            }
        }
        out
    }
}

/// Two rendered display lines. Text past the line capacity is dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusLines {
    pub top: String<LINE_CAPACITY>,
    pub bottom: String<LINE_CAPACITY>,
}

impl StatusLines {
    fn set_top(&mut self, body: core::fmt::Arguments<'_>) {
        self.top.clear();
        let _ = Truncating(&mut self.top).write_fmt(body);
    }

    fn set_bottom(&mut self, body: core::fmt::Arguments<'_>) {
        self.bottom.clear();
        let mut w = Truncating(&mut self.bottom);
        let _ = w.write_str("> ");
        let _ = w.write_fmt(body);
    }
}

/// Writes as many characters as fit and silently drops the rest.
struct Truncating<'a, const N: usize>(&'a mut String<N>);

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Rate-limited writer in front of a [`StatusDisplay`].
#[derive(Clone, Debug)]
pub struct Presenter {
    refresh_ms: Millis,
    last_render: Option<Millis>,
}

impl Presenter {
    pub const fn new(refresh_ms: Millis) -> Self {
        Self {
            refresh_ms,
            last_render: None,
        }
    }

    /// Returns `true` if a refresh of a periodic screen is due.
    pub fn is_due(&self, now: Millis) -> bool {
        match self.last_render {
            None => true,
            Some(at) => elapsed(now, at) >= self.refresh_ms,
        }
    }

    /// Draw `screen` if the refresh interval has passed. Returns `true`
    /// when the display was written.
    pub fn refresh<D: StatusDisplay>(&mut self, now: Millis, screen: Screen, display: &mut D) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.notify(now, screen, display);
        true
    }

    /// Draw `screen` immediately and restart the refresh window.
    pub fn notify<D: StatusDisplay>(&mut self, now: Millis, screen: Screen, display: &mut D) {
        let lines = screen.lines();
        display.render(&[lines.top.as_str(), lines.bottom.as_str()]);
        self.last_render = Some(now);
    }
}
