//! Connectivity watchdog.
//!
//! The transport stack can wedge in a state that only a cold start
//! clears. The watchdog times how long the host has been gone and asks
//! for a full device restart once the timeout is reached.

use crate::time::{elapsed, Millis};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchdogDecision {
    /// Connected; nothing to do.
    Continue,
    /// Disconnected; restart in the given number of milliseconds.
    ContinueWaiting(Millis),
    /// Timeout reached. The caller must reset the device.
    RestartNow,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchdogState {
    pub disconnected_since: Option<Millis>,
}

#[derive(Clone, Debug, Default)]
pub struct Watchdog {
    state: WatchdogState,
}

impl Watchdog {
    pub const fn new() -> Self {
        Self {
            state: WatchdogState {
                disconnected_since: None,
            },
        }
    }

    pub fn state(&self) -> WatchdogState {
        self.state
    }

    pub fn tick(&mut self, now: Millis, connected: bool, timeout_ms: Millis) -> WatchdogDecision {
        if connected {
            if let Some(_since) = self.state.disconnected_since.take() {
                #[cfg(feature = "defmt")]
                defmt::info!("Watchdog: host back after {} ms", elapsed(now, _since));
            }
            return WatchdogDecision::Continue;
        }

        let Some(since) = self.state.disconnected_since else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Watchdog: host lost, restart in {} ms", timeout_ms);
            self.state.disconnected_since = Some(now);
            return WatchdogDecision::ContinueWaiting(timeout_ms);
        };

        let waited = elapsed(now, since);
        if waited < timeout_ms {
            WatchdogDecision::ContinueWaiting(timeout_ms - waited)
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Watchdog: disconnected for {} ms, restarting", waited);
            WatchdogDecision::RestartNow
        }
    }
}
