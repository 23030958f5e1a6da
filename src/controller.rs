//! Top-level controller.
//!
//! Owns the scheduler, pause machine, watchdog, presenter and button
//! debouncers, plus the capabilities they act on. One call to
//! [`Controller::tick`] runs the whole fixed-order poll:
//!
//! 1. Pause button → toggle manual pause, or cut a timed break short.
//! 2. Trigger button → force an action (ignored while paused).
//! 3. Host disconnected → drive the watchdog and stop here.
//! 4. Host connected → clear the watchdog, finish any pending jiggle.
//! 5. Paused → end an expired break, otherwise show the pause and stop.
//! 6. Run the action timer.

use crate::config::Config;
use crate::hal::{ButtonInputs, RandomSource, StatusDisplay, Transport};
use crate::pause::{PauseMachine, PauseState, PauseToggle};
use crate::scheduler::{ActionOutcome, Scheduler};
use crate::time::Millis;
use crate::ui::{Button, Debouncer, Presenter, Screen};
use crate::watchdog::{Watchdog, WatchdogDecision};

/// Whether the caller may keep ticking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flow {
    Continue,
    /// The watchdog timed out. Reset the device.
    Restart,
}

/// Summary of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    pub flow: Flow,
    /// The action attempted on this tick, if any.
    pub action: Option<ActionOutcome>,
}

impl TickReport {
    const fn idle() -> Self {
        Self {
            flow: Flow::Continue,
            action: None,
        }
    }
}

pub struct Controller<T, D, P, R> {
    config: Config,
    transport: T,
    display: D,
    buttons: P,
    rng: R,
    scheduler: Scheduler,
    pause: PauseMachine,
    watchdog: Watchdog,
    presenter: Presenter,
    pause_button: Debouncer,
    trigger_button: Debouncer,
}

impl<T, D, P, R> Controller<T, D, P, R>
where
    T: Transport,
    D: StatusDisplay,
    P: ButtonInputs,
    R: RandomSource,
{
    pub fn new(config: Config, transport: T, display: D, buttons: P, rng: R) -> Self {
        Self {
            scheduler: Scheduler::new(config),
            pause: PauseMachine::new(),
            watchdog: Watchdog::new(),
            presenter: Presenter::new(config.refresh_interval_ms),
            pause_button: Debouncer::new(Button::Pause, config.debounce_ms),
            trigger_button: Debouncer::new(Button::Trigger, config.debounce_ms),
            config,
            transport,
            display,
            buttons,
            rng,
        }
    }

    pub fn tick(&mut self, now: Millis) -> TickReport {
        let mut report = TickReport::idle();

        // 1. Pause button.
        let level = self.buttons.level(Button::Pause);
        if self.pause_button.poll(level, now).is_some() {
            self.toggle_pause(now);
        }

        // 2. Trigger button, only live while not paused.
        let level = self.buttons.level(Button::Trigger);
        if self.trigger_button.poll(level, now).is_some() && !self.pause.is_paused() {
            self.presenter.notify(now, Screen::Forced, &mut self.display);
            report.action = Some(self.fire(now));
        }

        // 3. Connectivity gate.
        let connected = self.transport.is_connected();
        let already_waiting = self.watchdog.state().disconnected_since.is_some();
        match self
            .watchdog
            .tick(now, connected, self.config.restart_timeout_ms)
        {
            WatchdogDecision::ContinueWaiting(remaining) => {
                let screen = Screen::Waiting {
                    restart_in_ms: remaining,
                };
                // The first tick of an episode replaces whatever was up.
                if already_waiting {
                    self.presenter.refresh(now, screen, &mut self.display);
                } else {
                    self.presenter.notify(now, screen, &mut self.display);
                }
                return report;
            }
            WatchdogDecision::RestartNow => {
                self.presenter.notify(now, Screen::Reboot, &mut self.display);
                report.flow = Flow::Restart;
                return report;
            }
            // 4. Connected; watchdog already cleared.
            WatchdogDecision::Continue => {}
        }
        self.scheduler.flush_return(now, &mut self.transport);

        // 5. Pause / break.
        if self.pause.maybe_end_break(now) {
            self.scheduler.restart_timer(now);
        }
        match self.pause.state() {
            PauseState::ManualPause => {
                self.presenter.refresh(now, Screen::Standby, &mut self.display);
                return report;
            }
            PauseState::TimedBreak { .. } => {
                let remaining_ms = self.pause.remaining_ms(now).unwrap_or(0);
                self.presenter
                    .refresh(now, Screen::Break { remaining_ms }, &mut self.display);
                return report;
            }
            PauseState::Active => {}
        }

        // 6. Action timer.
        if let Some(outcome) = self
            .scheduler
            .tick(now, &mut self.transport, &mut self.rng)
        {
            if outcome.fired() {
                self.roll_break(now);
            }
            report.action = Some(outcome);
        }
        let screen = Screen::Active {
            next_in_ms: self.scheduler.remaining_ms(now),
            last_action: self.scheduler.state().last_action_label,
        };
        self.presenter.refresh(now, screen, &mut self.display);

        report
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pause_state(&self) -> PauseState {
        self.pause.state()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn watchdog(&self) -> &Watchdog {
        &self.watchdog
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn buttons_mut(&mut self) -> &mut P {
        &mut self.buttons
    }

    fn toggle_pause(&mut self, now: Millis) {
        match self.pause.toggle_manual() {
            PauseToggle::Paused => {
                self.presenter.notify(now, Screen::Standby, &mut self.display);
            }
            PauseToggle::Resumed => {
                self.scheduler
                    .resume_quickly(now, self.config.resume_delay_ms);
                self.presenter.notify(now, Screen::Resuming, &mut self.display);
            }
        }
    }

    fn fire(&mut self, now: Millis) -> ActionOutcome {
        let outcome = self
            .scheduler
            .fire(now, &mut self.transport, &mut self.rng);
        if outcome.fired() {
            self.roll_break(now);
        }
        outcome
    }

    fn roll_break(&mut self, now: Millis) {
        self.pause.enter_random_break(
            now,
            self.config.break_min_ms,
            self.config.break_max_ms,
            self.config.break_probability_pct,
            &mut self.rng,
        );
    }
}
