//! Scenario tests for the controller, driven through mock capabilities.

use std::collections::VecDeque;

use hid_keepalive::hal::{ButtonInputs, Level, RandomSource, StatusDisplay, Transport};
use hid_keepalive::pause::PauseState;
use hid_keepalive::ui::Button;
use hid_keepalive::{ActionOutcome, Config, Controller, Error, Flow, SuppressReason, TickReport};

// ═══════════════════════════════════════════════════════════════════════════
// Mock capabilities
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct MockHost {
    connected: bool,
    moves: Vec<(i8, i8, i8)>,
    keys: Vec<u8>,
}

impl Transport for MockHost {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn move_cursor(&mut self, dx: i8, dy: i8, wheel: i8) -> Result<(), Error> {
        assert!(self.connected, "move sent while disconnected");
        self.moves.push((dx, dy, wheel));
        Ok(())
    }

    fn send_key(&mut self, code: u8) -> Result<(), Error> {
        assert!(self.connected, "key sent while disconnected");
        self.keys.push(code);
        Ok(())
    }
}

#[derive(Default)]
struct MockScreen {
    frames: Vec<(String, String)>,
}

impl MockScreen {
    fn last(&self) -> (&str, &str) {
        let (top, bottom) = self.frames.last().expect("nothing rendered");
        (top.as_str(), bottom.as_str())
    }
}

impl StatusDisplay for MockScreen {
    fn render(&mut self, lines: &[&str]) {
        self.frames
            .push((lines[0].to_string(), lines[1].to_string()));
    }
}

struct MockPins {
    pause: Level,
    trigger: Level,
}

impl Default for MockPins {
    fn default() -> Self {
        Self {
            pause: Level::High,
            trigger: Level::High,
        }
    }
}

impl ButtonInputs for MockPins {
    fn level(&mut self, button: Button) -> Level {
        match button {
            Button::Pause => self.pause,
            Button::Trigger => self.trigger,
        }
    }
}

/// Replays queued draws, then falls back to a constant. Every value is
/// clamped into the requested range.
struct ScriptedRandom {
    queue: VecDeque<i32>,
    fallback: i32,
}

impl ScriptedRandom {
    fn constant(value: i32) -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: value,
        }
    }

    fn script(values: &[i32], fallback: i32) -> Self {
        Self {
            queue: values.iter().copied().collect(),
            fallback,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, min: i32, max: i32) -> i32 {
        self.queue.pop_front().unwrap_or(self.fallback).clamp(min, max)
    }
}

/// Small deterministic generator for long simulations.
struct Lcg(u64);

impl RandomSource for Lcg {
    fn uniform(&mut self, min: i32, max: i32) -> i32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        (i64::from(min) + ((self.0 >> 33) % span) as i64) as i32
    }
}

type TestController<R> = Controller<MockHost, MockScreen, MockPins, R>;

fn controller<R: RandomSource>(config: Config, rng: R) -> TestController<R> {
    let host = MockHost {
        connected: true,
        ..MockHost::default()
    };
    Controller::new(
        config,
        host,
        MockScreen::default(),
        MockPins::default(),
        rng,
    )
}

/// Config whose delay range admits the fixed 5000 ms draw.
fn short_delays() -> Config {
    Config {
        action_delay_min_ms: 1_000,
        action_delay_max_ms: 10_000,
        ..Config::default()
    }
}

/// Hold `button` low for one debounce interval starting at `at`.
/// Returns the report of the tick that sees the confirmed press.
fn press<R: RandomSource>(ctrl: &mut TestController<R>, button: Button, at: u64) -> TickReport {
    let settle = ctrl.config().debounce_ms;
    set_pin(ctrl, button, Level::Low);
    ctrl.tick(at);
    let report = ctrl.tick(at + settle);
    set_pin(ctrl, button, Level::High);
    ctrl.tick(at + settle + 10);
    report
}

fn set_pin<R: RandomSource>(ctrl: &mut TestController<R>, button: Button, level: Level) {
    match button {
        Button::Pause => ctrl.buttons_mut().pause = level,
        Button::Trigger => ctrl.buttons_mut().trigger = level,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Action timer
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn action_fires_only_after_delay_elapses() {
    let mut ctrl = controller(short_delays(), ScriptedRandom::constant(5_000));
    assert_eq!(ctrl.scheduler().state().last_action_at, 0);
    assert_eq!(ctrl.scheduler().state().next_delay_ms, 5_000);

    assert_eq!(ctrl.tick(4_999).action, None);

    let report = ctrl.tick(5_001);
    assert_eq!(report.action, Some(ActionOutcome::ScrollTick));
    assert_eq!(report.flow, Flow::Continue);
    assert_eq!(ctrl.scheduler().state().last_action_at, 5_001);
    assert_eq!(ctrl.scheduler().state().next_delay_ms, 5_000);
    assert_eq!(ctrl.scheduler().state().last_action_label, "Mouse Scroll");
    assert_eq!(ctrl.transport().moves, vec![(0, 0, 1)]);
}

#[test]
fn forced_trigger_fires_immediately_and_resets_schedule() {
    let mut ctrl = controller(short_delays(), ScriptedRandom::constant(5_000));

    set_pin(&mut ctrl, Button::Trigger, Level::Low);
    assert_eq!(ctrl.tick(50).action, None);
    let report = ctrl.tick(100);

    assert_eq!(report.action, Some(ActionOutcome::ScrollTick));
    assert_eq!(ctrl.scheduler().state().last_action_at, 100);
    assert_eq!(ctrl.display().last(), ("STATUS: FORCED", "> Triggering..."));

    // Holding the button does not fire again.
    for t in (110..4_000).step_by(10) {
        assert_eq!(ctrl.tick(t).action, None);
    }
    assert_eq!(ctrl.transport().moves.len(), 1);
}

#[test]
fn consecutive_actions_respect_drawn_delay() {
    let cfg = Config::default();
    let mut ctrl = controller(cfg, Lcg(0x5EED));

    let mut prev_at = 0u64;
    let mut prev_delay = ctrl.scheduler().state().next_delay_ms;
    let mut fired = 0;
    let (mut jiggles, mut keys, mut scrolls) = (0, 0, 0);

    // Four hours at 100 ms resolution.
    for t in (0..4 * 3_600_000u64).step_by(100) {
        let Some(outcome) = ctrl.tick(t).action else {
            continue;
        };
        assert!(outcome.fired());
        assert!(t - prev_at >= prev_delay, "fired early at {t}");

        let state = ctrl.scheduler().state();
        let range = cfg.action_delay_min_ms..=cfg.action_delay_max_ms;
        assert!(range.contains(&state.next_delay_ms));
        prev_at = t;
        prev_delay = state.next_delay_ms;
        fired += 1;
        match outcome {
            ActionOutcome::MicroJiggle => jiggles += 1,
            ActionOutcome::KeyPulse => keys += 1,
            ActionOutcome::ScrollTick => scrolls += 1,
            ActionOutcome::Suppressed(_) => unreachable!(),
        }
    }

    assert!(fired > 20);
    assert!(jiggles > keys && jiggles > scrolls);

    // Let the last jiggle return, then check the pointer is back home.
    let end = 4 * 3_600_000u64;
    ctrl.tick(end + 200);
    let (sx, sy) = ctrl
        .transport()
        .moves
        .iter()
        .fold((0i32, 0i32), |(x, y), &(dx, dy, _)| {
            (x + i32::from(dx), y + i32::from(dy))
        });
    assert_eq!((sx, sy), (0, 0));
    assert!(ctrl.transport().keys.iter().all(|&k| k == 0x6A));
}

// ═══════════════════════════════════════════════════════════════════════════
// Pause / break
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn double_pause_toggle_resumes_quickly() {
    let mut ctrl = controller(Config::default(), ScriptedRandom::constant(99));

    press(&mut ctrl, Button::Pause, 100);
    assert_eq!(ctrl.pause_state(), PauseState::ManualPause);

    press(&mut ctrl, Button::Pause, 300);
    assert_eq!(ctrl.pause_state(), PauseState::Active);
    assert_eq!(ctrl.scheduler().state().next_delay_ms, 2_000);
    assert_eq!(ctrl.scheduler().state().last_action_at, 350);
    assert_eq!(ctrl.display().last(), ("STATUS: ACTIVE", "> Resuming..."));

    // Activity resumes about two seconds later.
    assert_eq!(ctrl.tick(2_350).action, None);
    assert!(ctrl.tick(2_360).action.is_some());
}

#[test]
fn manual_pause_blocks_timer_and_trigger() {
    let mut ctrl = controller(Config::default(), ScriptedRandom::constant(0));

    press(&mut ctrl, Button::Pause, 0);
    assert_eq!(ctrl.pause_state(), PauseState::ManualPause);
    assert_eq!(ctrl.display().last(), ("STATUS: STANDBY", "> Manual Pause"));

    for t in (100..1_000_000u64).step_by(100) {
        let low = (t / 100) % 4 < 2;
        set_pin(
            &mut ctrl,
            Button::Trigger,
            if low { Level::Low } else { Level::High },
        );
        assert_eq!(ctrl.tick(t).action, None);
    }

    assert_eq!(ctrl.pause_state(), PauseState::ManualPause);
    assert!(ctrl.transport().moves.is_empty());
    assert!(ctrl.transport().keys.is_empty());
}

#[test]
fn random_break_suspends_then_resumes() {
    // choice=scroll, sign=+1, delay=30 s, break roll hit, break=60 s
    let rng = ScriptedRandom::script(&[99, 1, 30_000, 0, 60_000], 99);
    let mut ctrl = controller(Config::default(), rng);

    assert_eq!(ctrl.tick(5_001).action, Some(ActionOutcome::ScrollTick));
    assert_eq!(
        ctrl.pause_state(),
        PauseState::TimedBreak { ends_at: 65_001 }
    );

    // Trigger is disabled during the break.
    let report = press(&mut ctrl, Button::Trigger, 6_000);
    assert_eq!(report.action, None);
    assert_eq!(ctrl.transport().moves.len(), 1);

    ctrl.tick(10_000);
    assert_eq!(ctrl.display().last(), ("STATUS: PAUSED", "> Break: 55s"));

    assert_eq!(ctrl.tick(65_001).action, None);
    assert!(matches!(ctrl.pause_state(), PauseState::TimedBreak { .. }));

    assert_eq!(ctrl.tick(65_002).action, None);
    assert_eq!(ctrl.pause_state(), PauseState::Active);
    assert_eq!(ctrl.scheduler().state().last_action_at, 65_002);

    // Timer restarted from the break end with the 30 s delay.
    assert_eq!(ctrl.tick(95_002).action, None);
    assert_eq!(ctrl.tick(95_003).action, Some(ActionOutcome::ScrollTick));
}

#[test]
fn pause_press_during_break_resumes_quickly() {
    let rng = ScriptedRandom::script(&[99, 1, 30_000, 0, 60_000], 99);
    let mut ctrl = controller(Config::default(), rng);
    ctrl.tick(5_001);
    assert!(matches!(ctrl.pause_state(), PauseState::TimedBreak { .. }));

    press(&mut ctrl, Button::Pause, 7_000);
    assert_eq!(ctrl.pause_state(), PauseState::Active);
    assert_eq!(ctrl.scheduler().state().next_delay_ms, 2_000);
    assert_eq!(ctrl.scheduler().state().last_action_at, 7_050);
    assert_eq!(ctrl.display().last(), ("STATUS: ACTIVE", "> Resuming..."));

    assert_eq!(ctrl.tick(9_050).action, None);
    assert_eq!(ctrl.tick(9_060).action, Some(ActionOutcome::ScrollTick));
}

// ═══════════════════════════════════════════════════════════════════════════
// Connectivity watchdog
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn sustained_disconnect_requests_restart_at_timeout() {
    let mut ctrl = controller(Config::default(), ScriptedRandom::constant(0));
    ctrl.transport_mut().connected = false;

    let report = ctrl.tick(0);
    assert_eq!(report.flow, Flow::Continue);
    assert_eq!(ctrl.display().last(), ("STATUS: WAITING", "> Reset in 60s"));

    let mut restart_at = None;
    for t in (100..=61_000u64).step_by(100) {
        let report = ctrl.tick(t);
        assert_eq!(report.action, None);
        if report.flow == Flow::Restart {
            restart_at = Some(t);
            break;
        }
    }

    assert_eq!(restart_at, Some(60_000));
    assert_eq!(ctrl.display().last(), ("STATUS: REBOOT", "> Fixing link..."));
    assert!(ctrl.transport().moves.is_empty());
}

#[test]
fn host_loss_replaces_active_screen_at_once() {
    let mut ctrl = controller(Config::default(), ScriptedRandom::constant(99));
    ctrl.tick(0);
    assert_eq!(ctrl.display().last(), ("Next: 5s", "> None"));

    ctrl.transport_mut().connected = false;
    ctrl.tick(300);
    assert_eq!(ctrl.display().last(), ("STATUS: WAITING", "> Reset in 60s"));

    // Later countdown frames stay rate-limited.
    let frames = ctrl.display().frames.len();
    ctrl.tick(800);
    assert_eq!(ctrl.display().frames.len(), frames);
    ctrl.tick(1_300);
    assert_eq!(ctrl.display().last(), ("STATUS: WAITING", "> Reset in 59s"));
}

#[test]
fn reconnect_resets_watchdog_from_zero() {
    let mut ctrl = controller(Config::default(), ScriptedRandom::constant(0));
    ctrl.transport_mut().connected = false;
    for t in (0..=50_000u64).step_by(100) {
        assert_eq!(ctrl.tick(t).flow, Flow::Continue);
    }

    ctrl.transport_mut().connected = true;
    ctrl.tick(50_100);
    assert_eq!(ctrl.watchdog().state().disconnected_since, None);

    ctrl.transport_mut().connected = false;
    for t in (50_200..110_200u64).step_by(100) {
        assert_eq!(ctrl.tick(t).flow, Flow::Continue, "early restart at {t}");
    }
    assert_eq!(ctrl.watchdog().state().disconnected_since, Some(50_200));
    assert_eq!(ctrl.tick(110_200).flow, Flow::Restart);
}

#[test]
fn no_activity_while_disconnected() {
    let mut ctrl = controller(short_delays(), ScriptedRandom::constant(5_000));
    ctrl.transport_mut().connected = false;

    // Timer long expired, still nothing goes out.
    for t in (0..20_000u64).step_by(100) {
        assert_eq!(ctrl.tick(t).action, None);
    }

    // A forced trigger is suppressed without touching the schedule.
    let report = press(&mut ctrl, Button::Trigger, 20_000);
    assert_eq!(
        report.action,
        Some(ActionOutcome::Suppressed(SuppressReason::NotConnected))
    );
    assert_eq!(ctrl.scheduler().state().last_action_at, 0);
    assert_eq!(ctrl.scheduler().state().next_delay_ms, 5_000);
    assert!(ctrl.transport().moves.is_empty());

    // Back online: the overdue action fires on the next tick.
    ctrl.transport_mut().connected = true;
    assert_eq!(ctrl.tick(21_000).action, Some(ActionOutcome::ScrollTick));
}

#[test]
fn pause_button_works_while_disconnected() {
    let mut ctrl = controller(Config::default(), ScriptedRandom::constant(0));
    ctrl.transport_mut().connected = false;
    press(&mut ctrl, Button::Pause, 1_000);
    assert_eq!(ctrl.pause_state(), PauseState::ManualPause);
}
