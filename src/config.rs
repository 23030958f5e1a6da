//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.  The
//! scheduler core reads its timing from [`Config`], whose `Default`
//! is built from these constants.

// Scheduler

/// Delay before the first action after boot (ms).
pub const INITIAL_ACTION_DELAY_MS: u64 = 5_000;

/// Inter-action delay range (ms, inclusive). Redrawn after every action.
pub const ACTION_DELAY_MIN_MS: u64 = 30_000;
pub const ACTION_DELAY_MAX_MS: u64 = 150_000;

/// Delay used right after leaving a manual pause so activity resumes promptly.
pub const RESUME_DELAY_MS: u64 = 2_000;

/// Weighted action mix (percent). The scroll tick takes the remainder.
pub const JIGGLE_WEIGHT_PCT: u8 = 70;
pub const KEY_PULSE_WEIGHT_PCT: u8 = 20;

/// Largest pointer offset of a micro-jiggle, in either direction.
pub const JIGGLE_MAX_OFFSET: i8 = 2;

/// Pause between a jiggle and its inverse move (ms).
pub const JIGGLE_RETURN_MS: u64 = 100;

/// HID usage code of the "inert" key (F15).
pub const KEY_F15: u8 = 0x6A;

// Random breaks

/// Chance (percent) of a timed break after each fired action.
pub const BREAK_PROBABILITY_PCT: u8 = 5;

/// Timed break duration range (ms, inclusive).
pub const BREAK_MIN_MS: u64 = 60_000;
pub const BREAK_MAX_MS: u64 = 120_000;

// Connectivity watchdog

/// Restart after this long without a host connection (ms).
pub const RESTART_TIMEOUT_MS: u64 = 60_000;

/// How long the reboot notice stays on screen before the reset (ms).
pub const REBOOT_NOTICE_MS: u64 = 1_000;

// Buttons & display

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Minimum interval between periodic status refreshes (ms).
pub const DISPLAY_REFRESH_MS: u64 = 1_000;

/// Controller tick period (ms).
pub const TICK_INTERVAL_MS: u64 = 10;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the concrete `embassy_nrf::peripherals::*`
// pins are picked in `main.rs`.  Adjust for your custom PCB.
//
//   Button PAUSE   → P0.11
//   Button TRIGGER → P0.12
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "hid-keepalive";
pub const USB_PRODUCT: &str = "Keepalive HID";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 10;

/// Depth of the report queue between the controller and the USB writer.
pub const HID_REPORT_QUEUE: usize = 16;

/// Runtime timing parameters for the [`Controller`](crate::controller::Controller).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub initial_delay_ms: u64,
    pub action_delay_min_ms: u64,
    pub action_delay_max_ms: u64,
    pub resume_delay_ms: u64,
    pub jiggle_weight_pct: u8,
    pub key_pulse_weight_pct: u8,
    pub jiggle_max_offset: i8,
    pub jiggle_return_ms: u64,
    pub key_code: u8,
    pub break_probability_pct: u8,
    pub break_min_ms: u64,
    pub break_max_ms: u64,
    pub restart_timeout_ms: u64,
    pub debounce_ms: u64,
    pub refresh_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_delay_ms: INITIAL_ACTION_DELAY_MS,
            action_delay_min_ms: ACTION_DELAY_MIN_MS,
            action_delay_max_ms: ACTION_DELAY_MAX_MS,
            resume_delay_ms: RESUME_DELAY_MS,
            jiggle_weight_pct: JIGGLE_WEIGHT_PCT,
            key_pulse_weight_pct: KEY_PULSE_WEIGHT_PCT,
            jiggle_max_offset: JIGGLE_MAX_OFFSET,
            jiggle_return_ms: JIGGLE_RETURN_MS,
            key_code: KEY_F15,
            break_probability_pct: BREAK_PROBABILITY_PCT,
            break_min_ms: BREAK_MIN_MS,
            break_max_ms: BREAK_MAX_MS,
            restart_timeout_ms: RESTART_TIMEOUT_MS,
            debounce_ms: BUTTON_DEBOUNCE_MS,
            refresh_interval_ms: DISPLAY_REFRESH_MS,
        }
    }
}

impl Config {
    /// Returns `true` if `delay` lies inside the configured action delay range.
    #[cfg(test)]
    pub fn delay_in_range(&self, delay: u64) -> bool {
        (self.action_delay_min_ms..=self.action_delay_max_ms).contains(&delay)
    }
}
