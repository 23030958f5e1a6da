//! Capabilities the controller consumes.
//!
//! The scheduler core never touches hardware directly. Firmware provides
//! concrete implementations (USB HID, SSD1306, GPIO, hardware RNG, SCB
//! reset) and host tests provide mocks.

use crate::error::Error;
use crate::ui::Button;

/// Downstream HID transport (the host connection).
pub trait Transport {
    /// Returns `true` while the host is able to receive reports.
    fn is_connected(&self) -> bool;

    /// Send a relative pointer movement and wheel delta.
    fn move_cursor(&mut self, dx: i8, dy: i8, wheel: i8) -> Result<(), Error>;

    /// Send a single key press followed by its release.
    fn send_key(&mut self, code: u8) -> Result<(), Error>;
}

/// Small text display. Fire-and-forget.
pub trait StatusDisplay {
    fn render(&mut self, lines: &[&str]);
}

/// Electrical level of a digital input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    High,
    Low,
}

/// Raw access to the two push buttons (active-low).
pub trait ButtonInputs {
    fn level(&mut self, button: Button) -> Level;
}

/// Uniform integer source, seeded once at startup.
pub trait RandomSource {
    /// Uniform draw in `[min, max]` (both ends inclusive).
    fn uniform(&mut self, min: i32, max: i32) -> i32;
}

/// Full device reset. Never returns.
pub trait DeviceReset {
    fn restart(&mut self) -> !;
}

/// [`RandomSource`] over any `rand_core` generator, e.g. the nRF52840
/// hardware RNG.
pub struct EntropyRng<R> {
    rng: R,
}

impl<R: rand_core::RngCore> EntropyRng<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: rand_core::RngCore> RandomSource for EntropyRng<R> {
    fn uniform(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        let offset = u64::from(self.rng.next_u32()) % span;
        (i64::from(min) + offset as i64) as i32
    }
}
