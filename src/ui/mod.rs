//! User interface subsystem - status display + physical buttons.
//!
//! ## Components
//!
//! - **Buttons**: 2 tactile switches (PAUSE, TRIGGER), active-low, debounced
//! - **Presenter**: derives the two status lines and rate-limits refreshes
//! - **Display**: SSD1306 128×32 OLED via I²C (embedded builds only)

pub mod buttons;
#[cfg(feature = "embedded")]
pub mod display;
pub mod presenter;

pub use buttons::Debouncer;
pub use presenter::{Presenter, Screen, StatusLines};

/// The two physical buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Toggles the indefinite manual pause.
    Pause,
    /// Fires an action immediately.
    Trigger,
}

/// What happened on a button (only presses are reported).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Pressed,
}

/// A debounced button edge, emitted once per physical press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEdge {
    pub button: Button,
    pub event: ButtonEvent,
}
