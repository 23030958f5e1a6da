//! hid-keepalive: activity scheduler and connectivity watchdog.
//!
//! The library holds the whole control logic - button debouncing, the
//! pause / break state machine, the action scheduler, the watchdog and
//! the status presenter - written against the capability traits in
//! [`hal`]. It is `no_std` and runs on the host for testing.
//!
//! Usage: `cargo test --lib --tests`
//!
//! The firmware-only modules (USB device, OLED driver, board wiring) are
//! compiled with the `embedded` feature and used by `main.rs`.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod controller;
pub mod error;
pub mod hal;
pub mod hid;
pub mod pause;
pub mod scheduler;
pub mod time;
pub mod ui;
pub mod watchdog;

#[cfg(feature = "embedded")]
pub mod board;
#[cfg(feature = "embedded")]
pub mod usb;

pub use config::Config;
pub use controller::{Controller, Flow, TickReport};
pub use error::Error;
pub use scheduler::{ActionOutcome, SuppressReason};
pub use watchdog::WatchdogDecision;
