//! Host link over the nRF52840's full-speed USB controller.
//!
//! The board enumerates as a composite device with two boot-protocol
//! HID interfaces, keyboard first and mouse second. "Connected" means
//! the host has configured the device and has not suspended the bus.

pub mod hid_device;

pub use hid_device::UsbTransport;
