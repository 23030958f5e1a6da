//! Unified error type for hid-keepalive.
//!
//! Every variant is a plain tag so errors stay `Copy` and need no
//! allocator. Transport errors are folded into
//! [`SuppressReason`](crate::scheduler::SuppressReason) by the scheduler.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Transport
    /// The host is not connected (USB not configured or suspended).
    NotConnected,

    /// The report queue towards the USB writer is full.
    ReportQueueFull,

    // Display
    /// I²C transaction to the display failed.
    Display,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Error::NotConnected => "host not connected",
            Error::ReportQueueFull => "HID report queue full",
            Error::Display => "display error",
        };
        f.write_str(msg)
    }
}
