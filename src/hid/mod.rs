//! HID reports sent to the host.

pub mod keyboard;
pub mod mouse;


pub use keyboard::KeyboardReport;
pub use mouse::MouseReport;

/// Largest encoded report.
pub const MAX_REPORT_SIZE: usize = keyboard::KEYBOARD_REPORT_SIZE;

/// A report bound for one of the two HID interfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    Keyboard(KeyboardReport),
    Mouse(MouseReport),
}

impl HidReport {
    /// Encode into `buf` and return the bytes belonging to this report.
    pub fn encode<'a>(&self, buf: &'a mut [u8; MAX_REPORT_SIZE]) -> &'a [u8] {
        let len = match self {
            HidReport::Keyboard(k) => {
                buf.copy_from_slice(&k.to_bytes());
                keyboard::KEYBOARD_REPORT_SIZE
            }
            HidReport::Mouse(m) => {
                buf[..mouse::MOUSE_REPORT_SIZE].copy_from_slice(&m.to_bytes());
                mouse::MOUSE_REPORT_SIZE
            }
        };
        &buf[..len]
    }
}

/// Reports making up a single key tap: press, then release.
pub const fn key_tap(usage: u8) -> [HidReport; 2] {
    [
        HidReport::Keyboard(KeyboardReport::key(usage)),
        HidReport::Keyboard(KeyboardReport::released()),
    ]
}
