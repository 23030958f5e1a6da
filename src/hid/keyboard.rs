//! Boot-protocol keyboard report with a single key slot in use.
//!
//! ```text
//! [0] modifiers  always 0
//! [1] reserved
//! [2] key usage  0 = released
//! [3..8]         unused key slots
//! ```

pub const KEYBOARD_REPORT_SIZE: usize = 8;

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// HID usage of the held key, 0 when nothing is held.
    pub usage: u8,
}

impl KeyboardReport {
    pub const fn key(usage: u8) -> Self {
        Self { usage }
    }

    pub const fn released() -> Self {
        Self { usage: 0 }
    }

    #[cfg(test)]
    pub const fn is_released(&self) -> bool {
        self.usage == 0
    }

    pub const fn to_bytes(&self) -> [u8; KEYBOARD_REPORT_SIZE] {
        [0, 0, self.usage, 0, 0, 0, 0, 0]
    }
}

/// 8 modifier bits, a reserved byte and a 6-key array. There is no LED
/// output report, so the host's lock-key state is never read back.
pub const KEYBOARD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0, //   Usage Minimum (Left Control)
    0x29, 0xE7, //   Usage Maximum (Right GUI)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x08, //   Report Count (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x01, //   Input (Constant)
    0x19, 0x00, //   Usage Minimum (0)
    0x29, 0xFF, //   Usage Maximum (255)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x06, //   Report Count (6)
    0x81, 0x00, //   Input (Data, Array)
    0xC0, // End Collection
];
