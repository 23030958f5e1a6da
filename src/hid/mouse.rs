//! Boot-protocol mouse report. Buttons are declared in the descriptor
//! but never pressed, so byte 0 is always zero.
//!
//! ```text
//! [0] buttons  always 0
//! [1] dx       i8
//! [2] dy       i8
//! [3] wheel    i8
//! ```

pub const MOUSE_REPORT_SIZE: usize = 4;

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    pub dx: i8,
    pub dy: i8,
    pub wheel: i8,
}

impl MouseReport {
    pub const fn movement(dx: i8, dy: i8, wheel: i8) -> Self {
        Self { dx, dy, wheel }
    }

    /// `true` for a report that moves nothing.
    #[cfg(test)]
    pub const fn is_idle(&self) -> bool {
        self.dx == 0 && self.dy == 0 && self.wheel == 0
    }

    pub const fn to_bytes(&self) -> [u8; MOUSE_REPORT_SIZE] {
        [0, self.dx as u8, self.dy as u8, self.wheel as u8]
    }
}

/// 3 buttons + padding, then relative X, Y and wheel as one 3-byte field.
pub const MOUSE_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x02, // Usage (Mouse)
    0xA1, 0x01, // Collection (Application)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    0x05, 0x09, //     Usage Page (Buttons)
    0x19, 0x01, //     Usage Minimum (1)
    0x29, 0x03, //     Usage Maximum (3)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x75, 0x01, //     Report Size (1)
    0x95, 0x03, //     Report Count (3)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x75, 0x05, //     Report Size (5)
    0x95, 0x01, //     Report Count (1)
    0x81, 0x01, //     Input (Constant)
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x09, 0x38, //     Usage (Wheel)
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x03, //     Report Count (3)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    0xC0, //   End Collection
    0xC0, // End Collection
];
