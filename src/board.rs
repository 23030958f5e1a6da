//! Board wiring: buttons and reset for the nRF52840.

use embassy_nrf::gpio::Input;

use crate::hal::{ButtonInputs, DeviceReset, Level};
use crate::ui::Button;

/// The two push buttons, configured with internal pull-ups.
pub struct BoardButtons {
    pause: Input<'static>,
    trigger: Input<'static>,
}

impl BoardButtons {
    pub fn new(pause: Input<'static>, trigger: Input<'static>) -> Self {
        Self { pause, trigger }
    }
}

impl ButtonInputs for BoardButtons {
    fn level(&mut self, button: Button) -> Level {
        let pin = match button {
            Button::Pause => &self.pause,
            Button::Trigger => &self.trigger,
        };
        if pin.is_low() {
            Level::Low
        } else {
            Level::High
        }
    }
}

/// System reset through the Cortex-M SCB.
pub struct ScbReset;

impl DeviceReset for ScbReset {
    fn restart(&mut self) -> ! {
        defmt::warn!("Rebooting to recover the host link");
        cortex_m::peripheral::SCB::sys_reset()
    }
}
