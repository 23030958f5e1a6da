//! hid-keepalive firmware for the nRF52840.
//!
//! Wires the controller to the USB HID composite device, the SSD1306
//! status display, the two push buttons and the hardware RNG, then
//! ticks it at a fixed rate.

#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::rng::{self, Rng};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Duration, Instant, Ticker, Timer};
use hid_keepalive::board::{BoardButtons, ScbReset};
use hid_keepalive::config::{REBOOT_NOTICE_MS, TICK_INTERVAL_MS};
use hid_keepalive::hal::{DeviceReset, EntropyRng};
use hid_keepalive::ui::display::OledDisplay;
use hid_keepalive::usb::hid_device::{self, UsbDriver, UsbHidWriter, REPORTS};
use hid_keepalive::usb::UsbTransport;
use hid_keepalive::{Config, Controller, Flow};
use panic_probe as _;

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    RNG => rng::InterruptHandler<peripherals::RNG>;
});

#[embassy_executor::task]
async fn usb_device_task(device: embassy_usb::UsbDevice<'static, UsbDriver>) -> ! {
    hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn hid_writer_task(keyboard: UsbHidWriter, mouse: UsbHidWriter) -> ! {
    hid_device::hid_writer_task(keyboard, mouse, &REPORTS).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("--- hid-keepalive starting ---");

    let usb = hid_device::init(p.USBD);
    spawner.must_spawn(usb_device_task(usb.device));
    spawner.must_spawn(hid_writer_task(usb.keyboard_writer, usb.mouse_writer));

    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let display = match OledDisplay::init(i2c) {
        Ok(display) => display,
        Err(e) => defmt::panic!("Screen failed: {}", e),
    };

    let buttons = BoardButtons::new(
        Input::new(p.P0_11, Pull::Up),
        Input::new(p.P0_12, Pull::Up),
    );
    let rng = EntropyRng::new(Rng::new(p.RNG, Irqs));

    let config = Config::default();
    info!("Config: {}", config);
    let mut controller =
        Controller::new(config, UsbTransport::new(&REPORTS), display, buttons, rng);

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    loop {
        let report = controller.tick(Instant::now().as_millis());
        if let Some(action) = report.action {
            info!("Tick action: {}", action);
        }
        if report.flow == Flow::Restart {
            Timer::after(Duration::from_millis(REBOOT_NOTICE_MS)).await;
            ScbReset.restart();
        }
        ticker.next().await;
    }
}
