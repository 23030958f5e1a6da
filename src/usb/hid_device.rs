//! Keyboard + mouse composite on the nRF52840 USBD peripheral.
//!
//! [`init`] builds the device, [`run_usb_device`] and [`hid_writer_task`]
//! run as Embassy tasks, and [`UsbTransport`] is what the controller
//! writes to. Reports cross from the controller to the writer task
//! through [`REPORTS`].

use core::sync::atomic::{AtomicBool, Ordering};

use defmt::{debug, info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, Handler, UsbDevice};
use static_cell::StaticCell;

use crate::config;
use crate::error::Error;
use crate::hal::Transport;
use crate::hid::keyboard::KEYBOARD_REPORT_DESCRIPTOR;
use crate::hid::mouse::MOUSE_REPORT_DESCRIPTOR;
use crate::hid::{key_tap, HidReport, MouseReport, MAX_REPORT_SIZE};

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// Writer for one HID interface (8-byte max packet).
pub type UsbHidWriter = HidWriter<'static, UsbDriver, 8>;

pub type ReportQueue = Channel<CriticalSectionRawMutex, HidReport, { config::HID_REPORT_QUEUE }>;

/// Controller → writer task.
pub static REPORTS: ReportQueue = Channel::new();

static CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static KEYBOARD_STATE: StaticCell<State> = StaticCell::new();
static MOUSE_STATE: StaticCell<State> = StaticCell::new();
static HOST_WATCH: StaticCell<HostWatch> = StaticCell::new();

static CONFIGURED: AtomicBool = AtomicBool::new(false);
static SUSPENDED: AtomicBool = AtomicBool::new(false);

/// Mirrors bus events into [`CONFIGURED`] / [`SUSPENDED`].
struct HostWatch;

impl Handler for HostWatch {
    fn reset(&mut self) {
        debug!("USB: bus reset");
        CONFIGURED.store(false, Ordering::Release);
    }

    fn configured(&mut self, configured: bool) {
        info!("USB: configured={}", configured);
        CONFIGURED.store(configured, Ordering::Release);
    }

    fn suspended(&mut self, suspended: bool) {
        info!("USB: suspended={}", suspended);
        SUSPENDED.store(suspended, Ordering::Release);
    }
}

/// `true` while the host has configured the device and not suspended it.
pub fn host_ready() -> bool {
    CONFIGURED.load(Ordering::Acquire) && !SUSPENDED.load(Ordering::Acquire)
}

pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub keyboard_writer: UsbHidWriter,
    pub mouse_writer: UsbHidWriter,
}

/// Build the composite device. Call once; the static buffers are taken here.
pub fn init(usbd: peripherals::USBD) -> UsbHidDevice {
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    let mut device_config = Config::new(config::USB_VID, config::USB_PID);
    device_config.manufacturer = Some(config::USB_MANUFACTURER);
    device_config.product = Some(config::USB_PRODUCT);
    device_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    device_config.max_power = 100; // mA
    device_config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        device_config,
        CONFIG_DESC.init([0; 256]),
        BOS_DESC.init([0; 256]),
        MSOS_DESC.init([0; 256]),
        CONTROL_BUF.init([0; 128]),
    );
    builder.handler(HOST_WATCH.init(HostWatch));

    let keyboard_writer = hid_interface(
        &mut builder,
        KEYBOARD_STATE.init(State::new()),
        KEYBOARD_REPORT_DESCRIPTOR,
    );
    let mouse_writer = hid_interface(
        &mut builder,
        MOUSE_STATE.init(State::new()),
        MOUSE_REPORT_DESCRIPTOR,
    );

    info!(
        "USB: keyboard + mouse, VID {=u16:#x} PID {=u16:#x}",
        config::USB_VID,
        config::USB_PID
    );

    UsbHidDevice {
        device: builder.build(),
        keyboard_writer,
        mouse_writer,
    }
}

fn hid_interface(
    builder: &mut Builder<'static, UsbDriver>,
    state: &'static mut State<'static>,
    report_descriptor: &'static [u8],
) -> UsbHidWriter {
    HidWriter::new(
        builder,
        state,
        HidConfig {
            report_descriptor,
            request_handler: None,
            poll_ms: config::USB_HID_POLL_MS,
            max_packet_size: 8,
        },
    )
}

pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    device.run().await
}

/// Forward queued reports to the matching interface, in order.
pub async fn hid_writer_task(
    mut keyboard: UsbHidWriter,
    mut mouse: UsbHidWriter,
    reports: &'static ReportQueue,
) -> ! {
    let mut buf = [0u8; MAX_REPORT_SIZE];
    loop {
        let report = reports.receive().await;
        let bytes = report.encode(&mut buf);
        let written = match report {
            HidReport::Keyboard(_) => keyboard.write(bytes).await,
            HidReport::Mouse(_) => mouse.write(bytes).await,
        };
        if written.is_err() {
            warn!("USB: dropped {}", report);
        }
    }
}

/// [`Transport`] over the report queue. Never blocks the controller tick.
pub struct UsbTransport {
    reports: &'static ReportQueue,
}

impl UsbTransport {
    pub const fn new(reports: &'static ReportQueue) -> Self {
        Self { reports }
    }

    /// Queue every report in `batch` or none of them, so a key press is
    /// never sent without its release.
    fn enqueue(&mut self, batch: &[HidReport]) -> Result<(), Error> {
        if !host_ready() {
            return Err(Error::NotConnected);
        }
        if self.reports.free_capacity() < batch.len() {
            return Err(Error::ReportQueueFull);
        }
        for report in batch {
            self.reports
                .try_send(*report)
                .map_err(|_| Error::ReportQueueFull)?;
        }
        Ok(())
    }
}

impl Transport for UsbTransport {
    fn is_connected(&self) -> bool {
        host_ready()
    }

    fn move_cursor(&mut self, dx: i8, dy: i8, wheel: i8) -> Result<(), Error> {
        self.enqueue(&[HidReport::Mouse(MouseReport::movement(dx, dy, wheel))])
    }

    fn send_key(&mut self, code: u8) -> Result<(), Error> {
        self.enqueue(&key_tap(code))
    }
}
