//! Status output on a 128x32 SSD1306 over I²C.

use defmt::warn;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::error::Error;
use crate::hal::StatusDisplay;

/// Vertical distance between text rows (px).
const ROW_PITCH: i32 = 16;

/// Rows that fit on a 32 px high panel.
const MAX_ROWS: usize = 2;

/// Buffered SSD1306 driver on any blocking `embedded-hal` I²C bus.
pub type Panel<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x32, BufferedGraphicsMode<DisplaySize128x32>>;

/// 128×32 OLED, mounted upside down.
pub struct OledDisplay<I2C> {
    panel: Panel<I2C>,
}

impl<I2C> OledDisplay<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the panel and clear the screen.
    pub fn init(i2c: I2C) -> Result<Self, Error> {
        let mut panel = Ssd1306::new(
            I2CDisplayInterface::new(i2c),
            DisplaySize128x32,
            DisplayRotation::Rotate180,
        )
        .into_buffered_graphics_mode();
        panel.init().map_err(|_| Error::Display)?;
        panel.clear_buffer();
        panel.flush().map_err(|_| Error::Display)?;
        Ok(Self { panel })
    }
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

impl<I2C> StatusDisplay for OledDisplay<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn render(&mut self, lines: &[&str]) {
        self.panel.clear_buffer();

        for (row, line) in lines.iter().take(MAX_ROWS).enumerate() {
            let origin = Point::new(0, row as i32 * ROW_PITCH);
            let _ = Text::with_baseline(line, origin, text_style(), Baseline::Top)
                .draw(&mut self.panel);
        }

        if self.panel.flush().is_err() {
            warn!("OLED flush failed");
        }
    }
}
