//! SSD1306 OLED status screen.

use colorsense::config::{
    DISPLAY_I2C_ADDRESS, DISPLAY_INIT_ATTEMPTS, MESSAGE_ROWS, SAMPLING_ROWS,
};
use colorsense::ports::StatusDisplay;
use colorsense::ui::text;
use colorsense::{ColorName, Error, RgbSample};
use defmt::{info, warn};
use embassy_time::Timer;
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

const WIDTH: u32 = 128;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x32, BufferedGraphicsMode<DisplaySize128x32>>;

fn style(font: &'static MonoFont<'static>) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(font)
        .text_color(BinaryColor::On)
        .build()
}

/// x offset that centers `s` in `font` across the screen.
fn centered(s: &str, font: &MonoFont<'_>) -> i32 {
    let width = s.len() as u32 * font.character_size.width;
    (WIDTH.saturating_sub(width) / 2) as i32
}

pub struct OledStatus<I2C> {
    display: Display<I2C>,
}

impl<I2C> OledStatus<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the panel, retrying a few times before giving up.
    pub async fn init(i2c: I2C) -> Result<Self, Error> {
        let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_I2C_ADDRESS);
        let mut display = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        for attempt in 1..=DISPLAY_INIT_ATTEMPTS {
            if display.init().is_ok() {
                info!("OLED initialized");
                let mut oled = Self { display };
                oled.display.clear_buffer();
                oled.present();
                return Ok(oled);
            }
            warn!("OLED init attempt {} failed, retrying", attempt);
            Timer::after_millis(200).await;
        }

        Err(Error::Display)
    }

    fn text(&mut self, s: &str, x: i32, y: i32) {
        let _ = Text::with_baseline(s, Point::new(x, y), style(&FONT_6X10), Baseline::Top)
            .draw(&mut self.display);
    }

    fn present(&mut self) {
        if self.display.flush().is_err() {
            warn!("OLED flush failed: {}", Error::Display);
        }
    }

    /// Boot logo.
    pub fn show_splash(&mut self) {
        const LOGO: &str = "WUST";
        self.display.clear_buffer();
        let x = centered(LOGO, &FONT_10X20);
        let _ = Text::with_baseline(LOGO, Point::new(x, 6), style(&FONT_10X20), Baseline::Top)
            .draw(&mut self.display);
        self.present();
    }

    /// Product name, shown after the logo.
    pub fn show_welcome(&mut self) {
        self.display.clear_buffer();
        self.text("Surface", centered("Surface", &FONT_6X10), 4);
        self.text("Color Detector", centered("Color Detector", &FONT_6X10), 18);
        self.present();
    }
}

impl<I2C> StatusDisplay for OledStatus<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn show_ready(&mut self) {
        self.show_message("Ready!", "Press to sample");
    }

    fn show_sampling(&mut self, count: u32, average: RgbSample, name: ColorName) {
        self.display.clear_buffer();
        let [header, rgb, name_row] = SAMPLING_ROWS;
        self.text(&text::sampling_header(count), 0, header);
        self.text(&text::rgb_line(average), 0, rgb);
        self.text(name.as_str(), 0, name_row);
        self.present();
    }

    fn show_progress(&mut self, percent: u8) {
        self.display.clear_buffer();
        self.text("Hold to finalize...", 0, 0);

        let bar_width = WIDTH - 4;
        let filled = bar_width * u32::from(percent.min(100)) / 100;
        let _ = Rectangle::new(Point::new(2, 12), Size::new(bar_width, 8))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.display);
        let _ = Rectangle::new(Point::new(2, 12), Size::new(filled, 8))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut self.display);

        let label = text::percent(percent);
        self.text(&label, centered(&label, &FONT_6X10), 22);
        self.present();
    }

    fn show_message(&mut self, line1: &str, line2: &str) {
        self.display.clear_buffer();
        let [top, bottom] = MESSAGE_ROWS;
        self.text(line1, 0, top);
        if !line2.is_empty() {
            self.text(line2, 0, bottom);
        }
        self.present();
    }

    fn show_final(&mut self, average: RgbSample, name: ColorName) {
        self.show_message(&text::final_header(name), &text::rgb_line(average));
    }
}
