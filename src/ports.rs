//! Interfaces the controller drives.
//!
//! The firmware binds these to the TCS3200, the SSD1306 and the BLE GATT
//! server; tests bind them to recording fakes.

use crate::color::{ColorName, RgbSample};

/// Photodiode color sensor with an illumination LED.
pub trait ColorSensor {
    /// Blocking read of one calibrated sample.
    fn read_color(&mut self) -> RgbSample;

    fn set_led(&mut self, on: bool);

    fn is_led_on(&self) -> bool;

    fn toggle_led(&mut self) {
        let on = self.is_led_on();
        self.set_led(!on);
    }
}

/// Status screen. Every call redraws the whole screen; nothing is returned.
pub trait StatusDisplay {
    fn show_ready(&mut self);

    fn show_sampling(&mut self, count: u32, average: RgbSample, name: ColorName);

    fn show_progress(&mut self, percent: u8);

    fn show_message(&mut self, line1: &str, line2: &str);

    fn show_final(&mut self, average: RgbSample, name: ColorName);
}

/// Best-effort wireless sink.
pub trait Notifier {
    /// A peer is connected and listening.
    fn is_ready(&self) -> bool;

    /// Queue a payload. Returns `false` if it was dropped.
    fn send(&mut self, payload: &str) -> bool;
}
