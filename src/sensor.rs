//! TCS3200 color sensor driver.
//!
//! The sensor outputs a square wave whose frequency follows the light on
//! the selected photodiode bank. We measure the width of one low pulse per
//! channel with TIMER1 running at 1 MHz, then map it through the per-channel
//! calibration in `config`.
//!
//! Pins:
//!   S0/S1 - output frequency scaling (fixed at 20 %)
//!   S2/S3 - photodiode filter select
//!   OUT   - square wave
//!   LED   - illumination LEDs on the breakout

use colorsense::config::{
    ChannelCalibration, BLUE_CALIBRATION, GREEN_CALIBRATION, RED_CALIBRATION,
    SENSOR_PULSE_TIMEOUT_US, SENSOR_SETTLE_MS,
};
use colorsense::ports::ColorSensor;
use colorsense::sensor_logic::channel_value;
use colorsense::RgbSample;
use defmt::{debug, warn};
use embassy_nrf::gpio::{Input, Level, Output};
use embassy_nrf::peripherals::TIMER1;
use embassy_nrf::timer::{Frequency, Timer};
use embassy_time::{block_for, Duration};

#[derive(Clone, Copy, defmt::Format)]
enum Filter {
    Red,
    Green,
    Blue,
}

pub struct Tcs3200 {
    s2: Output<'static>,
    s3: Output<'static>,
    out: Input<'static>,
    led: Output<'static>,
    // Scaling pins are only driven once, but must stay alive.
    _s0: Output<'static>,
    _s1: Output<'static>,
    timer: Timer<'static, TIMER1>,
}

impl Tcs3200 {
    pub fn new(
        mut s0: Output<'static>,
        mut s1: Output<'static>,
        s2: Output<'static>,
        s3: Output<'static>,
        out: Input<'static>,
        led: Output<'static>,
        timer: Timer<'static, TIMER1>,
    ) -> Self {
        // 20 % output frequency scaling.
        s0.set_high();
        s1.set_low();

        timer.set_frequency(Frequency::F1MHz);
        timer.start();

        Self {
            s2,
            s3,
            out,
            led,
            _s0: s0,
            _s1: s1,
            timer,
        }
    }

    fn select(&mut self, filter: Filter) {
        let (s2, s3) = match filter {
            Filter::Red => (Level::Low, Level::Low),
            Filter::Green => (Level::High, Level::High),
            Filter::Blue => (Level::Low, Level::High),
        };
        self.s2.set_level(s2);
        self.s3.set_level(s3);
    }

    fn now_us(&self) -> u32 {
        self.timer.cc(0).capture()
    }

    /// Busy-wait until OUT reaches `high`. `false` if the deadline passed.
    fn wait_level(&self, high: bool, started: u32) -> bool {
        while self.out.is_high() != high {
            if self.now_us().wrapping_sub(started) > SENSOR_PULSE_TIMEOUT_US {
                return false;
            }
        }
        true
    }

    /// Width of the next complete low pulse on OUT.
    fn low_pulse_us(&self) -> Option<u32> {
        let started = self.now_us();

        // Skip a pulse already in progress, then time a full one.
        if !self.wait_level(true, started) || !self.wait_level(false, started) {
            return None;
        }
        let fall = self.now_us();
        if !self.wait_level(true, started) {
            return None;
        }
        Some(self.now_us().wrapping_sub(fall))
    }

    fn read_channel(&mut self, filter: Filter, calibration: ChannelCalibration) -> u8 {
        self.select(filter);
        block_for(Duration::from_millis(SENSOR_SETTLE_MS));

        let pulse = self.low_pulse_us();
        if pulse.is_none() {
            warn!("TCS3200: no pulse on {} channel", filter);
        }
        channel_value(pulse, calibration)
    }
}

impl ColorSensor for Tcs3200 {
    fn read_color(&mut self) -> RgbSample {
        let sample = RgbSample {
            red: self.read_channel(Filter::Red, RED_CALIBRATION),
            green: self.read_channel(Filter::Green, GREEN_CALIBRATION),
            blue: self.read_channel(Filter::Blue, BLUE_CALIBRATION),
        };
        debug!(
            "TCS3200: R:{} G:{} B:{}",
            sample.red, sample.green, sample.blue
        );
        sample
    }

    fn set_led(&mut self, on: bool) {
        self.led.set_level(if on { Level::High } else { Level::Low });
    }

    fn is_led_on(&self) -> bool {
        self.led.is_set_high()
    }
}
