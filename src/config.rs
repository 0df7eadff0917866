//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// Button gestures

/// Raw button level must hold this long before the debounced state follows (ms).
pub const DEBOUNCE_DELAY_MS: u64 = 50;

/// Quiet time after the last tap that closes a tap sequence (ms).
pub const TAP_TIMEOUT_MS: u64 = 400;

/// Presses shorter than this count as taps (ms).
pub const SHORT_PRESS_MAX_MS: u64 = 500;

/// Hold duration that arms the finalize action (ms).
pub const LONG_PRESS_DURATION_MS: u64 = 2000;

/// Hold duration that toggles the sensor LED instead (ms).
pub const LED_TOGGLE_DURATION_MS: u64 = 5000;

/// Hold progress is only drawn once the press is longer than this (ms).
pub const PROGRESS_THRESHOLD_MS: u64 = 200;

/// Taps in one sequence needed to clear the collected samples.
pub const TRIPLE_TAP_COUNT: u8 = 3;

// Sampling & power

/// Samples needed before a session can be finalized.
pub const MIN_SAMPLES_REQUIRED: u32 = 3;

/// Inactivity before the sensor LED is switched off (ms).
pub const AUTO_LED_OFF_TIMEOUT_MS: u64 = 120_000;

/// Controller polling period (ms).
pub const TICK_MS: u64 = 10;

// Transient message hold times (ms)

pub const NEED_MORE_SAMPLES_MESSAGE_MS: u64 = 2000;
pub const TAP_CLEAR_MESSAGE_MS: u64 = 1500;
pub const WAKE_MESSAGE_MS: u64 = 500;
pub const LED_ON_MESSAGE_MS: u64 = 1000;

/// Boot screens (ms).
pub const SPLASH_MS: u64 = 2500;
pub const WELCOME_MS: u64 = 1500;

// BLE

/// GAP device name, also sent in the scan response.
pub const BLE_DEVICE_NAME: &str = "Surface Color Detector";

/// Color service UUID.
pub const BLE_SERVICE_UUID: &str = "4fafc201-1fb5-459e-8fcc-c5c9c331914b";

/// Same UUID in little-endian byte order, as carried in advertisements.
pub const BLE_SERVICE_UUID_LE: [u8; 16] = [
    0x4b, 0x91, 0x31, 0xc3, 0xc9, 0xc5, 0xcc, 0x8f, 0x9e, 0x45, 0xb5, 0x1f, 0x01, 0xc2, 0xaf, 0x4f,
];

/// Reading characteristic UUID (read / write / notify / indicate).
pub const BLE_CHARACTERISTIC_UUID: &str = "beb5483e-36e1-4688-b7f5-ea07361b26a8";

/// Pending payloads between the controller and the GATT server.
pub const BLE_OUTBOX_DEPTH: usize = 4;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button         → P0.11 (active-low, internal pull-up)
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27
//   TCS3200 S0..S3 → P0.03, P0.04, P0.28, P0.29
//   TCS3200 OUT    → P0.30
//   TCS3200 LED    → P0.31

// Display

/// SSD1306 I²C address.
pub const DISPLAY_I2C_ADDRESS: u8 = 0x3C;

/// Initialisation attempts before giving up on the display.
pub const DISPLAY_INIT_ATTEMPTS: u8 = 3;

/// Panel height in pixels (128x32).
pub const DISPLAY_HEIGHT: i32 = 32;

/// Glyph height of the status font (FONT_6X10).
pub const TEXT_LINE_HEIGHT: i32 = 10;

/// Top edge of each line on the three-line sampling screen.
pub const SAMPLING_ROWS: [i32; 3] = [0, 11, 22];

/// Top edge of each line on the two-line message screen.
pub const MESSAGE_ROWS: [i32; 2] = [8, 20];

// TCS3200 sensor

/// Settling time after switching the photodiode filter (ms).
pub const SENSOR_SETTLE_MS: u64 = 20;

/// Give up waiting for an output pulse after this long (us).
pub const SENSOR_PULSE_TIMEOUT_US: u32 = 100_000;

/// Pulse widths (us) measured on a white and a black reference card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelCalibration {
    pub white_us: u32,
    pub black_us: u32,
}

pub const RED_CALIBRATION: ChannelCalibration = ChannelCalibration {
    white_us: 26,
    black_us: 155,
};
pub const GREEN_CALIBRATION: ChannelCalibration = ChannelCalibration {
    white_us: 24,
    black_us: 166,
};
pub const BLUE_CALIBRATION: ChannelCalibration = ChannelCalibration {
    white_us: 30,
    black_us: 197,
};

/// Runtime-tunable controller timings. `Default` uses the constants above.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timings {
    pub debounce_ms: u64,
    pub tap_timeout_ms: u64,
    pub short_press_max_ms: u64,
    pub long_press_ms: u64,
    pub led_toggle_ms: u64,
    pub auto_led_off_ms: u64,
    pub min_samples: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_DELAY_MS,
            tap_timeout_ms: TAP_TIMEOUT_MS,
            short_press_max_ms: SHORT_PRESS_MAX_MS,
            long_press_ms: LONG_PRESS_DURATION_MS,
            led_toggle_ms: LED_TOGGLE_DURATION_MS,
            auto_led_off_ms: AUTO_LED_OFF_TIMEOUT_MS,
            min_samples: MIN_SAMPLES_REQUIRED,
        }
    }
}
