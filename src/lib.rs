//! Host-testable library interface for colorsense.
//!
//! Everything that does not touch hardware lives here: the gesture
//! detector, sample averaging, the color classifier, the interaction
//! controller and the pure helpers behind the display and BLE drivers.
//!
//! Usage: `cargo test --lib` (host), `cargo test --test integration`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and binds the `ports` traits to the real peripherals.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod payload;
pub mod ports;
pub mod power_logic;
pub mod sampler;
pub mod sensor_logic;

// Internal module paths for the pure halves of the ble/ and ui/ drivers
#[path = "ble/adv_data.rs"]
mod ble_adv_data_impl;
#[path = "ble/link.rs"]
mod ble_link_impl;
#[path = "ui/progress.rs"]
mod ui_progress_impl;
#[path = "ui/text.rs"]
mod ui_text_impl;

pub mod ble {
    pub mod adv_data {
        pub use crate::ble_adv_data_impl::*;
    }
    pub mod link {
        pub use crate::ble_link_impl::LinkState;
    }
}

pub mod ui {
    pub mod progress {
        pub use crate::ui_progress_impl::{hold_percent, led_toggle_percent};
    }
    pub mod text {
        pub use crate::ui_text_impl::*;
    }
}

pub use color::{classify, ColorName, RgbSample};
pub use controller::{AckPhase, Controller, ControllerState};
pub use error::{BleError, Error};

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
