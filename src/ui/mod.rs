//! User interface - SSD1306 status screen and the single push button.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×32 OLED via I²C, drives `StatusDisplay`
//! - **Button**: one active-low tactile switch, sampled every controller tick
//!
//! Text layout and progress math live in the library (`colorsense::ui`)
//! so they can be tested on the host.

pub mod button;
pub mod display;
