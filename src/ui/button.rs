//! Push button input.
//!
//! Active-low with the internal pull-up. The pin is only sampled here;
//! debouncing and gesture timing happen in the controller's
//! `GestureDetector`, which sees one raw level per tick.

use embassy_nrf::gpio::{AnyPin, Input, Pull};

pub struct Button {
    pin: Input<'static>,
}

impl Button {
    pub fn new(pin: AnyPin) -> Self {
        Self {
            pin: Input::new(pin, Pull::Up),
        }
    }

    /// Raw (undebounced) level, `true` while held down.
    pub fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }
}
