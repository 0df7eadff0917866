//! Single-button gesture detection.
//!
//! Polled once per controller tick with the raw pin level and a
//! monotonic timestamp. Produces:
//!
//! - a debounced level (raw level must hold for `debounce_ms`),
//! - press / release edges relative to the previous tick,
//! - the age of the current press,
//! - tap sequences: short presses separated by less than `tap_timeout_ms`.
//!
//! All state is held in fields so the detector can be inspected and
//! reset; nothing is hidden in statics.

use crate::config::Timings;

#[derive(Clone, Debug)]
pub struct GestureDetector {
    debounce_ms: u64,
    short_press_max_ms: u64,
    tap_timeout_ms: u64,

    /// Debounced level.
    stable: bool,
    /// Last raw level seen and when it was first seen.
    raw: bool,
    raw_since_ms: u64,

    just_pressed: bool,
    just_released: bool,
    press_start_ms: Option<u64>,
    last_press_ms: u64,

    taps: u8,
    last_tap_ms: Option<u64>,
    tap_suppressed: bool,
}

impl GestureDetector {
    pub fn new(timings: &Timings) -> Self {
        Self {
            debounce_ms: timings.debounce_ms,
            short_press_max_ms: timings.short_press_max_ms,
            tap_timeout_ms: timings.tap_timeout_ms,
            stable: false,
            raw: false,
            raw_since_ms: 0,
            just_pressed: false,
            just_released: false,
            press_start_ms: None,
            last_press_ms: 0,
            taps: 0,
            last_tap_ms: None,
            tap_suppressed: false,
        }
    }

    /// Feed one raw sample (`true` = pressed). Returns the debounced level.
    ///
    /// Call at most once per tick; edges are computed against the
    /// previous call.
    pub fn update(&mut self, raw_pressed: bool, now_ms: u64) -> bool {
        let previous = self.stable;

        if raw_pressed != self.raw {
            self.raw = raw_pressed;
            self.raw_since_ms = now_ms;
        } else if raw_pressed != self.stable
            && now_ms.saturating_sub(self.raw_since_ms) >= self.debounce_ms
        {
            self.stable = raw_pressed;
        }

        self.just_pressed = self.stable && !previous;
        self.just_released = !self.stable && previous;

        if self.just_pressed {
            self.press_start_ms = Some(now_ms);
        }
        if self.just_released {
            self.last_press_ms = self
                .press_start_ms
                .map_or(0, |start| now_ms.saturating_sub(start));
            self.press_start_ms = None;
        }

        self.stable
    }

    pub fn is_pressed(&self) -> bool {
        self.stable
    }

    pub fn is_pressed_for(&self, duration_ms: u64, now_ms: u64) -> bool {
        self.stable && self.pressed_duration(now_ms) >= duration_ms
    }

    /// Age of the current press, 0 while released.
    pub fn pressed_duration(&self, now_ms: u64) -> u64 {
        match self.press_start_ms {
            Some(start) if self.stable => now_ms.saturating_sub(start),
            _ => 0,
        }
    }

    /// Duration of the most recently completed press.
    pub fn last_press_duration(&self) -> u64 {
        self.last_press_ms
    }

    pub fn was_just_pressed(&self) -> bool {
        self.just_pressed
    }

    pub fn was_just_released(&self) -> bool {
        self.just_released
    }

    /// Count a short press that ended on this tick. Call after `update`.
    pub fn update_tap_count(&mut self, now_ms: u64) {
        if !self.just_released {
            return;
        }
        let suppressed = core::mem::take(&mut self.tap_suppressed);
        if !suppressed && self.last_press_ms < self.short_press_max_ms {
            self.taps = self.taps.saturating_add(1);
            self.last_tap_ms = Some(now_ms);
        }
    }

    /// Taps in a finished sequence, or 0 while the sequence may still grow.
    ///
    /// Keeps reporting the same count until `reset_tap_count`.
    pub fn tap_count(&self, now_ms: u64) -> u8 {
        match self.last_tap_ms {
            Some(last) if !self.stable && now_ms.saturating_sub(last) > self.tap_timeout_ms => {
                self.taps
            }
            _ => 0,
        }
    }

    pub fn reset_tap_count(&mut self) {
        self.taps = 0;
        self.last_tap_ms = None;
    }

    /// Exclude the current press from tap counting. No-op while released.
    pub fn suppress_tap(&mut self) {
        if self.stable {
            self.tap_suppressed = true;
        }
    }
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new(&Timings::default())
    }
}
