//! Running-average sample accumulator.
//!
//! Keeps per-channel sums and a count; individual samples are not stored.

use crate::color::RgbSample;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SampleAccumulator {
    red_sum: u32,
    green_sum: u32,
    blue_sum: u32,
    count: u32,
}

impl SampleAccumulator {
    pub const fn new() -> Self {
        Self {
            red_sum: 0,
            green_sum: 0,
            blue_sum: 0,
            count: 0,
        }
    }

    pub fn add_sample(&mut self, sample: RgbSample) {
        self.red_sum = self.red_sum.saturating_add(u32::from(sample.red));
        self.green_sum = self.green_sum.saturating_add(u32::from(sample.green));
        self.blue_sum = self.blue_sum.saturating_add(u32::from(sample.blue));
        self.count = self.count.saturating_add(1);
    }

    /// Truncating per-channel mean; black when empty.
    pub fn average(&self) -> RgbSample {
        if self.count == 0 {
            return RgbSample::BLACK;
        }
        // Each mean is bounded by the largest channel value, so it fits a u8.
        RgbSample {
            red: (self.red_sum / self.count) as u8,
            green: (self.green_sum / self.count) as u8,
            blue: (self.blue_sum / self.count) as u8,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
