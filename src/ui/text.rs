//! Screen text composition.
//!
//! Fixed-capacity strings so rendering never allocates. A formatted piece
//! that does not fit is dropped along with everything after it.

use core::fmt::Write;

use crate::color::{ColorName, RgbSample};

pub type Line = heapless::String<32>;

fn line(args: core::fmt::Arguments<'_>) -> Line {
    let mut s = Line::new();
    let _ = s.write_fmt(args);
    s
}

/// `R:12 G:34 B:56`
pub fn rgb_line(sample: RgbSample) -> Line {
    line(format_args!(
        "R:{} G:{} B:{}",
        sample.red, sample.green, sample.blue
    ))
}

/// `SAMPLING [3 samples]`
pub fn sampling_header(count: u32) -> Line {
    line(format_args!("SAMPLING [{} samples]", count))
}

/// `FINAL: GRAY`
pub fn final_header(name: ColorName) -> Line {
    line(format_args!("FINAL: {}", name.as_str()))
}

/// `2/3 collected`
pub fn samples_collected(collected: u32, required: u32) -> Line {
    line(format_args!("{}/{} collected", collected, required))
}

/// `40%`
pub fn percent(value: u8) -> Line {
    line(format_args!("{}%", value))
}
