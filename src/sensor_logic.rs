use crate::config::ChannelCalibration;

/// Map a measured low-pulse width onto a 0..=255 channel value.
///
/// Linear between the calibration points (white reads 255, black reads 0),
/// clamped outside them. A missing pulse (timeout) reads as dark.
pub fn channel_value(pulse_us: Option<u32>, calibration: ChannelCalibration) -> u8 {
    let Some(pulse) = pulse_us else {
        return 0;
    };

    let white = i64::from(calibration.white_us);
    let black = i64::from(calibration.black_us);
    if white == black {
        return 0;
    }

    let mapped = (i64::from(pulse) - white) * -255 / (black - white) + 255;
    mapped.clamp(0, 255) as u8
}
