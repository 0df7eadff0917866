/// Percentage of the way to the finalize threshold, capped at 100.
pub fn hold_percent(held_ms: u64, long_press_ms: u64) -> u8 {
    if long_press_ms == 0 {
        return 100;
    }
    (held_ms.saturating_mul(100) / long_press_ms).min(100) as u8
}

/// Percentage of the way from the finalize threshold to the LED toggle.
pub fn led_toggle_percent(held_ms: u64, long_press_ms: u64, led_toggle_ms: u64) -> u8 {
    let span = led_toggle_ms.saturating_sub(long_press_ms);
    if span == 0 {
        return 100;
    }
    let into = held_ms.saturating_sub(long_press_ms);
    (into.saturating_mul(100) / span).min(100) as u8
}
