/// Decide whether the sensor LED should be switched off for inactivity.
///
/// Fires only once the idle time strictly exceeds the timeout, and never
/// when the LED is already off.
pub fn should_auto_sleep(led_on: bool, idle_ms: u64, auto_off_timeout_ms: u64) -> bool {
    if !led_on {
        return false;
    }

    idle_ms > auto_off_timeout_ms
}
