//! Interaction controller - the device's top-level state machine.
//!
//! Polled once per tick with the raw button level. Each tick it updates
//! the gesture detector, then reacts:
//!
//! | Gesture                    | Action                                   |
//! |----------------------------|------------------------------------------|
//! | Press                      | Read sensor, add to running average      |
//! | Hold > 200 ms              | Show progress toward finalize            |
//! | Release after 2 s hold     | Finalize: classify, show, notify         |
//! | Hold 5 s                   | Toggle sensor LED (no finalize)          |
//! | Triple tap                 | Clear collected samples                  |
//! | Press while asleep         | Wake: LED on                             |
//!
//! After a finalize the result stays on screen until the user presses and
//! releases once more (`AwaitingAck`), which starts a fresh session.
//! Waiting is a sub-state advanced per tick, so auto-sleep and tap
//! tracking keep running meanwhile.

use crate::color::{classify, ColorName, RgbSample};
use crate::config::{
    Timings, LED_ON_MESSAGE_MS, NEED_MORE_SAMPLES_MESSAGE_MS, PROGRESS_THRESHOLD_MS,
    TAP_CLEAR_MESSAGE_MS, TRIPLE_TAP_COUNT, WAKE_MESSAGE_MS,
};
use crate::error::Error;
use crate::gesture::GestureDetector;
use crate::payload;
use crate::ports::{ColorSensor, Notifier, StatusDisplay};
use crate::power_logic;
use crate::sampler::SampleAccumulator;
use crate::ui::{progress, text};

#[cfg(test)]
mod tests;

/// Top-level controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerState {
    /// LED off; only a press edge is acted on.
    Sleeping,
    /// LED on, no hold in progress.
    ReadyOrSampling,
    /// Holding, below the finalize threshold.
    FinalizeProgress,
    /// Holding past the finalize threshold. Release finalizes; keep
    /// holding to toggle the LED.
    LedToggleProgress,
    /// Final result on screen, waiting for the user to dismiss it.
    AwaitingAck(AckPhase),
}

/// Steps of the acknowledgment press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AckPhase {
    AwaitPress,
    AwaitRelease,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Progress {
    Finalize(u8),
    LedToggle(u8),
}

pub struct Controller<S, D, N> {
    sensor: S,
    display: D,
    notifier: N,
    gesture: GestureDetector,
    sampler: SampleAccumulator,
    timings: Timings,

    state: ControllerState,
    long_press_handled: bool,
    led_toggle_handled: bool,
    last_activity_ms: u64,

    last_average: RgbSample,
    last_name: ColorName,
    /// Transient message on screen until this time.
    message_until_ms: Option<u64>,
    last_progress: Option<Progress>,
}

impl<S, D, N> Controller<S, D, N>
where
    S: ColorSensor,
    D: StatusDisplay,
    N: Notifier,
{
    pub fn new(sensor: S, display: D, notifier: N, timings: Timings) -> Self {
        Self {
            sensor,
            display,
            notifier,
            gesture: GestureDetector::new(&timings),
            sampler: SampleAccumulator::new(),
            timings,
            state: ControllerState::ReadyOrSampling,
            long_press_handled: false,
            led_toggle_handled: false,
            last_activity_ms: 0,
            last_average: RgbSample::BLACK,
            last_name: ColorName::Black,
            message_until_ms: None,
            last_progress: None,
        }
    }

    /// Boot state: LED on, empty session, ready screen.
    pub fn begin(&mut self, now_ms: u64) {
        self.sensor.set_led(true);
        self.sampler.reset();
        self.state = ControllerState::ReadyOrSampling;
        self.last_activity_ms = now_ms;
        self.display.show_ready();
        info!(
            "controller ready: finalize after {} ms hold, {} samples minimum",
            self.timings.long_press_ms,
            self.timings.min_samples
        );
    }

    /// Run one polling step. Returns the state after the step.
    pub fn tick(&mut self, raw_pressed: bool, now_ms: u64) -> ControllerState {
        let pressed = self.gesture.update(raw_pressed, now_ms);
        self.gesture.update_tap_count(now_ms);

        if self.state == ControllerState::Sleeping {
            if self.gesture.was_just_pressed() {
                self.wake(now_ms);
            }
            self.end_tick(pressed);
            return self.state;
        }

        let taps = self.gesture.tap_count(now_ms);
        if taps > 0 {
            self.gesture.reset_tap_count();
            if taps >= TRIPLE_TAP_COUNT {
                self.on_triple_tap(now_ms);
                self.end_tick(pressed);
                return self.state;
            }
            debug!("tap sequence of {} ignored", taps);
        }

        // A held button is activity, even on the tick its edge lands.
        if !pressed && self.check_auto_sleep(now_ms) {
            self.end_tick(pressed);
            return self.state;
        }

        self.expire_message(now_ms);

        match self.state {
            ControllerState::AwaitingAck(phase) => self.advance_ack(phase, now_ms),
            _ if pressed => self.on_held(now_ms),
            _ if self.gesture.was_just_released() => self.on_release(now_ms),
            _ => {}
        }

        self.end_tick(pressed);
        self.state
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn sampler(&self) -> &SampleAccumulator {
        &self.sampler
    }

    pub fn gesture(&self) -> &GestureDetector {
        &self.gesture
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn end_tick(&mut self, pressed: bool) {
        if !pressed {
            self.long_press_handled = false;
            self.led_toggle_handled = false;
        }
    }

    /// Mark the current press as fully consumed: no hold gestures, no tap.
    fn consume_press(&mut self) {
        self.long_press_handled = true;
        self.led_toggle_handled = true;
        self.gesture.suppress_tap();
    }

    fn show_transient(&mut self, line1: &str, line2: &str, hold_ms: u64, now_ms: u64) {
        self.display.show_message(line1, line2);
        self.message_until_ms = Some(now_ms + hold_ms);
    }

    fn expire_message(&mut self, now_ms: u64) {
        let Some(until) = self.message_until_ms else {
            return;
        };
        if now_ms < until {
            return;
        }
        self.message_until_ms = None;
        if self.state == ControllerState::ReadyOrSampling {
            self.show_idle_screen();
        }
    }

    /// Running average if a session is open, otherwise the ready prompt.
    fn show_idle_screen(&mut self) {
        if self.sampler.is_empty() {
            self.display.show_ready();
        } else {
            self.display
                .show_sampling(self.sampler.count(), self.last_average, self.last_name);
        }
    }

    fn wake(&mut self, now_ms: u64) {
        info!("waking on button press");
        self.sensor.set_led(true);
        self.last_activity_ms = now_ms;
        self.consume_press();
        self.state = ControllerState::ReadyOrSampling;
        self.show_transient("Waking up...", "", WAKE_MESSAGE_MS, now_ms);
    }

    fn check_auto_sleep(&mut self, now_ms: u64) -> bool {
        let idle_ms = now_ms.saturating_sub(self.last_activity_ms);
        if !power_logic::should_auto_sleep(
            self.sensor.is_led_on(),
            idle_ms,
            self.timings.auto_led_off_ms,
        ) {
            return false;
        }

        info!("auto sleep after {} ms idle", idle_ms);
        if matches!(self.state, ControllerState::AwaitingAck(_)) {
            // The result was already sent; drop the unacknowledged session.
            self.sampler.reset();
        }
        self.sensor.set_led(false);
        self.display.show_message("Auto sleep", "Press to wake");
        self.last_activity_ms = now_ms;
        self.message_until_ms = None;
        self.last_progress = None;
        self.state = ControllerState::Sleeping;
        true
    }

    fn on_triple_tap(&mut self, now_ms: u64) {
        self.last_activity_ms = now_ms;
        if self.sampler.is_empty() {
            info!("triple tap with no samples");
            self.show_transient("Nothing to reset", "", TAP_CLEAR_MESSAGE_MS, now_ms);
        } else {
            info!("triple tap: clearing {} samples", self.sampler.count());
            self.sampler.reset();
            self.show_transient(
                "Samples cleared!",
                "Starting fresh",
                TAP_CLEAR_MESSAGE_MS,
                now_ms,
            );
        }
        self.state = ControllerState::ReadyOrSampling;
    }

    fn on_held(&mut self, now_ms: u64) {
        self.last_activity_ms = now_ms;

        if self.gesture.was_just_pressed() {
            self.message_until_ms = None;
            self.last_progress = None;
            self.take_sample();
        }

        if self.led_toggle_handled {
            return;
        }

        let held_ms = self.gesture.pressed_duration(now_ms);
        if held_ms >= self.timings.led_toggle_ms {
            self.on_led_toggle(now_ms);
            return;
        }

        if self.long_press_handled {
            return;
        }

        if held_ms >= self.timings.long_press_ms {
            self.state = ControllerState::LedToggleProgress;
            let pct = progress::led_toggle_percent(
                held_ms,
                self.timings.long_press_ms,
                self.timings.led_toggle_ms,
            );
            if self.last_progress != Some(Progress::LedToggle(pct)) {
                self.last_progress = Some(Progress::LedToggle(pct));
                self.display.show_message("LED Toggle:", &text::percent(pct));
            }
        } else if held_ms > PROGRESS_THRESHOLD_MS {
            self.state = ControllerState::FinalizeProgress;
            let pct = progress::hold_percent(held_ms, self.timings.long_press_ms);
            if self.last_progress != Some(Progress::Finalize(pct)) {
                self.last_progress = Some(Progress::Finalize(pct));
                self.display.show_progress(pct);
            }
        }
    }

    fn on_release(&mut self, now_ms: u64) {
        let released_from = self.state;
        self.state = ControllerState::ReadyOrSampling;
        self.last_progress = None;

        if self.long_press_handled || self.led_toggle_handled {
            return;
        }

        if released_from == ControllerState::LedToggleProgress {
            self.long_press_handled = true;
            if let Err(e) = self.finalize() {
                self.report_finalize_error(e, now_ms);
            }
        } else if released_from == ControllerState::FinalizeProgress {
            self.show_idle_screen();
        }
    }

    fn take_sample(&mut self) {
        let sample = self.sensor.read_color();
        self.sampler.add_sample(sample);

        self.last_average = self.sampler.average();
        self.last_name = classify(self.last_average);
        self.display
            .show_sampling(self.sampler.count(), self.last_average, self.last_name);

        debug!(
            "sample #{}: R:{} G:{} B:{}",
            self.sampler.count(),
            sample.red,
            sample.green,
            sample.blue
        );
    }

    fn on_led_toggle(&mut self, now_ms: u64) {
        self.consume_press();
        self.last_progress = None;
        self.sensor.toggle_led();

        if self.sensor.is_led_on() {
            info!("LED toggled on");
            self.state = ControllerState::ReadyOrSampling;
            self.show_transient("LED ON", "Ready to sample", LED_ON_MESSAGE_MS, now_ms);
        } else {
            info!("LED toggled off");
            self.state = ControllerState::Sleeping;
            self.message_until_ms = None;
            self.display.show_message("LED OFF", "Power saving mode");
        }
    }

    /// Close the session: classify the average, show it and send it.
    fn finalize(&mut self) -> Result<(), Error> {
        let collected = self.sampler.count();
        let required = self.timings.min_samples;
        if collected < required {
            return Err(Error::InsufficientSamples {
                collected,
                required,
            });
        }

        let average = self.sampler.average();
        let name = classify(average);
        let payload = payload::encode(average, name)?;

        self.display.show_final(average, name);
        if !self.notifier.is_ready() {
            warn!("no BLE client listening, result shown locally only");
        }
        if self.notifier.send(&payload) {
            info!("sent {}", payload.as_str());
        }

        self.state = ControllerState::AwaitingAck(AckPhase::AwaitPress);
        Ok(())
    }

    fn report_finalize_error(&mut self, error: Error, now_ms: u64) {
        warn!("finalize rejected: {}", error);
        match error {
            Error::InsufficientSamples { collected: 0, .. } => self.show_transient(
                "No samples!",
                "Press button first",
                NEED_MORE_SAMPLES_MESSAGE_MS,
                now_ms,
            ),
            Error::InsufficientSamples {
                collected,
                required,
            } => self.show_transient(
                "Need more samples!",
                &text::samples_collected(collected, required),
                NEED_MORE_SAMPLES_MESSAGE_MS,
                now_ms,
            ),
            _ => self.show_transient("Send failed", "", NEED_MORE_SAMPLES_MESSAGE_MS, now_ms),
        }
    }

    fn advance_ack(&mut self, phase: AckPhase, now_ms: u64) {
        match phase {
            AckPhase::AwaitPress => {
                if self.gesture.was_just_pressed() {
                    self.last_activity_ms = now_ms;
                    self.consume_press();
                    self.state = ControllerState::AwaitingAck(AckPhase::AwaitRelease);
                }
            }
            AckPhase::AwaitRelease => {
                if self.gesture.is_pressed() {
                    self.last_activity_ms = now_ms;
                } else if self.gesture.was_just_released() {
                    self.last_activity_ms = now_ms;
                    self.sampler.reset();
                    self.state = ControllerState::ReadyOrSampling;
                    self.display.show_ready();
                    info!("result acknowledged, ready for new samples");
                }
            }
        }
    }
}
