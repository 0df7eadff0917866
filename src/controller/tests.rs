use super::*;

// -----------------------------------------------------------------------
// Fakes
// -----------------------------------------------------------------------

struct FakeSensor {
    samples: Vec<RgbSample>,
    reads: usize,
    led_on: bool,
    toggles: usize,
}

impl FakeSensor {
    fn new(samples: &[RgbSample]) -> Self {
        Self {
            samples: samples.to_vec(),
            reads: 0,
            led_on: false,
            toggles: 0,
        }
    }
}

impl ColorSensor for FakeSensor {
    fn read_color(&mut self) -> RgbSample {
        let sample = self.samples[self.reads % self.samples.len()];
        self.reads += 1;
        sample
    }

    fn set_led(&mut self, on: bool) {
        self.led_on = on;
    }

    fn is_led_on(&self) -> bool {
        self.led_on
    }

    fn toggle_led(&mut self) {
        self.toggles += 1;
        self.led_on = !self.led_on;
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Frame {
    Ready,
    Sampling(u32, RgbSample, ColorName),
    Progress(u8),
    Message(String, String),
    Final(RgbSample, ColorName),
}

#[derive(Default)]
struct RecordingDisplay {
    frames: Vec<Frame>,
}

impl RecordingDisplay {
    fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    fn messages(&self, line1: &str) -> usize {
        self.frames
            .iter()
            .filter(|f| matches!(f, Frame::Message(l1, _) if l1 == line1))
            .count()
    }

    fn has_final(&self) -> bool {
        self.frames.iter().any(|f| matches!(f, Frame::Final(..)))
    }

    fn progress(&self) -> Vec<u8> {
        self.frames
            .iter()
            .filter_map(|f| match f {
                Frame::Progress(p) => Some(*p),
                _ => None,
            })
            .collect()
    }
}

impl StatusDisplay for RecordingDisplay {
    fn show_ready(&mut self) {
        self.frames.push(Frame::Ready);
    }

    fn show_sampling(&mut self, count: u32, average: RgbSample, name: ColorName) {
        self.frames.push(Frame::Sampling(count, average, name));
    }

    fn show_progress(&mut self, percent: u8) {
        self.frames.push(Frame::Progress(percent));
    }

    fn show_message(&mut self, line1: &str, line2: &str) {
        self.frames
            .push(Frame::Message(line1.to_string(), line2.to_string()));
    }

    fn show_final(&mut self, average: RgbSample, name: ColorName) {
        self.frames.push(Frame::Final(average, name));
    }
}

struct RecordingNotifier {
    ready: bool,
    accept: bool,
    sent: Vec<String>,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self {
            ready: true,
            accept: true,
            sent: Vec::new(),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn send(&mut self, payload: &str) -> bool {
        if !self.accept {
            return false;
        }
        self.sent.push(payload.to_string());
        true
    }
}

// -----------------------------------------------------------------------
// Rig
// -----------------------------------------------------------------------

const TICK: u64 = 10;

const SAMPLES: [RgbSample; 3] = [
    RgbSample::new(10, 20, 30),
    RgbSample::new(20, 30, 40),
    RgbSample::new(30, 40, 50),
];

struct Rig {
    ctrl: Controller<FakeSensor, RecordingDisplay, RecordingNotifier>,
    now: u64,
}

impl Rig {
    fn new() -> Self {
        Self::with_notifier(RecordingNotifier::default())
    }

    fn with_notifier(notifier: RecordingNotifier) -> Self {
        let mut ctrl = Controller::new(
            FakeSensor::new(&SAMPLES),
            RecordingDisplay::default(),
            notifier,
            Timings::default(),
        );
        ctrl.begin(0);
        Self { ctrl, now: 0 }
    }

    /// Hold the raw level for `ms`, ticking every 10 ms.
    fn hold(&mut self, raw: bool, ms: u64) {
        let end = self.now + ms;
        while self.now < end {
            self.ctrl.tick(raw, self.now);
            self.now += TICK;
        }
    }

    /// A short press followed by enough quiet to close the tap sequence.
    fn lone_tap(&mut self) {
        self.hold(true, 100);
        self.hold(false, 600);
    }

    /// A short press followed by a gap inside the tap window.
    fn quick_tap(&mut self) {
        self.hold(true, 100);
        self.hold(false, 150);
    }

    fn long_press(&mut self, ms: u64) {
        self.hold(true, ms);
        self.hold(false, 100);
    }

    /// Three samples and a finalizing hold.
    fn finalize_session(&mut self) {
        self.lone_tap();
        self.lone_tap();
        self.long_press(2500);
    }

    fn frames(&self) -> &[Frame] {
        &self.ctrl.display().frames
    }

    fn sent(&self) -> &[String] {
        &self.ctrl.notifier().sent
    }
}

// -----------------------------------------------------------------------
// Boot and sampling
// -----------------------------------------------------------------------

#[test]
fn begin_turns_led_on_and_shows_ready() {
    let rig = Rig::new();
    assert!(rig.ctrl.sensor().is_led_on());
    assert_eq!(rig.ctrl.state(), ControllerState::ReadyOrSampling);
    assert_eq!(rig.frames(), &[Frame::Ready]);
    assert!(rig.ctrl.sampler().is_empty());
}

#[test]
fn short_press_takes_one_sample() {
    let mut rig = Rig::new();
    rig.lone_tap();

    assert_eq!(rig.ctrl.sensor().reads, 1);
    assert_eq!(rig.ctrl.sampler().count(), 1);
    assert!(rig
        .frames()
        .contains(&Frame::Sampling(1, SAMPLES[0], classify(SAMPLES[0]))));
    assert_eq!(rig.ctrl.state(), ControllerState::ReadyOrSampling);
}

#[test]
fn glitch_shorter_than_debounce_takes_no_sample() {
    let mut rig = Rig::new();
    rig.hold(true, 40);
    rig.hold(false, 600);

    assert_eq!(rig.ctrl.sensor().reads, 0);
    assert!(rig.ctrl.sampler().is_empty());
}

#[test]
fn sampling_screen_shows_running_average() {
    let mut rig = Rig::new();
    rig.lone_tap();
    rig.lone_tap();

    let avg = RgbSample::new(15, 25, 35);
    let expected = Frame::Sampling(2, avg, classify(avg));
    assert!(rig.frames().contains(&expected));
}

// -----------------------------------------------------------------------
// Finalize
// -----------------------------------------------------------------------

#[test]
fn long_hold_release_finalizes_and_sends() {
    let mut rig = Rig::new();
    rig.finalize_session();

    let avg = RgbSample::new(20, 30, 40);
    assert_eq!(rig.sent(), &["20,30,40,GRAY".to_string()]);
    assert_eq!(
        rig.ctrl.display().last(),
        Some(&Frame::Final(avg, ColorName::Gray))
    );
    assert_eq!(
        rig.ctrl.state(),
        ControllerState::AwaitingAck(AckPhase::AwaitPress)
    );
    // The result stays until acknowledged.
    assert_eq!(rig.ctrl.sampler().count(), 3);
}

#[test]
fn acknowledgment_starts_fresh_session() {
    let mut rig = Rig::new();
    rig.finalize_session();

    rig.hold(true, 100);
    assert_eq!(
        rig.ctrl.state(),
        ControllerState::AwaitingAck(AckPhase::AwaitRelease)
    );
    rig.hold(false, 600);

    assert_eq!(rig.ctrl.state(), ControllerState::ReadyOrSampling);
    assert!(rig.ctrl.sampler().is_empty());
    assert_eq!(rig.ctrl.display().last(), Some(&Frame::Ready));
    // The acknowledgment press is not a sample.
    assert_eq!(rig.ctrl.sensor().reads, 3);
    assert_eq!(rig.sent().len(), 1);
}

#[test]
fn acknowledgment_press_is_not_a_tap() {
    let mut rig = Rig::new();
    rig.finalize_session();

    rig.quick_tap();
    rig.quick_tap();
    rig.quick_tap();
    rig.hold(false, 600);

    // Only the two taps after the acknowledgment count.
    assert_eq!(rig.ctrl.display().messages("Samples cleared!"), 0);
    assert_eq!(rig.ctrl.sampler().count(), 2);
}

#[test]
fn finalize_with_too_few_samples_keeps_session() {
    let mut rig = Rig::new();
    rig.lone_tap();
    rig.long_press(2500);

    assert!(rig.sent().is_empty());
    assert_eq!(rig.ctrl.sampler().count(), 2);
    assert_eq!(rig.ctrl.state(), ControllerState::ReadyOrSampling);
    assert_eq!(
        rig.ctrl.display().last(),
        Some(&Frame::Message(
            "Need more samples!".to_string(),
            "2/3 collected".to_string()
        ))
    );

    // The message clears back to the sampling screen.
    rig.hold(false, 2000);
    assert!(matches!(
        rig.ctrl.display().last(),
        Some(Frame::Sampling(2, _, _))
    ));
}

#[test]
fn finalize_still_shows_result_without_listener() {
    let notifier = RecordingNotifier {
        ready: false,
        accept: false,
        sent: Vec::new(),
    };
    let mut rig = Rig::with_notifier(notifier);
    rig.finalize_session();

    assert!(rig.sent().is_empty());
    assert!(matches!(rig.ctrl.display().last(), Some(Frame::Final(..))));
    assert_eq!(
        rig.ctrl.state(),
        ControllerState::AwaitingAck(AckPhase::AwaitPress)
    );
}

#[test]
fn hold_progress_is_drawn_once_per_percent() {
    let mut rig = Rig::new();
    rig.hold(true, 1060);

    assert_eq!(rig.ctrl.state(), ControllerState::FinalizeProgress);
    let progress = rig.ctrl.display().progress();
    assert_eq!(progress.last(), Some(&50));
    assert!(progress.windows(2).all(|w| w[0] < w[1]));

    // Released early: back to the sampling screen, nothing sent.
    rig.hold(false, 100);
    assert_eq!(rig.ctrl.state(), ControllerState::ReadyOrSampling);
    assert!(matches!(
        rig.ctrl.display().last(),
        Some(Frame::Sampling(1, _, _))
    ));
    assert!(rig.sent().is_empty());
}

#[test]
fn hold_past_finalize_threshold_shows_led_toggle_progress() {
    let mut rig = Rig::new();
    rig.hold(true, 3560);

    assert_eq!(rig.ctrl.state(), ControllerState::LedToggleProgress);
    assert_eq!(
        rig.ctrl.display().last(),
        Some(&Frame::Message("LED Toggle:".to_string(), "50%".to_string()))
    );
}

// -----------------------------------------------------------------------
// LED toggle, sleep and wake
// -----------------------------------------------------------------------

#[test]
fn five_second_hold_toggles_led_without_finalizing() {
    let mut rig = Rig::new();
    // Stable at 50 ms, so the last tick sees exactly 5000 ms held.
    rig.hold(true, 5060);
    rig.hold(false, 200);

    assert_eq!(rig.ctrl.sensor().toggles, 1);
    assert!(!rig.ctrl.sensor().is_led_on());
    assert!(rig.sent().is_empty());
    assert_eq!(rig.ctrl.state(), ControllerState::Sleeping);
    assert_eq!(rig.ctrl.display().messages("LED OFF"), 1);
}

#[test]
fn five_second_hold_with_full_session_does_not_finalize() {
    let mut rig = Rig::new();
    rig.lone_tap();
    rig.lone_tap();
    rig.hold(true, 5060);
    rig.hold(false, 200);

    assert_eq!(rig.ctrl.sensor().toggles, 1);
    assert!(rig.sent().is_empty());
    assert!(!rig.ctrl.display().has_final());
    assert_eq!(rig.ctrl.sampler().count(), 3);
}

#[test]
fn hold_just_short_of_toggle_finalizes_instead() {
    let mut rig = Rig::new();
    rig.lone_tap();
    rig.lone_tap();
    rig.hold(true, 5050);
    rig.hold(false, 100);

    assert_eq!(rig.ctrl.sensor().toggles, 0);
    assert_eq!(rig.sent().len(), 1);
}

#[test]
fn press_while_sleeping_wakes_without_sampling() {
    let mut rig = Rig::new();
    rig.hold(true, 5060);
    rig.hold(false, 200);
    let reads = rig.ctrl.sensor().reads;

    rig.hold(true, 100);
    assert!(rig.ctrl.sensor().is_led_on());
    assert_eq!(rig.ctrl.state(), ControllerState::ReadyOrSampling);
    assert_eq!(rig.ctrl.display().messages("Waking up..."), 1);

    rig.hold(false, 600);
    assert_eq!(rig.ctrl.sensor().reads, reads);
    assert_eq!(rig.ctrl.gesture().tap_count(rig.now), 0);
}

#[test]
fn toggling_led_back_on_shows_ready_message() {
    let mut rig = Rig::new();
    rig.ctrl.sensor.led_on = false;
    rig.hold(true, 5060);

    assert_eq!(rig.ctrl.sensor().toggles, 1);
    assert!(rig.ctrl.sensor().is_led_on());
    assert_eq!(rig.ctrl.display().messages("LED ON"), 1);
    assert_eq!(rig.ctrl.state(), ControllerState::ReadyOrSampling);

    // The banner clears back to the sampling screen.
    rig.hold(false, LED_ON_MESSAGE_MS + 100);
    assert!(matches!(
        rig.ctrl.display().last(),
        Some(Frame::Sampling(1, _, _))
    ));
}

#[test]
fn auto_sleep_fires_once_after_inactivity() {
    let mut rig = Rig::new();
    rig.hold(false, 119_990);
    assert!(rig.ctrl.sensor().is_led_on());

    rig.hold(false, 100_000);
    assert!(!rig.ctrl.sensor().is_led_on());
    assert_eq!(rig.ctrl.state(), ControllerState::Sleeping);
    assert_eq!(rig.ctrl.display().messages("Auto sleep"), 1);
}

#[test]
fn press_landing_on_auto_sleep_deadline_is_sampled() {
    let mut rig = Rig::new();
    rig.hold(false, 119_960);
    // Debounced at 120_010, the first tick past the idle timeout.
    rig.hold(true, 200);

    assert!(rig.ctrl.sensor().is_led_on());
    assert_eq!(rig.ctrl.sensor().reads, 1);
    assert_ne!(rig.ctrl.state(), ControllerState::Sleeping);
    assert_eq!(rig.ctrl.display().messages("Auto sleep"), 0);
}

#[test]
fn auto_sleep_while_awaiting_ack_drops_session() {
    let mut rig = Rig::new();
    rig.finalize_session();
    rig.hold(false, 121_000);

    assert_eq!(rig.ctrl.state(), ControllerState::Sleeping);
    assert!(rig.ctrl.sampler().is_empty());
    assert_eq!(rig.sent().len(), 1);
}

// -----------------------------------------------------------------------
// Triple tap
// -----------------------------------------------------------------------

#[test]
fn triple_tap_clears_samples() {
    let mut rig = Rig::new();
    rig.quick_tap();
    rig.quick_tap();
    rig.quick_tap();
    rig.hold(false, 600);

    assert!(rig.ctrl.sampler().is_empty());
    assert_eq!(rig.ctrl.display().messages("Samples cleared!"), 1);
    assert_eq!(rig.ctrl.state(), ControllerState::ReadyOrSampling);

    rig.hold(false, TAP_CLEAR_MESSAGE_MS);
    assert_eq!(rig.ctrl.display().last(), Some(&Frame::Ready));
}

#[test]
fn triple_tap_with_nothing_collected() {
    // Every tap takes a sample, so real taps never reach this branch.
    let mut rig = Rig::new();
    rig.ctrl.on_triple_tap(rig.now);

    assert_eq!(
        rig.ctrl.display().last(),
        Some(&Frame::Message("Nothing to reset".to_string(), String::new()))
    );
    assert!(rig.ctrl.sampler().is_empty());
}

#[test]
fn two_taps_do_not_clear() {
    let mut rig = Rig::new();
    rig.quick_tap();
    rig.quick_tap();
    rig.hold(false, 600);

    assert_eq!(rig.ctrl.sampler().count(), 2);
    assert_eq!(rig.ctrl.display().messages("Samples cleared!"), 0);
}
