//! Controller-facing BLE sink.

use colorsense::payload::Payload;
use colorsense::ports::Notifier;
use defmt::warn;

use super::{LinkState, Outbox};

/// Queues payloads for the GATT server task. Never blocks the tick.
pub struct BleNotifier {
    outbox: &'static Outbox,
    link: &'static LinkState,
}

impl BleNotifier {
    pub fn new(outbox: &'static Outbox, link: &'static LinkState) -> Self {
        Self { outbox, link }
    }
}

impl Notifier for BleNotifier {
    fn is_ready(&self) -> bool {
        self.link.is_ready()
    }

    fn send(&mut self, payload: &str) -> bool {
        if !self.link.is_ready() {
            return false;
        }
        let Ok(item) = Payload::try_from(payload) else {
            warn!("BLE payload too long ({} bytes)", payload.len());
            return false;
        };
        if self.outbox.try_send(item).is_err() {
            warn!("BLE outbox full - dropping payload");
            return false;
        }
        true
    }
}
