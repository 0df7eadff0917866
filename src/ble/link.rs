//! Connection state shared between the GATT server task and the notifier.
//!
//! Written only by the BLE side; the controller sees it through
//! `Notifier::is_ready()`.

use core::sync::atomic::{AtomicBool, Ordering};

pub struct LinkState {
    connected: AtomicBool,
    subscribed: AtomicBool,
}

impl LinkState {
    pub const fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
            subscribed: AtomicBool::new(false),
        }
    }

    pub fn on_connected(&self) {
        self.connected.store(true, Ordering::Release);
    }

    /// Drops the subscription along with the link.
    pub fn on_disconnected(&self) {
        self.connected.store(false, Ordering::Release);
        self.subscribed.store(false, Ordering::Release);
    }

    /// CCCD write from the central (notifications or indications enabled).
    pub fn set_subscribed(&self, enabled: bool) {
        self.subscribed.store(enabled, Ordering::Release);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// A central is connected and has enabled notifications.
    pub fn is_ready(&self) -> bool {
        self.is_connected() && self.subscribed.load(Ordering::Acquire)
    }
}

impl Default for LinkState {
    fn default() -> Self {
        Self::new()
    }
}
