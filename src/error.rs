//! Unified error type for colorsense.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Sampling
    /// Finalize was requested before enough samples were collected.
    InsufficientSamples { collected: u32, required: u32 },

    /// The notifier payload did not fit its fixed-size buffer.
    PayloadOverflow,

    // UI / Display
    /// I²C transaction to the display failed.
    Display,

    // BLE
    /// The SoftDevice returned a BLE-level error.
    Ble(BleError),
}

/// Subset of BLE errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// GATT server registration failed at startup.
    RegisterFailed,
    /// Advertising could not start.
    AdvertiseFailed,
    /// Characteristic value update or notify failed.
    NotifyFailed,
}

// Convenience conversions

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}
