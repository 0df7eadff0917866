//! Notifier wire format.
//!
//! Plain ASCII, comma separated, no terminator:
//!
//! ```text
//! <red>,<green>,<blue>,<COLOR NAME>
//! ```
//!
//! e.g. `20,30,40,GRAY`. Clients parse it as four CSV fields.

use core::fmt::Write;

use crate::color::{ColorName, RgbSample};
use crate::error::Error;

/// Longest payload: "255,255,255,LIGHT GRAY" is 22 bytes.
pub const PAYLOAD_CAPACITY: usize = 32;

pub type Payload = heapless::String<PAYLOAD_CAPACITY>;

pub fn encode(average: RgbSample, name: ColorName) -> Result<Payload, Error> {
    let mut payload = Payload::new();
    write!(
        payload,
        "{},{},{},{}",
        average.red,
        average.green,
        average.blue,
        name.as_str()
    )
    .map_err(|_| Error::PayloadOverflow)?;
    Ok(payload)
}
