use heapless::Vec;

/// Legacy advertising / scan response payload limit.
pub const LEGACY_ADV_MAX: usize = 31;

pub type AdvPayload = Vec<u8, LEGACY_ADV_MAX>;

const AD_TYPE_FLAGS: u8 = 0x01;
const AD_TYPE_COMPLETE_128_UUIDS: u8 = 0x07;
const AD_TYPE_SHORT_NAME: u8 = 0x08;
const AD_TYPE_COMPLETE_NAME: u8 = 0x09;

/// LE General Discoverable | BR/EDR Not Supported.
const FLAGS_GENERAL_NO_BREDR: u8 = 0x06;

/// Append one `[len][type][data...]` structure. Returns `false` if it does not fit.
fn push_field(buf: &mut AdvPayload, ad_type: u8, data: &[u8]) -> bool {
    if buf.len() + 2 + data.len() > LEGACY_ADV_MAX {
        return false;
    }
    // Capacity checked above.
    let _ = buf.push(data.len() as u8 + 1);
    let _ = buf.push(ad_type);
    let _ = buf.extend_from_slice(data);
    true
}

/// Advertising data: flags + the complete 128-bit service UUID list.
pub fn advertising_data(service_uuid_le: &[u8; 16]) -> AdvPayload {
    let mut buf = AdvPayload::new();
    push_field(&mut buf, AD_TYPE_FLAGS, &[FLAGS_GENERAL_NO_BREDR]);
    push_field(&mut buf, AD_TYPE_COMPLETE_128_UUIDS, service_uuid_le);
    buf
}

/// Scan response: the complete local name, or a shortened one if it is too long.
pub fn scan_response(name: &str) -> AdvPayload {
    let mut buf = AdvPayload::new();
    let bytes = name.as_bytes();
    if !push_field(&mut buf, AD_TYPE_COMPLETE_NAME, bytes) {
        let room = LEGACY_ADV_MAX - 2;
        push_field(&mut buf, AD_TYPE_SHORT_NAME, &bytes[..room]);
    }
    buf
}
