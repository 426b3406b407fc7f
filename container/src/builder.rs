use byteorder::{ByteOrder, LittleEndian};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::FlashError;

type HmacSha256 = Hmac<Sha256>;

/// Size of the keyed hash trailing the payload.
pub const TAG_SIZE: usize = 32;

/// Length field plus version field.
pub const HEADER_SIZE: usize = 8;

/// Wrap a transformed payload into the final container:
/// length (4B LE) ++ version (4B LE) ++ payload ++ HMAC-SHA256 tag.
///
/// The tag covers the payload only, not the header fields.
pub fn build_container(
    payload: &[u8],
    version: &str,
    mac_key: &[u8],
) -> Result<Vec<u8>, FlashError> {
    let mut size_bytes = [0u8; 4];
    LittleEndian::write_u32(&mut size_bytes, payload.len() as u32);

    // Older builds of the vendor tool computed this field but wrote the
    // payload length a second time in its place; the header carries the
    // encoded version here, as the container layout defines.
    let mut version_bytes = [0u8; 4];
    LittleEndian::write_u32(&mut version_bytes, encode_version(version)?);

    let mut mac = HmacSha256::new_from_slice(mac_key).expect("HMAC accepts keys of any length");
    mac.update(payload);
    let tag = mac.finalize().into_bytes();

    let mut blob = Vec::with_capacity(HEADER_SIZE + payload.len() + TAG_SIZE);
    blob.extend_from_slice(&size_bytes);
    blob.extend_from_slice(&version_bytes);
    blob.extend_from_slice(payload);
    blob.extend_from_slice(&tag);

    Ok(blob)
}

/// Encode a "4.05"-style version string into the container's version field.
///
/// The value is parsed at f32 precision, widened, scaled by 100 and
/// truncated, reproducing the arithmetic of the original packaging tool
/// ("4.05" encodes to 405, "0.29" to 28).
fn encode_version(version: &str) -> Result<u32, FlashError> {
    let value: f32 = version.parse()?;
    Ok((f64::from(value) * 100.0) as u32)
}
