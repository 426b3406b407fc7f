pub mod builder;
pub mod transform;

use std::io::{Read, Seek, Write};
use std::num::ParseFloatError;

use log::warn;
use thiserror::Error;

use crypto::engine::BlockEngine;
use crypto::keys::load_hex_key;
use crypto::{CryptoError, BLOCK_SIZE};

#[derive(Debug, Error)]
pub enum FlashError {
    #[error("starting flash address 0x{0:x} must be a multiple of 16")]
    InvalidAddress(u32),
    #[error("data length is not a multiple of 16 bytes")]
    ShortBlockOnDecrypt,
    #[error(transparent)]
    Key(#[from] CryptoError),
    #[error("firmware version is not a decimal number: {0}")]
    VersionParse(#[from] ParseFloatError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Parameters of one flash encryption run.
pub struct FlashParams {
    /// Master key as a hex string; decoded and length checked on entry.
    pub key_hex: String,
    /// Raw HMAC key for the container tag.
    pub mac_key: Vec<u8>,
    /// Flash address the image will be written to; must be 16-byte aligned.
    pub flash_address: u32,
    /// FLASH_CRYPT_CONF tweak mask, 0..=15.
    pub flash_crypt_conf: u8,
    /// Decrypt the input instead of encrypting it.
    pub do_decrypt: bool,
    /// Firmware version stored in the container header, e.g. "4.05".
    pub version: String,
}

/// Transform `input` for the flash encryption scheme and write the wrapped
/// container to `output`.
///
/// The whole transformed payload is accumulated in memory first: the
/// container starts with the payload length and ends with a tag over the
/// complete payload, so nothing can be written until the run finishes. A
/// failed run therefore commits no output at all.
pub fn flash_encryption_operation<R, W>(
    output: &mut W,
    input: &mut R,
    params: &FlashParams,
) -> Result<(), FlashError>
where
    R: Read + Seek,
    W: Write,
{
    let key = load_hex_key(&params.key_hex)?;

    if params.flash_address as usize % BLOCK_SIZE != 0 {
        return Err(FlashError::InvalidAddress(params.flash_address));
    }

    if params.flash_crypt_conf == 0 {
        warn!("Setting FLASH_CRYPT_CONF to zero is not recommended");
    }

    let mut engine = BlockEngine::new(key, params.flash_crypt_conf);
    let payload = transform::transform_stream(
        input,
        &mut engine,
        params.flash_address,
        params.do_decrypt,
    )?;

    let blob = builder::build_container(&payload, &params.version, &params.mac_key)?;
    output.write_all(&blob)?;

    Ok(())
}
