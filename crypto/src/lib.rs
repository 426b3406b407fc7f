mod constants;
pub mod engine;
pub mod keys;
pub mod tweak;

pub use constants::{BLOCK_SIZE, KEY_SIZE, KEY_SIZE_192, TWEAK_REGION};

use thiserror::Error;

/// A master key after loading and extension, always 32 bytes.
pub type MasterKey = [u8; KEY_SIZE];

#[derive(Debug, Error, PartialEq)]
pub enum CryptoError {
    #[error("key material has wrong length ({0} bytes), 24 or 32 expected")]
    InvalidKeyLength(usize),
    #[error("key is not valid hex: {0}")]
    KeyDecode(#[from] hex::FromHexError),
}
