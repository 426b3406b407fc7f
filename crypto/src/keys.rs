use log::info;

use crate::constants::*;
use crate::{CryptoError, MasterKey};

/// Decode a hex-encoded master key and load it.
pub fn load_hex_key(key_hex: &str) -> Result<MasterKey, CryptoError> {
    let raw = hex::decode(key_hex)?;
    load_hardware_key(&raw)
}

/// Validate raw key material and bring it to the 32-byte working length.
///
/// Only 24- and 32-byte keys are accepted. The 24-byte variant is extended
/// by appending a copy of its bytes 8..16, matching how the SoC expands a
/// 192-bit efuse key to feed its 256-bit cipher.
pub fn load_hardware_key(raw: &[u8]) -> Result<MasterKey, CryptoError> {
    let mut key = [0u8; KEY_SIZE];

    match raw.len() {
        KEY_SIZE_192 => {
            key[..KEY_SIZE_192].copy_from_slice(raw);
            key[KEY_SIZE_192..].copy_from_slice(&raw[8..16]);
            info!("Using 192-bit key (extended)");
        }
        KEY_SIZE => {
            key.copy_from_slice(raw);
            info!("Using 256-bit key");
        }
        n => return Err(CryptoError::InvalidKeyLength(n)),
    }

    Ok(key)
}

#[cfg(test)]
mod keys_tests {
    use super::*;

    #[test]
    fn full_length_key_passes_through() {
        let raw: Vec<u8> = (0..32).collect();
        let key = load_hardware_key(&raw).unwrap();
        assert_eq!(key[..], raw[..]);
    }

    #[test]
    fn short_key_is_extended_from_its_own_middle() {
        let raw: Vec<u8> = (100..124).collect();
        let key = load_hardware_key(&raw).unwrap();

        assert_eq!(key[..24], raw[..]);
        assert_eq!(key[24..], raw[8..16]);
    }

    #[test]
    fn other_lengths_are_rejected() {
        for len in [0usize, 8, 16, 23, 25, 31, 33, 64] {
            let raw = vec![0u8; len];
            assert_eq!(
                load_hardware_key(&raw).unwrap_err(),
                CryptoError::InvalidKeyLength(len)
            );
        }
    }

    #[test]
    fn hex_key_decodes_and_loads() {
        let key_hex = "02d20bbd7e394ad5999a4cebabac9619732c343a4cac99470c03e23ba2bdc2bc";
        let key = load_hex_key(key_hex).unwrap();
        assert_eq!(key[0], 0x02);
        assert_eq!(key[31], 0xbc);
    }

    #[test]
    fn malformed_hex_is_a_decode_error() {
        let err = load_hex_key("zz").unwrap_err();
        assert!(matches!(err, CryptoError::KeyDecode(_)));

        // Odd digit counts are a decode failure too, not a length failure.
        let err = load_hex_key("abc").unwrap_err();
        assert!(matches!(err, CryptoError::KeyDecode(_)));
    }
}
