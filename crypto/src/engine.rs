use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;

use crate::constants::*;
use crate::tweak::{tweak_key, tweak_range};
use crate::MasterKey;

struct Keyed {
    cipher: Aes256,
    derived_at: u64,
}

/// Block cipher keyed per 32-byte flash region.
///
/// The engine owns the master key, the expanded tweak range and the cipher
/// instance for the region it was last keyed for. A fresh tweaked key is
/// derived on the first block and whenever a block starts on a 32-byte
/// boundary; the block in between reuses the previous key. One engine
/// serves exactly one transform run and holds no shared state.
pub struct BlockEngine {
    key: MasterKey,
    range: Vec<usize>,
    keyed: Option<Keyed>,
}

impl BlockEngine {
    pub fn new(key: MasterKey, flash_crypt_conf: u8) -> Self {
        Self {
            key,
            range: tweak_range(flash_crypt_conf),
            keyed: None,
        }
    }

    fn cipher_for(&mut self, offset: u64) -> &Aes256 {
        let stale = match &self.keyed {
            None => true,
            Some(keyed) => offset % TWEAK_REGION == 0 && keyed.derived_at != offset,
        };
        if stale {
            let block_key = tweak_key(&self.key, offset, &self.range);
            self.keyed = Some(Keyed {
                cipher: Aes256::new(GenericArray::from_slice(&block_key)),
                derived_at: offset,
            });
        }

        let keyed = self.keyed.as_ref().expect("engine keyed above");
        &keyed.cipher
    }

    /// Single-block encrypt under the key for the region containing `offset`.
    pub fn forward(&mut self, offset: u64, block: &mut [u8; BLOCK_SIZE]) {
        let cipher = self.cipher_for(offset);
        cipher.encrypt_block(GenericArray::from_mut_slice(&mut block[..]));
    }

    /// Single-block decrypt under the key for the region containing `offset`.
    pub fn inverse(&mut self, offset: u64, block: &mut [u8; BLOCK_SIZE]) {
        let cipher = self.cipher_for(offset);
        cipher.decrypt_block(GenericArray::from_mut_slice(&mut block[..]));
    }
}

#[cfg(test)]
mod engine_tests {
    use super::*;
    use rand::Rng;

    fn random_key() -> MasterKey {
        let mut rng = rand::thread_rng();
        let mut key = [0u8; KEY_SIZE];
        rng.fill(&mut key[..]);
        key
    }

    #[test]
    fn forward_then_inverse_is_identity() {
        let mut rng = rand::thread_rng();

        for _ in 0..50 {
            let key = random_key();
            let offset = rng.gen_range(0u64..0x0100_0000) & !0xF;

            let mut block = [0u8; BLOCK_SIZE];
            rng.fill(&mut block[..]);
            let original = block;

            let mut engine = BlockEngine::new(key, 0xF);
            engine.forward(offset, &mut block);
            assert_ne!(block, original);

            let mut engine = BlockEngine::new(key, 0xF);
            engine.inverse(offset, &mut block);
            assert_eq!(block, original);
        }
    }

    #[test]
    fn paired_blocks_share_a_key() {
        let key = random_key();
        let plaintext = [0x5Au8; BLOCK_SIZE];

        // Blocks at offsets 0 and 16 fall in the same region and must
        // produce identical ciphertext for identical plaintext.
        let mut engine = BlockEngine::new(key, 0xF);
        let mut first = plaintext;
        engine.forward(0, &mut first);
        let mut second = plaintext;
        engine.forward(16, &mut second);
        assert_eq!(first, second);

        // The next region starts at 32 and re-keys.
        let mut third = plaintext;
        engine.forward(32, &mut third);
        assert_ne!(first, third);
    }

    #[test]
    fn first_block_keys_even_when_unaligned() {
        let key = random_key();
        let plaintext = [0xC3u8; BLOCK_SIZE];

        // A run whose base address is only 16-byte aligned starts mid-region;
        // the engine must still key itself on the very first block.
        let mut engine = BlockEngine::new(key, 0xF);
        let mut at_once = plaintext;
        engine.forward(0x210, &mut at_once);

        // Same region keyed from its boundary gives the same ciphertext.
        let mut engine = BlockEngine::new(key, 0xF);
        let mut from_boundary = plaintext;
        engine.forward(0x200, &mut from_boundary);
        assert_eq!(at_once, from_boundary);
    }

    #[test]
    fn zero_mask_engine_never_rekeys_in_effect() {
        let key = random_key();
        let plaintext = [0x11u8; BLOCK_SIZE];

        // With an empty tweak range every region derives the master key, so
        // ciphertext is offset independent.
        let mut engine = BlockEngine::new(key, 0);
        let mut near = plaintext;
        engine.forward(0, &mut near);
        let mut far = plaintext;
        engine.forward(0x00F0_0000, &mut far);
        assert_eq!(near, far);
    }

    #[test]
    fn independent_engines_agree() {
        let key = random_key();
        let mut block_a = [0x77u8; BLOCK_SIZE];
        let mut block_b = [0x77u8; BLOCK_SIZE];

        BlockEngine::new(key, 0xF).forward(0x1000, &mut block_a);
        BlockEngine::new(key, 0xF).forward(0x1000, &mut block_b);

        assert_eq!(block_a, block_b);
    }
}
