use crate::constants::*;
use crate::MasterKey;

/// Expand the FLASH_CRYPT_CONF bitmask into the list of key bit positions
/// that take part in tweaking. Each of the four mask bits enables one
/// quarter of the 256-bit key space.
///
/// The flips driven by the result are independent XORs, so the order of the
/// returned positions does not affect the derived key.
pub fn tweak_range(flash_crypt_conf: u8) -> Vec<usize> {
    let mut range = Vec::new();
    for (i, bounds) in TWEAK_RANGE_BOUNDS.windows(2).enumerate() {
        if flash_crypt_conf & (1 << i) != 0 {
            range.extend(bounds[0]..bounds[1]);
        }
    }
    range
}

/// Derive the key for the block at `offset`: for every key bit in `range`,
/// flip it iff the offset bit named by the pattern table is set.
///
/// Key bits count from the most significant bit of byte 0, offset bits from
/// the least significant end. Only offset bits 5..24 are ever consulted, so
/// all offsets inside one 32-byte region derive the same key.
pub fn tweak_key(key: &MasterKey, offset: u64, range: &[usize]) -> MasterKey {
    let mut tweaked = *key;

    let mut offset_bits = [false; OFFSET_BITS];
    for (i, flag) in offset_bits.iter_mut().enumerate() {
        *flag = offset & (1 << i) != 0;
    }

    for &bit in range {
        if offset_bits[TWEAK_PATTERN[bit]] {
            tweaked[bit / 8] ^= 1 << (7 - bit % 8);
        }
    }

    tweaked
}
