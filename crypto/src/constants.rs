/// Cipher block size of the flash encryption scheme.
pub const BLOCK_SIZE: usize = 16;

/// Length of a loaded master key.
pub const KEY_SIZE: usize = 32;

/// Raw length of the smaller hardware key variant before extension.
pub const KEY_SIZE_192: usize = 24;

/// The tweaked key changes once per this many bytes of flash.
pub const TWEAK_REGION: u64 = 32;

/// Number of low offset bits that participate in tweaking.
pub const OFFSET_BITS: usize = 24;

/// Quarter bounds of the 256-bit key space. Bit i of FLASH_CRYPT_CONF
/// enables the key bits in [TWEAK_RANGE_BOUNDS[i], TWEAK_RANGE_BOUNDS[i+1]).
pub const TWEAK_RANGE_BOUNDS: [usize; 5] = [0, 67, 132, 195, 256];

/// For each key bit, the offset bit that gates whether it is flipped.
/// Reverse engineered from the SoC's flash encryption hardware; the values
/// must match it bit for bit.
pub const TWEAK_PATTERN: [usize; 256] = [
    23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5,
    23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5,
    23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5,
    14, 13, 12, 11, 10, 9, 8, 7, 6, 5,
    23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5,
    23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5,
    23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5,
    12, 11, 10, 9, 8, 7, 6, 5,
    23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5,
    23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5,
    23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5,
    10, 9, 8, 7, 6, 5,
    23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5,
    23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5,
    23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5,
    8, 7, 6, 5,
];
