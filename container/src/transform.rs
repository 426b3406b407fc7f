use std::io::{ErrorKind, Read, Seek};

use log::info;
use rand::Rng;

use crypto::engine::BlockEngine;
use crypto::BLOCK_SIZE;

use crate::FlashError;

/// Run the per-block cipher loop over the whole input stream and return the
/// transformed payload.
///
/// The absolute offset of each block is the flash base address plus the
/// stream position before the read; the engine uses it to key each 32-byte
/// region. The hardware applies its cipher to byte-reversed blocks in the
/// opposite direction of the requested operation, so a decrypt request runs
/// the forward primitive and an encrypt request runs the inverse one.
pub fn transform_stream<R: Read + Seek>(
    input: &mut R,
    engine: &mut BlockEngine,
    flash_address: u32,
    do_decrypt: bool,
) -> Result<Vec<u8>, FlashError> {
    let mut payload = Vec::new();

    loop {
        let pos = input.stream_position()?;
        let block_offs = u64::from(flash_address) + pos;

        let mut block = [0u8; BLOCK_SIZE];
        let n = read_block(input, &mut block)?;
        if n == 0 {
            break;
        }
        if n < BLOCK_SIZE {
            if do_decrypt {
                return Err(FlashError::ShortBlockOnDecrypt);
            }
            pad_block(&mut block, n);
        }

        block.reverse();
        if do_decrypt {
            engine.forward(block_offs, &mut block);
        } else {
            engine.inverse(block_offs, &mut block);
        }
        block.reverse();

        payload.extend_from_slice(&block);
    }

    Ok(payload)
}

fn pad_block(block: &mut [u8; BLOCK_SIZE], filled: usize) {
    let mut rng = rand::thread_rng();
    for byte in block[filled..].iter_mut() {
        *byte = rng.gen();
    }
    info!(
        "Padding with {} bytes of random data (encrypted data must be multiple of 16 bytes long)",
        BLOCK_SIZE - filled
    );
}

// A single read may return less than a full block well before the end of
// the stream; keep filling until the block is complete or the stream ends.
fn read_block<R: Read>(input: &mut R, block: &mut [u8; BLOCK_SIZE]) -> Result<usize, FlashError> {
    let mut filled = 0;
    while filled < BLOCK_SIZE {
        match input.read(&mut block[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(FlashError::Io(e)),
        }
    }
    Ok(filled)
}
