//! CTR mode with a resumable streaming context (§4.2 "CTR").

use crate::error::{Error, Result};
use crate::util::{self, BLOCK};
use belt_block::BeltBlock;
use zeroize::ZeroizeOnDrop;

/// Resumable CTR keystream context: `(counter, keystream_position)`.
///
/// `step` may be called repeatedly with arbitrary chunk boundaries; the
/// output is identical to a single call over the concatenation (§4.2,
/// §5 ordering guarantee).
#[derive(ZeroizeOnDrop)]
pub struct Ctr {
    #[zeroize(skip)]
    cipher: BeltBlock,
    counter: [u8; BLOCK],
    keystream: [u8; BLOCK],
    position: usize,
}

impl Ctr {
    /// Start a new CTR context keyed by `key`, counting up from `iv`.
    pub fn start(key: &[u8], iv: &[u8; BLOCK]) -> Result<Self> {
        let cipher = util::new_cipher(key)?;
        let mut keystream = *iv;
        util::encrypt_block(&cipher, &mut keystream);
        Ok(Self {
            cipher,
            counter: *iv,
            keystream,
            position: 0,
        })
    }

    /// XOR `buf` with the next `buf.len()` keystream octets, in place.
    pub fn step(&mut self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            if self.position == BLOCK {
                util::increment_counter(&mut self.counter);
                self.keystream = self.counter;
                util::encrypt_block(&self.cipher, &mut self.keystream);
                self.position = 0;
            }
            *byte ^= self.keystream[self.position];
            self.position += 1;
        }
    }

    /// CTR has no finalization step; provided for symmetry with the
    /// other modes' `start`/`step`/`finish` contract.
    pub fn finish(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_and_is_chunk_boundary_transparent() {
        let key = [0x66u8; 32];
        let iv = [0x0Au8; BLOCK];

        let mut whole = [0u8; 50];
        for (i, b) in whole.iter_mut().enumerate() {
            *b = i as u8;
        }
        let plaintext = whole;

        let mut ctx = Ctr::start(&key, &iv).unwrap();
        ctx.step(&mut whole);

        let mut chunked = plaintext;
        let mut ctx2 = Ctr::start(&key, &iv).unwrap();
        for chunk in chunked.chunks_mut(7) {
            ctx2.step(chunk);
        }
        assert_eq!(whole, chunked);

        let mut ctx3 = Ctr::start(&key, &iv).unwrap();
        ctx3.step(&mut whole);
        assert_eq!(whole, plaintext);
    }
}
