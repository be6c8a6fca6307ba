#![no_std]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

#[cfg(feature = "std")]
extern crate std;

mod error;

pub use error::Error;

use belt_block::BeltBlock;
use belt_block::cipher::{Array, BlockCipherEncrypt, KeyInit};

const BLOCK: usize = 16;

/// The Brng deterministic generator (§4.6): repeated Belt-encryption of
/// an incrementing counter XOR'd with feedback from the previous block.
#[cfg_attr(feature = "zeroize", derive(zeroize::ZeroizeOnDrop))]
pub struct Brng {
    #[cfg_attr(feature = "zeroize", zeroize(skip))]
    cipher: BeltBlock,
    counter: [u8; BLOCK],
    feedback: [u8; BLOCK],
    keystream: [u8; BLOCK],
    position: usize,
}

impl Brng {
    /// Seeds a new generator from a 32-octet key and a 32-octet state
    /// IV (the first 16 octets become the initial counter, the last 16
    /// the initial feedback).
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self, Error> {
        if key.len() != 32 || iv.len() != 32 {
            return Err(Error::BadSeed);
        }
        let cipher = BeltBlock::new_from_variable_key(key).map_err(|_| Error::BadSeed)?;
        let mut counter = [0u8; BLOCK];
        let mut feedback = [0u8; BLOCK];
        counter.copy_from_slice(&iv[..BLOCK]);
        feedback.copy_from_slice(&iv[BLOCK..]);
        Ok(Self {
            cipher,
            counter,
            feedback,
            keystream: [0u8; BLOCK],
            // Forces a refill before the first output byte is produced.
            position: BLOCK,
        })
    }

    /// Reseeds this generator in place, as required after ceremonies
    /// such as Bels share generation (§4.6).
    pub fn rekey(&mut self, key: &[u8], iv: &[u8]) -> Result<(), Error> {
        *self = Self::new(key, iv)?;
        Ok(())
    }

    fn refill(&mut self) {
        let mut block = self.counter;
        xor_in_place(&mut block, &self.feedback);
        let mut arr = Array::from(block);
        self.cipher.encrypt_block(&mut arr);
        self.keystream = arr.into();
        self.feedback = self.keystream;
        increment_counter(&mut self.counter);
        self.position = 0;
    }

    /// Fills `buf` with the next `buf.len()` generated octets.
    pub fn fill(&mut self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            if self.position == BLOCK {
                self.refill();
            }
            *byte = self.keystream[self.position];
            self.position += 1;
        }
    }

    /// Self-test (§6's RNG contract): the all-zero counter-and-feedback
    /// state can only be reached by a construction bug, never by
    /// honest operation, since the counter increments every block and
    /// the feedback is overwritten with fresh ciphertext every block.
    pub fn health(&self) -> Result<(), Error> {
        if self.counter == [0u8; BLOCK] && self.feedback == [0u8; BLOCK] {
            Err(Error::Unhealthy)
        } else {
            Ok(())
        }
    }
}

fn xor_in_place(dst: &mut [u8; BLOCK], src: &[u8; BLOCK]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= s;
    }
}

/// Increment a 128-bit little-endian-as-integer counter in place.
fn increment_counter(counter: &mut [u8; BLOCK]) {
    for byte in counter.iter_mut() {
        let (res, overflow) = byte.overflowing_add(1);
        *byte = res;
        if !overflow {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_is_deterministic_for_a_fixed_seed() {
        let key = [0x11u8; 32];
        let iv = [0x22u8; 32];

        let mut a = Brng::new(&key, &iv).unwrap();
        let mut b = Brng::new(&key, &iv).unwrap();

        let mut out_a = [0u8; 50];
        let mut out_b = [0u8; 50];
        a.fill(&mut out_a);
        b.fill(&mut out_b);
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn fill_is_chunk_boundary_transparent() {
        let key = [0x33u8; 32];
        let iv = [0x44u8; 32];

        let mut ctx = Brng::new(&key, &iv).unwrap();
        let mut expected = [0u8; 50];
        ctx.fill(&mut expected);

        let mut ctx2 = Brng::new(&key, &iv).unwrap();
        let mut chunked = [0u8; 50];
        for chunk in chunked.chunks_mut(7) {
            ctx2.fill(chunk);
        }
        assert_eq!(chunked, expected);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Brng::new(&[0x55u8; 32], &[0x66u8; 32]).unwrap();
        let mut b = Brng::new(&[0x55u8; 32], &[0x77u8; 32]).unwrap();

        let mut out_a = [0u8; 16];
        let mut out_b = [0u8; 16];
        a.fill(&mut out_a);
        b.fill(&mut out_b);
        assert_ne!(out_a, out_b);
    }

    #[test]
    fn rejects_wrong_length_seeds() {
        assert_eq!(Brng::new(&[0u8; 31], &[0u8; 32]).unwrap_err(), Error::BadSeed);
        assert_eq!(Brng::new(&[0u8; 32], &[0u8; 31]).unwrap_err(), Error::BadSeed);
    }

    #[test]
    fn rekey_changes_the_output_stream() {
        let mut ctx = Brng::new(&[0x01u8; 32], &[0x02u8; 32]).unwrap();
        let mut first = [0u8; 16];
        ctx.fill(&mut first);

        ctx.rekey(&[0x03u8; 32], &[0x04u8; 32]).unwrap();
        let mut second = [0u8; 16];
        ctx.fill(&mut second);
        assert_ne!(first, second);
    }

    #[test]
    fn health_passes_for_a_freshly_seeded_generator() {
        let ctx = Brng::new(&[0x01u8; 32], &[0x02u8; 32]).unwrap();
        assert_eq!(ctx.health(), Ok(()));
    }
}
