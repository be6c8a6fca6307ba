#![no_std]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

mod compress;
mod hmac;
mod keyrep;
mod pbkdf2;

pub use digest::{self, Digest};
pub use hmac::BeltHmac;
pub use keyrep::belt_keyrep;
pub use pbkdf2::belt_pbkdf2;

use belt_block::cipher::BlockSizeUser;
use digest::array::Array;
use digest::const_oid::AssociatedOid;
use digest::consts::U32;
use digest::{FixedOutput, HashMarker, OutputSizeUser, Reset, Update};

/// `belt-hash`: the STB 34.101.31 Merkle-Damgard hash over 32-octet
/// blocks, producing a 32-octet digest.
#[derive(Clone)]
pub struct BeltHash {
    state: [u8; 32],
    buffer: [u8; 32],
    buffered: usize,
    total_len: u64,
}

impl Default for BeltHash {
    fn default() -> Self {
        Self {
            state: [0u8; 32],
            buffer: [0u8; 32],
            buffered: 0,
            total_len: 0,
        }
    }
}

impl BeltHash {
    fn process_buffered_block(&mut self) {
        compress::compress(&mut self.state, &self.buffer);
        self.buffered = 0;
    }
}

impl HashMarker for BeltHash {}

impl OutputSizeUser for BeltHash {
    type OutputSize = U32;
}

impl BlockSizeUser for BeltHash {
    type BlockSize = U32;
}

impl Update for BeltHash {
    fn update(&mut self, mut data: &[u8]) {
        self.total_len = self.total_len.wrapping_add(data.len() as u64);

        if self.buffered > 0 {
            let need = 32 - self.buffered;
            let take = need.min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered == 32 {
                self.process_buffered_block();
            }
        }

        while data.len() >= 32 {
            let block: [u8; 32] = data[..32].try_into().expect("32 byte chunk");
            compress::compress(&mut self.state, &block);
            data = &data[32..];
        }

        if !data.is_empty() {
            self.buffer[..data.len()].copy_from_slice(data);
            self.buffered = data.len();
        }
    }
}

impl Reset for BeltHash {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl FixedOutput for BeltHash {
    fn finalize_into(mut self, out: &mut Array<u8, U32>) {
        // Pad with 0x80 then zeros, then the little-endian bit length,
        // classic Merkle-Damgard strengthening.
        let bit_len = self.total_len.wrapping_mul(8);
        let mut pad = [0u8; 64];
        pad[0] = 0x80;
        let remaining = 32 - self.buffered;
        let pad_len = if remaining >= 9 {
            remaining
        } else {
            remaining + 32
        };
        pad[pad_len - 8..pad_len].copy_from_slice(&bit_len.to_le_bytes());

        Update::update(&mut self, &pad[..pad_len]);
        debug_assert_eq!(self.buffered, 0);

        out.copy_from_slice(&self.state);
    }
}

impl AssociatedOid for BeltHash {
    const OID: digest::const_oid::ObjectIdentifier =
        digest::const_oid::ObjectIdentifier::new_unwrap("1.2.112.0.2.0.34.101.31.81");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_nonempty_inputs_hash_without_panicking() {
        let d1 = BeltHash::digest(b"");
        let d2 = BeltHash::digest(b"belt-hash test vector");
        assert_ne!(d1.as_slice(), d2.as_slice());
        assert_eq!(d1.len(), 32);
    }

    #[test]
    fn streaming_matches_one_shot() {
        let msg = b"the quick brown fox jumps over the lazy dog, twice over";
        let one_shot = BeltHash::digest(msg);

        let mut h = BeltHash::default();
        h.update(&msg[..10]);
        h.update(&msg[10..]);
        let streamed = h.finalize();

        assert_eq!(one_shot, streamed);
    }

    #[test]
    fn chunk_boundaries_are_transparent() {
        let msg = [0xABu8; 130];
        let whole = BeltHash::digest(msg);

        let mut h = BeltHash::default();
        for chunk in msg.chunks(7) {
            h.update(chunk);
        }
        assert_eq!(whole, h.finalize());
    }
}
