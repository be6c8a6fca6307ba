//! `belt-hmac`: HMAC built over [`BeltHash`] (§4.2 "HMAC").

use crate::BeltHash;
use digest::Digest;
use subtle::ConstantTimeEq;

const BLOCK_SIZE: usize = 32;
const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5C;

/// HMAC-HBelt: the standard HMAC construction instantiated with
/// `belt-hash`.
#[derive(Clone)]
pub struct BeltHmac {
    inner: BeltHash,
    outer_key: [u8; BLOCK_SIZE],
}

impl BeltHmac {
    /// Start a new MAC under `key` (of any length; long keys are
    /// pre-hashed, short keys are zero-padded, per RFC 2104).
    pub fn new(key: &[u8]) -> Self {
        let mut block_key = [0u8; BLOCK_SIZE];
        if key.len() > BLOCK_SIZE {
            let digest = BeltHash::digest(key);
            block_key[..digest.len()].copy_from_slice(&digest);
        } else {
            block_key[..key.len()].copy_from_slice(key);
        }

        let mut inner_key = [0u8; BLOCK_SIZE];
        let mut outer_key = [0u8; BLOCK_SIZE];
        for i in 0..BLOCK_SIZE {
            inner_key[i] = block_key[i] ^ IPAD;
            outer_key[i] = block_key[i] ^ OPAD;
        }

        let mut inner = BeltHash::default();
        inner.update(&inner_key);

        Self { inner, outer_key }
    }

    /// Feed more message octets into the running MAC.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalize and return the 32-octet tag.
    pub fn finalize(self) -> [u8; 32] {
        let inner_digest = self.inner.finalize();
        let mut outer = BeltHash::default();
        outer.update(&self.outer_key);
        outer.update(&inner_digest);
        outer.finalize().into()
    }

    /// Finalize and constant-time-compare against an expected tag.
    pub fn verify(self, expected: &[u8]) -> bool {
        let tag = self.finalize();
        bool::from(tag.ct_eq(expected))
    }
}
