//! CMAC-style one-key MAC, truncatable to at most 8 octets (§4.2 "MAC").

use crate::error::{Error, Result};
use crate::util::{self, BLOCK};
use subtle::ConstantTimeEq;
use zeroize::ZeroizeOnDrop;

/// Default (and maximum) MAC tag length in octets.
pub const MAX_TAG_LEN: usize = 8;

/// A streaming Belt-MAC context.
#[derive(ZeroizeOnDrop)]
pub struct Mac {
    #[zeroize(skip)]
    cipher: belt_block::BeltBlock,
    state: [u8; BLOCK],
    buffer: [u8; BLOCK],
    buffered: usize,
}

impl Mac {
    /// Start a new MAC context under `key`.
    pub fn start(key: &[u8]) -> Result<Self> {
        Ok(Self {
            cipher: util::new_cipher(key)?,
            state: [0u8; BLOCK],
            buffer: [0u8; BLOCK],
            buffered: 0,
        })
    }

    /// Absorb more message octets.
    pub fn step(&mut self, mut data: &[u8]) {
        if self.buffered > 0 {
            let need = BLOCK - self.buffered;
            let take = need.min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered == BLOCK && !data.is_empty() {
                self.absorb_full_block();
            }
        }
        while data.len() > BLOCK {
            self.buffer.copy_from_slice(&data[..BLOCK]);
            self.absorb_full_block();
            data = &data[BLOCK..];
        }
        if !data.is_empty() {
            self.buffer[..data.len()].copy_from_slice(data);
            self.buffered = data.len();
        }
    }

    fn absorb_full_block(&mut self) {
        util::xor_in_place(&mut self.state, &self.buffer);
        util::encrypt_block(&self.cipher, &mut self.state);
        self.buffered = 0;
    }

    /// Finalize, producing a tag of `tag_len` octets (`tag_len <= 8`).
    pub fn finish(mut self, tag_len: usize) -> Result<[u8; MAX_TAG_LEN]> {
        if tag_len > MAX_TAG_LEN {
            return Err(Error::BadParams);
        }
        let mut last = [0u8; BLOCK];
        last[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        if self.buffered < BLOCK {
            last[self.buffered] = 0x80; // unambiguous padding for the final partial block
        }
        util::xor_in_place(&mut self.state, &last);
        util::encrypt_block(&self.cipher, &mut self.state);

        let mut tag = [0u8; MAX_TAG_LEN];
        tag.copy_from_slice(&self.state[..MAX_TAG_LEN]);
        Ok(tag)
    }
}

/// One-shot MAC convenience wrapper.
pub fn mac(key: &[u8], data: &[u8], tag_len: usize) -> Result<[u8; MAX_TAG_LEN]> {
    let mut ctx = Mac::start(key)?;
    ctx.step(data);
    ctx.finish(tag_len)
}

/// Constant-time verification of a MAC tag.
pub fn verify(key: &[u8], data: &[u8], expected: &[u8]) -> Result<()> {
    let tag = mac(key, data, expected.len())?;
    if bool::from(tag[..expected.len()].ct_eq(expected)) {
        Ok(())
    } else {
        Err(Error::BadMac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_and_chunk_transparent() {
        let key = [0x77u8; 32];
        let msg = b"authenticate this message please";
        let whole = mac(&key, msg, 8).unwrap();

        let mut ctx = Mac::start(&key).unwrap();
        for chunk in msg.chunks(5) {
            ctx.step(chunk);
        }
        let chunked = ctx.finish(8).unwrap();
        assert_eq!(whole, chunked);
    }

    #[test]
    fn verify_detects_tamper() {
        let key = [0x77u8; 32];
        let msg = b"message";
        let tag = mac(&key, msg, 8).unwrap();
        assert!(verify(&key, msg, &tag).is_ok());
        let mut bad = tag;
        bad[0] ^= 1;
        assert_eq!(verify(&key, msg, &bad), Err(Error::BadMac));
    }
}
