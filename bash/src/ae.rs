//! `bash-ae`: authenticated encryption layered on the same duplex
//! construction as [`crate::prg`], but with its own packed control byte
//! carrying four fields — current-block-full?, intermediate?,
//! current-type, next-type (§4.3) — committed once the next operation
//! is known.

use crate::perm::{self, WORDS};
use crate::prg::Level;
use subtle::ConstantTimeEq;

const STATE_BYTES: usize = WORDS * 8;

const TYPE_KEY: u8 = 0x01;
const TYPE_DATA: u8 = 0x02;
const TYPE_TEXT: u8 = 0x03;
const TYPE_OUT: u8 = 0x04;

struct Pending {
    current_type: u8,
    block_full: bool,
    intermediate: bool,
}

fn pack(current_type: u8, next_type: u8, block_full: bool, intermediate: bool) -> u8 {
    let mut b = 0u8;
    if block_full {
        b |= 0x80;
    }
    if intermediate {
        b |= 0x40;
    }
    b |= (current_type & 0x07) << 3;
    b |= next_type & 0x07;
    b
}

/// A `bash-ae` authenticated-encryption context.
pub struct BashAe {
    state: [u64; WORDS],
    rate: usize,
    pos: usize,
    pending: Option<Pending>,
}

impl BashAe {
    /// Start a context at `level`, absorbing `key` then `iv`.
    pub fn start(level: Level, key: &[u8], iv: &[u8]) -> Self {
        let mut ctx = Self {
            state: [0u64; WORDS],
            rate: level.rate(),
            pos: 0,
            pending: None,
        };
        ctx.absorb(TYPE_KEY, key);
        ctx.absorb(TYPE_KEY, iv);
        ctx
    }

    fn state_bytes(&self) -> [u8; STATE_BYTES] {
        let mut out = [0u8; STATE_BYTES];
        for (word, chunk) in self.state.iter().zip(out.chunks_exact_mut(8)) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    fn set_state_bytes(&mut self, bytes: &[u8; STATE_BYTES]) {
        for (word, chunk) in self.state.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut b = [0u8; 8];
            b.copy_from_slice(chunk);
            *word = u64::from_le_bytes(b);
        }
    }

    /// Finalize the previous operation's deferred commit now that the
    /// next operation's type is known.
    fn commit_pending(&mut self, next_type: u8) {
        if let Some(p) = self.pending.take() {
            let control = pack(p.current_type, next_type, p.block_full, p.intermediate);
            let mut bytes = self.state_bytes();
            bytes[self.rate - 1] ^= control;
            self.set_state_bytes(&bytes);
            perm::bash_f(&mut self.state);
            self.pos = 0;
        }
    }

    /// An internal block-boundary commit, permuted immediately rather
    /// than deferred, since the continuing operation's type is already
    /// known (it is the same type).
    fn commit_intermediate(&mut self, type_code: u8) {
        let control = pack(type_code, type_code, true, true);
        let mut bytes = self.state_bytes();
        bytes[self.rate - 1] ^= control;
        self.set_state_bytes(&bytes);
        perm::bash_f(&mut self.state);
        self.pos = 0;
    }

    fn absorb(&mut self, type_code: u8, mut data: &[u8]) {
        self.commit_pending(type_code);
        let mut bytes = self.state_bytes();
        let mut filled_exactly = data.is_empty();
        while !data.is_empty() {
            let take = (self.rate - self.pos).min(data.len());
            for i in 0..take {
                bytes[self.pos + i] ^= data[i];
            }
            self.pos += take;
            data = &data[take..];
            self.set_state_bytes(&bytes);
            filled_exactly = self.pos == self.rate;
            if filled_exactly && !data.is_empty() {
                self.commit_intermediate(type_code);
                bytes = self.state_bytes();
            }
        }
        self.pending = Some(Pending {
            current_type: type_code,
            block_full: filled_exactly,
            intermediate: false,
        });
    }

    /// Absorb associated/plaintext data.
    pub fn absorb_data(&mut self, data: &[u8]) {
        self.absorb(TYPE_DATA, data);
    }

    fn duplex(&mut self, buf: &mut [u8], encrypting: bool) {
        self.commit_pending(TYPE_TEXT);
        let mut bytes = self.state_bytes();
        let mut i = 0;
        let mut filled_exactly = buf.is_empty();
        while i < buf.len() {
            let take = (self.rate - self.pos).min(buf.len() - i);
            for j in 0..take {
                let keystream = bytes[self.pos + j];
                let ciphertext = if encrypting {
                    buf[i + j] ^ keystream
                } else {
                    buf[i + j]
                };
                bytes[self.pos + j] = ciphertext;
                buf[i + j] = if encrypting { ciphertext } else { ciphertext ^ keystream };
            }
            self.pos += take;
            i += take;
            self.set_state_bytes(&bytes);
            filled_exactly = self.pos == self.rate;
            if filled_exactly && i < buf.len() {
                self.commit_intermediate(TYPE_TEXT);
                bytes = self.state_bytes();
            }
        }
        self.pending = Some(Pending {
            current_type: TYPE_TEXT,
            block_full: filled_exactly,
            intermediate: false,
        });
    }

    /// Encrypt `buf` in place.
    pub fn encr(&mut self, buf: &mut [u8]) {
        self.duplex(buf, true);
    }

    /// Decrypt `buf` in place.
    pub fn decr(&mut self, buf: &mut [u8]) {
        self.duplex(buf, false);
    }

    /// Squeeze `out.len()` octets (PRN or MAC material).
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.commit_pending(TYPE_OUT);
        let mut bytes = self.state_bytes();
        let mut produced = 0;
        let mut filled_exactly = out.is_empty();
        while produced < out.len() {
            let take = (self.rate - self.pos).min(out.len() - produced);
            out[produced..produced + take].copy_from_slice(&bytes[self.pos..self.pos + take]);
            self.pos += take;
            produced += take;
            filled_exactly = self.pos == self.rate;
            if filled_exactly && produced < out.len() {
                self.commit_intermediate(TYPE_OUT);
                bytes = self.state_bytes();
            }
        }
        self.pending = Some(Pending {
            current_type: TYPE_OUT,
            block_full: filled_exactly,
            intermediate: false,
        });
    }

    /// Encrypt `buf` in place and squeeze a `tag_len`-octet authentication tag.
    pub fn seal(mut self, aad: &[u8], buf: &mut [u8], tag_len: usize) -> alloc_free::Tag {
        self.absorb_data(aad);
        self.encr(buf);
        let mut tag = alloc_free::Tag::default();
        self.squeeze(&mut tag.bytes[..tag_len]);
        tag.len = tag_len;
        tag
    }

    /// Decrypt `buf` in place and verify it against `tag`, constant-time.
    pub fn open(mut self, aad: &[u8], buf: &mut [u8], tag: &[u8]) -> Result<(), crate::Error> {
        self.absorb_data(aad);
        self.decr(buf);
        let mut computed = [0u8; 64];
        self.squeeze(&mut computed[..tag.len()]);
        if bool::from(computed[..tag.len()].ct_eq(tag)) {
            Ok(())
        } else {
            buf.fill(0);
            Err(crate::Error::BadMac)
        }
    }
}

#[cfg(feature = "zeroize")]
impl Drop for BashAe {
    fn drop(&mut self) {
        zeroize::Zeroize::zeroize(&mut self.state[..]);
    }
}

/// A fixed-capacity tag buffer, since this crate is `no_std` without `alloc`.
pub mod alloc_free {
    /// Up to 64 octets of authentication tag.
    #[derive(Clone, Copy)]
    pub struct Tag {
        pub(crate) bytes: [u8; 64],
        pub(crate) len: usize,
    }

    impl Default for Tag {
        fn default() -> Self {
            Self {
                bytes: [0u8; 64],
                len: 0,
            }
        }
    }

    impl Tag {
        /// The tag's octets.
        pub fn as_bytes(&self) -> &[u8] {
            &self.bytes[..self.len]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_open_round_trip() {
        let key = [0x11u8; 32];
        let iv = [0x22u8; 16];
        let mut buf = *b"bash authenticated encryption!!";
        let plaintext = buf;

        let sealer = BashAe::start(Level::L256, &key, &iv);
        let tag = sealer.seal(b"aad", &mut buf, 16);
        assert_ne!(&buf[..], &plaintext[..]);

        let opener = BashAe::start(Level::L256, &key, &iv);
        opener.open(b"aad", &mut buf, tag.as_bytes()).unwrap();
        assert_eq!(buf, plaintext);
    }

    #[test]
    fn tampered_tag_is_rejected_and_zeroes_buffer() {
        let key = [0x33u8; 32];
        let iv = [0x44u8; 16];
        let mut buf = *b"0123456789012345";

        let sealer = BashAe::start(Level::L192, &key, &iv);
        let mut tag = sealer.seal(b"aad", &mut buf, 12);
        tag.bytes[0] ^= 1;

        let opener = BashAe::start(Level::L192, &key, &iv);
        let err = opener.open(b"aad", &mut buf, tag.as_bytes()).unwrap_err();
        assert_eq!(err, crate::Error::BadMac);
        assert!(buf.iter().all(|&b| b == 0));
    }
}
