//! `bash-prg`: the programmable-sponge state machine (§4.3) —
//! START/ABSORB/SQUEEZE/ENCR/DECR/RATCHET built on [`perm::bash_f`].
//!
//! Every operation's type-code commit is deferred to the *next* call
//! (Design Note, "Deferred COMMIT in bashPrg/bashAE"): the pending
//! control octet is only XORed in and permuted through once the
//! following operation is known, tracked here as `pending`.

use crate::perm::{self, WORDS};

const STATE_BYTES: usize = WORDS * 8;

/// Security level, selecting the sponge rate (§4.3: `192 - l/2` octets).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    /// 128-bit security, 128-octet rate.
    L128,
    /// 192-bit security, 96-octet rate.
    L192,
    /// 256-bit security, 64-octet rate.
    L256,
}

impl Level {
    pub(crate) const fn rate(self) -> usize {
        match self {
            Level::L128 => 128,
            Level::L192 => 96,
            Level::L256 => 64,
        }
    }
}

const TYPE_NULL: u8 = 0x00;
const TYPE_KEY: u8 = 0x01;
const TYPE_DATA: u8 = 0x02;
const TYPE_TEXT: u8 = 0x03;
const TYPE_OUT: u8 = 0x04;

/// A `bash-prg` context.
pub struct BashPrg {
    state: [u64; WORDS],
    rate: usize,
    pos: usize,
    pending: Option<u8>,
    high_phase: bool,
}

impl BashPrg {
    /// START: a fresh context at the given security level.
    pub fn start(level: Level) -> Self {
        Self {
            state: [0u64; WORDS],
            rate: level.rate(),
            pos: 0,
            pending: Some(TYPE_NULL),
            high_phase: false,
        }
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

    fn control_byte(&self, type_code: u8) -> u8 {
        if self.high_phase {
            type_code | 0x80
        } else {
            type_code & 0x7F
        }
    }

    /// Perform the deferred commit for the previous operation, if any:
    /// XOR its control octet in, permute, and flip the phase bit.
    fn commit_pending(&mut self) {
        if let Some(type_code) = self.pending.take() {
            let byte = self.control_byte(type_code);
            let mut bytes = self.state_bytes();
            bytes[self.rate - 1] ^= byte;
            self.set_state_bytes(&bytes);
            perm::bash_f(&mut self.state);
            self.pos = 0;
            self.high_phase = !self.high_phase;
        }
    }

    fn begin(&mut self, type_code: u8) {
        self.commit_pending();
        self.pending = Some(type_code);
    }

    fn absorb_typed(&mut self, type_code: u8, mut data: &[u8]) {
        self.begin(type_code);
        let mut bytes = self.state_bytes();
        while !data.is_empty() {
            let take = (self.rate - self.pos).min(data.len());
            for i in 0..take {
                bytes[self.pos + i] ^= data[i];
            }
            self.pos += take;
            data = &data[take..];
            self.set_state_bytes(&bytes);
            if self.pos == self.rate && !data.is_empty() {
                self.commit_pending();
                self.pending = Some(type_code);
                bytes = self.state_bytes();
            }
        }
    }

    /// ABSORB a key octet string.
    pub fn absorb_key(&mut self, data: &[u8]) {
        self.absorb_typed(TYPE_KEY, data);
    }

    /// ABSORB associated/plaintext data.
    pub fn absorb_data(&mut self, data: &[u8]) {
        self.absorb_typed(TYPE_DATA, data);
    }

    /// SQUEEZE `out.len()` octets of keystream/MAC/PRN output.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.begin(TYPE_OUT);
        let mut bytes = self.state_bytes();
        let mut produced = 0;
        while produced < out.len() {
            let take = (self.rate - self.pos).min(out.len() - produced);
            out[produced..produced + take].copy_from_slice(&bytes[self.pos..self.pos + take]);
            self.pos += take;
            produced += take;
            if self.pos == self.rate && produced < out.len() {
                self.commit_pending();
                self.pending = Some(TYPE_OUT);
                bytes = self.state_bytes();
            }
        }
    }

    /// ENCR: duplex-encrypt `buf` in place, absorbing the resulting
    /// ciphertext back into the rate.
    pub fn encr(&mut self, buf: &mut [u8]) {
        self.begin(TYPE_TEXT);
        self.duplex(buf, true);
    }

    /// DECR: the inverse of [`Self::encr`].
    pub fn decr(&mut self, buf: &mut [u8]) {
        self.begin(TYPE_TEXT);
        self.duplex(buf, false);
    }

    fn duplex(&mut self, buf: &mut [u8], encrypting: bool) {
        let mut bytes = self.state_bytes();
        let mut i = 0;
        while i < buf.len() {
            let take = (self.rate - self.pos).min(buf.len() - i);
            for j in 0..take {
                let keystream = bytes[self.pos + j];
                let ciphertext = if encrypting {
                    buf[i + j] ^ keystream
                } else {
                    buf[i + j]
                };
                bytes[self.pos + j] = ciphertext; // duplex: absorb the ciphertext back in
                buf[i + j] = if encrypting { ciphertext } else { ciphertext ^ keystream };
            }
            self.pos += take;
            i += take;
            self.set_state_bytes(&bytes);
            if self.pos == self.rate && i < buf.len() {
                self.commit_pending();
                self.pending = Some(TYPE_TEXT);
                bytes = self.state_bytes();
            }
        }
    }

    /// RATCHET: apply the permutation and XOR the pre-state into the
    /// post-state, a one-way boundary past which the prior state cannot
    /// be recovered even if the new state later leaks.
    pub fn ratchet(&mut self) {
        self.commit_pending();
        let pre = self.state;
        perm::bash_f(&mut self.state);
        for i in 0..WORDS {
            self.state[i] ^= pre[i];
        }
        self.pos = 0;
        self.pending = None;
    }
}

#[cfg(feature = "zeroize")]
impl Drop for BashPrg {
    fn drop(&mut self) {
        zeroize::Zeroize::zeroize(&mut self.state[..]);
    }
}
