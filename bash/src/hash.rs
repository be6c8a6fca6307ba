//! `bash-hash`: sponge hashing over [`perm::bash_f`] at security levels
//! 128/192/256 (§4.3).

use crate::perm::{self, WORDS};
use digest::array::Array;
use digest::const_oid::AssociatedOid;
use digest::consts::{U32, U48, U64};
use digest::{FixedOutput, HashMarker, OutputSizeUser, Reset, Update};

const STATE_BYTES: usize = WORDS * 8;

/// Shared sponge core: absorbs into the rate portion of the state,
/// applying [`perm::bash_f`] whenever a rate-sized block fills.
#[derive(Clone)]
struct Sponge<const RATE: usize> {
    state: [u64; WORDS],
    buffer: [u8; STATE_BYTES],
    buffered: usize,
}

impl<const RATE: usize> Default for Sponge<RATE> {
    fn default() -> Self {
        Self {
            state: [0u64; WORDS],
            buffer: [0u8; STATE_BYTES],
            buffered: 0,
        }
    }
}

impl<const RATE: usize> Sponge<RATE> {
    fn absorb_block(&mut self) {
        let mut words = [0u8; STATE_BYTES];
        words[..RATE].copy_from_slice(&self.buffer[..RATE]);
        for (word, chunk) in self.state.iter_mut().zip(words.chunks_exact(8)) {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            *word ^= u64::from_le_bytes(bytes);
        }
        perm::bash_f(&mut self.state);
        self.buffered = 0;
    }

    fn update(&mut self, mut data: &[u8]) {
        if self.buffered > 0 {
            let need = RATE - self.buffered;
            let take = need.min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered == RATE {
                self.absorb_block();
            }
        }
        while data.len() >= RATE {
            self.buffer[..RATE].copy_from_slice(&data[..RATE]);
            self.absorb_block();
            data = &data[RATE..];
        }
        if !data.is_empty() {
            self.buffer[..data.len()].copy_from_slice(data);
            self.buffered = data.len();
        }
    }

    fn finalize(&mut self, out: &mut [u8]) {
        // §4.3 padding: 0x40 then zeros to the rate boundary.
        let mut last = [0u8; STATE_BYTES];
        last[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        last[self.buffered] = 0x40;
        self.buffer[..RATE].copy_from_slice(&last[..RATE]);
        self.buffered = RATE;
        self.absorb_block();

        let mut squeezed = 0;
        while squeezed < out.len() {
            let mut bytes = [0u8; STATE_BYTES];
            for (word, chunk) in self.state.iter().zip(bytes.chunks_exact_mut(8)) {
                chunk.copy_from_slice(&word.to_le_bytes());
            }
            let take = (out.len() - squeezed).min(RATE);
            out[squeezed..squeezed + take].copy_from_slice(&bytes[..take]);
            squeezed += take;
            if squeezed < out.len() {
                perm::bash_f(&mut self.state);
            }
        }
    }
}

macro_rules! bash_hash {
    ($name:ident, $rate:expr, $out:ty, $oid:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Default)]
        pub struct $name(Sponge<{ $rate }>);

        impl HashMarker for $name {}

        impl OutputSizeUser for $name {
            type OutputSize = $out;
        }

        impl Update for $name {
            fn update(&mut self, data: &[u8]) {
                self.0.update(data);
            }
        }

        impl Reset for $name {
            fn reset(&mut self) {
                *self = Self::default();
            }
        }

        impl FixedOutput for $name {
            fn finalize_into(mut self, out: &mut Array<u8, Self::OutputSize>) {
                self.0.finalize(out);
            }
        }

        impl AssociatedOid for $name {
            const OID: digest::const_oid::ObjectIdentifier =
                digest::const_oid::ObjectIdentifier::new_unwrap($oid);
        }
    };
}

// Rate (octets) = 192 - l/2; output = l/4 octets (§4.3).
bash_hash!(
    BashHash128,
    128,
    U32,
    "1.2.112.0.2.0.34.101.77.11",
    "bash-hash at the 128-bit security level, 32-octet digest."
);
bash_hash!(
    BashHash192,
    96,
    U48,
    "1.2.112.0.2.0.34.101.77.12",
    "bash-hash at the 192-bit security level, 48-octet digest."
);
bash_hash!(
    BashHash256,
    64,
    U64,
    "1.2.112.0.2.0.34.101.77.13",
    "bash-hash at the 256-bit security level, 64-octet digest."
);

#[cfg(test)]
mod tests {
    use super::*;
    use digest::Digest;

    #[test]
    fn empty_input_is_deterministic_per_level() {
        let a = BashHash256::digest(b"");
        let b = BashHash256::digest(b"");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn levels_produce_different_digests() {
        let a = BashHash128::digest(b"stb");
        let b = BashHash192::digest(b"stb");
        let c = BashHash256::digest(b"stb");
        assert_eq!(a.len(), 32);
        assert_eq!(b.len(), 48);
        assert_eq!(c.len(), 64);
    }

    #[test]
    fn streaming_matches_one_shot() {
        let msg = b"the quick brown fox jumps over the lazy dog";
        let one_shot = BashHash256::digest(msg);

        let mut h = BashHash256::default();
        h.update(&msg[..10]);
        h.update(&msg[10..]);
        assert_eq!(one_shot, h.finalize());
    }
}
