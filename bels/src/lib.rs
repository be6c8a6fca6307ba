#![no_std]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

#[cfg(feature = "std")]
extern crate std;

mod error;
mod gf256;
mod share;

pub use error::Error;
pub use share::{recover, split, Share};

/// A share over a 16-octet secret (Bign96/Bign128 private keys).
pub type Share16 = Share<16>;
/// A share over a 24-octet secret (Bign192 private keys).
pub type Share24 = Share<24>;
/// A share over a 32-octet secret (Bign256 private keys).
pub type Share32 = Share<32>;

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingRng(u64);

    impl rand_core::RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }
        fn next_u64(&mut self) -> u64 {
            self.0 = self.0.wrapping_add(0x9e3779b97f4a7c15);
            self.0
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            rand_core::impls::fill_bytes_via_next(self, dst);
        }
        fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dst);
            Ok(())
        }
    }

    impl rand_core::CryptoRng for CountingRng {}

    #[test]
    fn crate_level_aliases_round_trip() {
        let secret = [0x5au8; 32];
        let mut placeholder_bytes = [0u8; 33];
        placeholder_bytes[0] = 1;
        let placeholder = Share32::from_bytes(&placeholder_bytes).expect("index 1 is valid");
        let mut shares = [placeholder; 4];

        let mut rng = CountingRng(42);
        split(&secret, 2, &mut shares, &mut rng).expect("splits");
        let recovered = recover(&shares[..2]).expect("recovers");
        assert_eq!(recovered, secret);
    }
}
