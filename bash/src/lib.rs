#![no_std]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

#[cfg(feature = "std")]
extern crate std;

pub mod ae;
mod error;
pub mod hash;
pub mod perm;
pub mod prg;

pub use ae::BashAe;
pub use error::Error;
pub use hash::{BashHash128, BashHash192, BashHash256};
pub use perm::bash_f;
pub use prg::{BashPrg, Level};

pub use digest::{self, Digest};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_reexports_are_wired_up() {
        let digest = BashHash128::digest(b"bash");
        assert_eq!(digest.len(), 32);

        let mut state = [0u64; 24];
        bash_f(&mut state);
        assert_ne!(state, [0u64; 24]);
    }
}
