#![no_std]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

#[cfg(feature = "std")]
extern crate std;

mod util;

mod cbc;
mod cfb;
mod che;
mod ctr;
mod dwp;
mod ecb;
mod error;
mod fmt;
mod kwp;
mod mac;
mod wide;

pub use error::Error;
pub use error::Result;

pub use ctr::Ctr;
pub use mac::Mac;

/// ECB mode with ciphertext stealing (§4.2 "ECB").
pub mod ecb_mode {
    pub use crate::ecb::{decrypt, encrypt};
}

/// CFB self-synchronizing feedback mode (§4.2 "CFB").
pub mod cfb_mode {
    pub use crate::cfb::{decrypt, encrypt};
}

/// CBC mode with ciphertext stealing (§4.2 "CBC").
pub mod cbc_mode {
    pub use crate::cbc::{decrypt, encrypt};
}

/// Belt-KWP key wrap (§4.2 "KWP").
pub mod kwp_mode {
    pub use crate::kwp::{unwrap, wrap};
}

/// DWP authenticated encryption (§4.2 "DWP").
pub mod dwp_mode {
    pub use crate::dwp::{TAG_LEN, open, seal};
}

/// CHE authenticated encryption (§4.2 "CHE").
pub mod che_mode {
    pub use crate::che::{TAG_LEN, open, seal};
}

/// WBL/BDE/SDE wide-block modes (§4.2 "WBL", "BDE", "SDE").
pub mod wide_mode {
    pub use crate::wide::{
        bde_decrypt, bde_encrypt, decrypt, encrypt, sde_decrypt, sde_encrypt,
    };
}

/// FMT format-preserving encryption (§4.2 "FMT").
pub mod fmt_mode {
    pub use crate::fmt::{
        MIN_ROUNDS, decrypt, decrypt_with_rounds, encrypt, encrypt_with_rounds,
    };
}

pub use mac::{mac as compute_mac, verify as verify_mac};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_reexports_are_wired_up() {
        let key = [0x01u8; 32];
        let mut buf = [0u8; 16];
        ecb_mode::encrypt(&key, &mut buf).unwrap();
        ecb_mode::decrypt(&key, &mut buf).unwrap();
        assert_eq!(buf, [0u8; 16]);
    }
}
