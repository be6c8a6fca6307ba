//! Shared helpers: raw single-block encrypt/decrypt via [`belt_block`]
//! and buffer XOR.

use belt_block::BeltBlock;
use belt_block::cipher::{Array, BlockCipherDecrypt, BlockCipherEncrypt, KeyInit};

pub(crate) const BLOCK: usize = 16;

pub(crate) fn new_cipher(key: &[u8]) -> Result<BeltBlock, crate::Error> {
    BeltBlock::new_from_variable_key(key).map_err(|_| crate::Error::BadKey)
}

pub(crate) fn encrypt_block(cipher: &BeltBlock, block: &mut [u8; BLOCK]) {
    let mut arr = Array::from(*block);
    cipher.encrypt_block(&mut arr);
    *block = arr.into();
}

pub(crate) fn decrypt_block(cipher: &BeltBlock, block: &mut [u8; BLOCK]) {
    let mut arr = Array::from(*block);
    cipher.decrypt_block(&mut arr);
    *block = arr.into();
}

pub(crate) fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= s;
    }
}

/// Increment a 128-bit big-endian-as-bytes-but-little-endian-as-integer
/// counter in place, matching §4.2 CTR's "incremented mod 2^128".
pub(crate) fn increment_counter(counter: &mut [u8; BLOCK]) {
    for byte in counter.iter_mut() {
        let (res, overflow) = byte.overflowing_add(1);
        *byte = res;
        if !overflow {
            break;
        }
    }
}
