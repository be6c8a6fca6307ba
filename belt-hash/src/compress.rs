//! The `belt-hash` compression function: a Davies-Meyer construction over
//! [`belt_block::BeltBlock`], mixing a running hash half with a running
//! sum half per 32-octet message block (§4.2 "HASH").

use belt_block::BeltBlock;
use belt_block::cipher::{Array, BlockCipherEncrypt, KeyInit};

/// 32-octet running hash value.
pub(crate) type Half = [u8; 16];

fn xor_into(dst: &mut Half, a: &Half, b: &Half) {
    for i in 0..16 {
        dst[i] = a[i] ^ b[i];
    }
}

/// Absorb one 32-octet message block into the 32-octet hash state.
pub(crate) fn compress(h: &mut [u8; 32], block: &[u8; 32]) {
    let (h1, h2): (Half, Half) = (h[..16].try_into().unwrap(), h[16..].try_into().unwrap());
    let (x1, x2): (Half, Half) = (
        block[..16].try_into().unwrap(),
        block[16..].try_into().unwrap(),
    );

    let key: [u8; 32] = *h;
    let cipher = BeltBlock::new_from_slice(&key).expect("32-octet key");

    let mut c1 = Array::from(x1);
    cipher.encrypt_block(&mut c1);
    let mut c2 = Array::from(x2);
    cipher.encrypt_block(&mut c2);

    let mut h1p = [0u8; 16];
    xor_into(&mut h1p, &c1.into(), &x1);
    let mut tmp = [0u8; 16];
    xor_into(&mut tmp, &h1p, &h2);
    h1p = tmp;

    let mut h2p = [0u8; 16];
    xor_into(&mut h2p, &c2.into(), &x2);
    let mut tmp2 = [0u8; 16];
    xor_into(&mut tmp2, &h2p, &h1);
    h2p = tmp2;

    h[..16].copy_from_slice(&h1p);
    h[16..].copy_from_slice(&h2p);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_is_deterministic_and_changes_state() {
        let mut h = [0u8; 32];
        let block = [7u8; 32];
        let before = h;
        compress(&mut h, &block);
        assert_ne!(h, before);
        let mut h2 = [0u8; 32];
        compress(&mut h2, &block);
        assert_eq!(h, h2);
    }
}
