//! Belt-KWP key wrap: wraps a 16/24/32-octet key (plus optional header)
//! into a blob 16 octets longer, via a six-pass generalized AES-KW
//! construction over Belt (§4.2 "KWP").

use crate::error::{Error, Result};
use crate::util::{self, BLOCK};
use subtle::ConstantTimeEq;

const PASSES: u64 = 6;
/// Fixed initial chaining value, distinguishing KWP from other
/// Belt-block-based constructions.
const ICV: [u8; 8] = [0xA6, 0xA6, 0xA6, 0xA6, 0xA6, 0xA6, 0xA6, 0xA6];

/// Wrap `payload` (the key or other secret octets being protected) under
/// `key`, binding in `header` as associated data. Output is
/// `payload.len() + 16` octets.
pub fn wrap(key: &[u8], header: &[u8], payload: &[u8], out: &mut [u8]) -> Result<()> {
    if payload.len() % 8 != 0 || payload.is_empty() {
        return Err(Error::BadInput);
    }
    if out.len() != payload.len() + BLOCK {
        return Err(Error::BadInput);
    }
    let cipher = util::new_cipher(key)?;

    let n = payload.len() / 8;
    let mut r = alloc_semiblocks(n, payload);
    let mut a = ICV;

    let mut counter: u64 = 1;
    for _pass in 0..PASSES {
        for i in 0..n {
            let mut block = [0u8; BLOCK];
            block[..8].copy_from_slice(&a);
            block[8..].copy_from_slice(&r[i]);
            bind_header(&mut block, header);
            util::encrypt_block(&cipher, &mut block);
            a.copy_from_slice(&block[..8]);
            for (b, c) in a.iter_mut().zip(counter.to_be_bytes().iter()) {
                *b ^= c;
            }
            r[i].copy_from_slice(&block[8..]);
            counter += 1;
        }
    }

    out[..8].copy_from_slice(&a);
    for (i, semi) in r.iter().enumerate() {
        out[8 + i * 8..16 + i * 8].copy_from_slice(semi);
    }
    Ok(())
}

/// Unwrap a blob produced by [`wrap`]. Returns [`Error::BadMac`] if the
/// integrity check (the recovered chaining value) does not match.
pub fn unwrap(key: &[u8], header: &[u8], blob: &[u8], out: &mut [u8]) -> Result<()> {
    if blob.len() < BLOCK || (blob.len() - BLOCK) % 8 != 0 {
        return Err(Error::BadFormat);
    }
    if out.len() != blob.len() - BLOCK {
        return Err(Error::BadInput);
    }
    let cipher = util::new_cipher(key)?;

    let n = out.len() / 8;
    let mut a: [u8; 8] = blob[..8].try_into().unwrap();
    let mut r = alloc_semiblocks(n, &blob[8..]);

    let mut counter: u64 = PASSES * n as u64;
    for _pass in 0..PASSES {
        for i in (0..n).rev() {
            for (b, c) in a.iter_mut().zip(counter.to_be_bytes().iter()) {
                *b ^= c;
            }
            let mut block = [0u8; BLOCK];
            block[..8].copy_from_slice(&a);
            block[8..].copy_from_slice(&r[i]);
            bind_header(&mut block, header);
            util::decrypt_block(&cipher, &mut block);
            a.copy_from_slice(&block[..8]);
            r[i].copy_from_slice(&block[8..]);
            counter -= 1;
        }
    }

    if !bool::from(a.ct_eq(&ICV)) {
        return Err(Error::BadMac);
    }

    for (i, semi) in r.iter().enumerate() {
        out[i * 8..i * 8 + 8].copy_from_slice(semi);
    }
    Ok(())
}

fn alloc_semiblocks(n: usize, payload: &[u8]) -> [[u8; 8]; 64] {
    let mut r = [[0u8; 8]; 64];
    assert!(n <= 64, "belt-kwp payload too large for this implementation");
    for i in 0..n {
        r[i].copy_from_slice(&payload[i * 8..i * 8 + 8]);
    }
    r
}

/// Bind the (unauthenticated-length) header into the block via XOR into
/// its low-order octets, keeping the construction tractable without a
/// variable-size state.
fn bind_header(block: &mut [u8; BLOCK], header: &[u8]) {
    for (i, h) in header.iter().enumerate() {
        block[8 + (i % 8)] ^= h;
    }
}
