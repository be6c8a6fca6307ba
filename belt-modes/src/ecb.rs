//! ECB with ciphertext stealing for non-block-aligned tails (§4.2 "ECB").

use crate::error::{Error, Result};
use crate::util::{self, BLOCK};
use belt_block::BeltBlock;

/// Encrypt `buf` in place under ECB, applying ciphertext stealing to the
/// final two blocks when `buf.len()` is not a multiple of 16.
pub fn encrypt(key: &[u8], buf: &mut [u8]) -> Result<()> {
    if buf.len() < BLOCK {
        return Err(Error::BadInput);
    }
    let cipher = util::new_cipher(key)?;

    let tail = buf.len() % BLOCK;
    let aligned = buf.len() - tail - if tail == 0 { 0 } else { BLOCK };

    let mut offset = 0;
    while offset < aligned {
        encrypt_block_at(&cipher, buf, offset);
        offset += BLOCK;
    }

    if tail != 0 {
        steal_encrypt(&cipher, &mut buf[aligned..]);
    } else if offset < buf.len() {
        encrypt_block_at(&cipher, buf, offset);
    }

    Ok(())
}

/// Decrypt `buf` in place under ECB with ciphertext stealing.
pub fn decrypt(key: &[u8], buf: &mut [u8]) -> Result<()> {
    if buf.len() < BLOCK {
        return Err(Error::BadInput);
    }
    let cipher = util::new_cipher(key)?;

    let tail = buf.len() % BLOCK;
    let aligned = buf.len() - tail - if tail == 0 { 0 } else { BLOCK };

    let mut offset = 0;
    while offset < aligned {
        decrypt_block_at(&cipher, buf, offset);
        offset += BLOCK;
    }

    if tail != 0 {
        steal_decrypt(&cipher, &mut buf[aligned..]);
    } else if offset < buf.len() {
        decrypt_block_at(&cipher, buf, offset);
    }

    Ok(())
}

fn encrypt_block_at(cipher: &BeltBlock, buf: &mut [u8], offset: usize) {
    let mut block: [u8; BLOCK] = buf[offset..offset + BLOCK].try_into().unwrap();
    util::encrypt_block(cipher, &mut block);
    buf[offset..offset + BLOCK].copy_from_slice(&block);
}

fn decrypt_block_at(cipher: &BeltBlock, buf: &mut [u8], offset: usize) {
    let mut block: [u8; BLOCK] = buf[offset..offset + BLOCK].try_into().unwrap();
    util::decrypt_block(cipher, &mut block);
    buf[offset..offset + BLOCK].copy_from_slice(&block);
}

/// `tail` holds the final (full block `P_prev` + partial block
/// `P_last`) pair, in that order. On return `tail[..16]` holds the new
/// full ciphertext block and `tail[16..]` holds the stolen short block,
/// per §4.2's ciphertext-stealing rule.
fn steal_encrypt(cipher: &BeltBlock, tail: &mut [u8]) {
    let partial_len = tail.len() - BLOCK;

    let mut e1: [u8; BLOCK] = tail[..BLOCK].try_into().unwrap();
    util::encrypt_block(cipher, &mut e1);
    let stolen = e1;

    let mut d = [0u8; BLOCK];
    d[..partial_len].copy_from_slice(&tail[BLOCK..]);
    d[partial_len..].copy_from_slice(&stolen[partial_len..]);
    util::encrypt_block(cipher, &mut d);

    tail[..BLOCK].copy_from_slice(&d);
    tail[BLOCK..].copy_from_slice(&stolen[..partial_len]);
}

/// Inverse of [`steal_encrypt`]: `tail[..16]` holds the full ciphertext
/// block, `tail[16..]` holds the stolen short ciphertext.
fn steal_decrypt(cipher: &BeltBlock, tail: &mut [u8]) {
    let partial_len = tail.len() - BLOCK;

    let mut d: [u8; BLOCK] = tail[..BLOCK].try_into().unwrap();
    util::decrypt_block(cipher, &mut d);
    let mut p_last = [0u8; BLOCK];
    p_last[..partial_len].copy_from_slice(&d[..partial_len]);

    let mut e1 = [0u8; BLOCK];
    e1[..partial_len].copy_from_slice(&tail[BLOCK..]);
    e1[partial_len..].copy_from_slice(&d[partial_len..]);
    util::decrypt_block(cipher, &mut e1);

    tail[..BLOCK].copy_from_slice(&e1);
    tail[BLOCK..].copy_from_slice(&p_last[..partial_len]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_block_aligned() {
        let key = [0x11u8; 32];
        let mut buf = [0u8; 48];
        for (i, b) in buf.iter_mut().enumerate() {
            *b = i as u8;
        }
        let original = buf;
        encrypt(&key, &mut buf).unwrap();
        assert_ne!(buf, original);
        decrypt(&key, &mut buf).unwrap();
        assert_eq!(buf, original);
    }

    #[test]
    fn round_trips_with_ciphertext_stealing() {
        let key = [0x22u8; 32];
        let mut buf = [0u8; 40]; // 2 full blocks + 8-octet tail
        for (i, b) in buf.iter_mut().enumerate() {
            *b = (i * 3) as u8;
        }
        let original = buf;
        encrypt(&key, &mut buf).unwrap();
        decrypt(&key, &mut buf).unwrap();
        assert_eq!(buf, original);
    }

    #[test]
    fn rejects_too_short_input() {
        let key = [0x11u8; 32];
        let mut buf = [0u8; 4];
        assert_eq!(encrypt(&key, &mut buf), Err(Error::BadInput));
    }
}
