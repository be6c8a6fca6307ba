//! CBC with ciphertext stealing for non-aligned tails (§4.2 "CBC").

use crate::error::{Error, Result};
use crate::util::{self, BLOCK};

/// Encrypt `buf` in place under CBC, chaining from `iv`.
pub fn encrypt(key: &[u8], iv: &[u8; BLOCK], buf: &mut [u8]) -> Result<()> {
    if buf.len() < BLOCK {
        return Err(Error::BadInput);
    }
    let cipher = util::new_cipher(key)?;

    let tail = buf.len() % BLOCK;
    let mut prev = *iv;
    let mut offset = 0;

    let last_full_start = if tail == 0 {
        buf.len().saturating_sub(BLOCK)
    } else {
        (buf.len() / BLOCK) * BLOCK - BLOCK
    };

    while offset < last_full_start {
        let mut block: [u8; BLOCK] = buf[offset..offset + BLOCK].try_into().unwrap();
        util::xor_in_place(&mut block, &prev);
        util::encrypt_block(&cipher, &mut block);
        buf[offset..offset + BLOCK].copy_from_slice(&block);
        prev = block;
        offset += BLOCK;
    }

    if tail == 0 {
        let mut block: [u8; BLOCK] = buf[offset..offset + BLOCK].try_into().unwrap();
        util::xor_in_place(&mut block, &prev);
        util::encrypt_block(&cipher, &mut block);
        buf[offset..offset + BLOCK].copy_from_slice(&block);
    } else {
        let mut penultimate: [u8; BLOCK] = buf[offset..offset + BLOCK].try_into().unwrap();
        util::xor_in_place(&mut penultimate, &prev);
        util::encrypt_block(&cipher, &mut penultimate);

        let partial_len = tail;
        let mut last = [0u8; BLOCK];
        last[..partial_len].copy_from_slice(&buf[offset + BLOCK..]);
        util::xor_in_place(&mut last[..partial_len], &penultimate[..partial_len]);
        let stolen = penultimate;
        last[partial_len..].copy_from_slice(&stolen[partial_len..]);
        util::encrypt_block(&cipher, &mut last);

        buf[offset..offset + BLOCK].copy_from_slice(&last);
        buf[offset + BLOCK..].copy_from_slice(&stolen[..partial_len]);
    }

    Ok(())
}

/// Decrypt `buf` in place under CBC with ciphertext stealing.
pub fn decrypt(key: &[u8], iv: &[u8; BLOCK], buf: &mut [u8]) -> Result<()> {
    if buf.len() < BLOCK {
        return Err(Error::BadInput);
    }
    let cipher = util::new_cipher(key)?;

    let tail = buf.len() % BLOCK;
    let last_full_start = if tail == 0 {
        buf.len().saturating_sub(BLOCK)
    } else {
        (buf.len() / BLOCK) * BLOCK - BLOCK
    };

    let mut prev = *iv;
    let mut offset = 0;
    while offset < last_full_start {
        let ct: [u8; BLOCK] = buf[offset..offset + BLOCK].try_into().unwrap();
        let mut block = ct;
        util::decrypt_block(&cipher, &mut block);
        util::xor_in_place(&mut block, &prev);
        buf[offset..offset + BLOCK].copy_from_slice(&block);
        prev = ct;
        offset += BLOCK;
    }

    if tail == 0 {
        let ct: [u8; BLOCK] = buf[offset..offset + BLOCK].try_into().unwrap();
        let mut block = ct;
        util::decrypt_block(&cipher, &mut block);
        util::xor_in_place(&mut block, &prev);
        buf[offset..offset + BLOCK].copy_from_slice(&block);
    } else {
        let partial_len = tail;
        let c_new_full: [u8; BLOCK] = buf[offset..offset + BLOCK].try_into().unwrap();
        let mut d = c_new_full;
        util::decrypt_block(&cipher, &mut d);

        let c_stolen_partial = &buf[offset + BLOCK..offset + BLOCK + partial_len];

        // Reconstruct the full stolen ciphertext block, then undo its
        // own CBC chaining against `prev` to recover P_prev.
        let mut stolen_full = [0u8; BLOCK];
        stolen_full[..partial_len].copy_from_slice(c_stolen_partial);
        stolen_full[partial_len..].copy_from_slice(&d[partial_len..]);
        let mut p_prev = stolen_full;
        util::decrypt_block(&cipher, &mut p_prev);
        util::xor_in_place(&mut p_prev, &prev);

        let mut p_last = [0u8; BLOCK];
        for i in 0..partial_len {
            p_last[i] = d[i] ^ c_stolen_partial[i];
        }

        buf[offset..offset + BLOCK].copy_from_slice(&p_prev);
        buf[offset + BLOCK..].copy_from_slice(&p_last[..partial_len]);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_block_aligned() {
        let key = [0x33u8; 32];
        let iv = [0x01u8; BLOCK];
        let mut buf = [0u8; 48];
        for (i, b) in buf.iter_mut().enumerate() {
            *b = i as u8;
        }
        let original = buf;
        encrypt(&key, &iv, &mut buf).unwrap();
        decrypt(&key, &iv, &mut buf).unwrap();
        assert_eq!(buf, original);
    }

    #[test]
    fn round_trips_with_ciphertext_stealing() {
        let key = [0x44u8; 32];
        let iv = [0x02u8; BLOCK];
        let mut buf = [0u8; 37];
        for (i, b) in buf.iter_mut().enumerate() {
            *b = (i * 7) as u8;
        }
        let original = buf;
        encrypt(&key, &iv, &mut buf).unwrap();
        decrypt(&key, &iv, &mut buf).unwrap();
        assert_eq!(buf, original);
    }
}
