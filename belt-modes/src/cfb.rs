//! CFB self-synchronizing feedback mode (§4.2 "CFB").

use crate::error::{Error, Result};
use crate::util::{self, BLOCK};

/// Encrypt `buf` in place: `keystream_i = E(IV_i)`, `IV_{i+1}` is the
/// ciphertext of block `i`.
pub fn encrypt(key: &[u8], iv: &[u8; BLOCK], buf: &mut [u8]) -> Result<()> {
    if buf.is_empty() {
        return Err(Error::BadInput);
    }
    let cipher = util::new_cipher(key)?;
    let mut feedback = *iv;

    for chunk in buf.chunks_mut(BLOCK) {
        let mut keystream = feedback;
        util::encrypt_block(&cipher, &mut keystream);
        util::xor_in_place(chunk, &keystream[..chunk.len()]);
        feedback[..chunk.len()].copy_from_slice(chunk);
    }
    Ok(())
}

/// Decrypt `buf` in place; feedback comes from the (unmodified)
/// ciphertext, so this runs the same keystream but updates `feedback`
/// before XORing.
pub fn decrypt(key: &[u8], iv: &[u8; BLOCK], buf: &mut [u8]) -> Result<()> {
    if buf.is_empty() {
        return Err(Error::BadInput);
    }
    let cipher = util::new_cipher(key)?;
    let mut feedback = *iv;

    for chunk in buf.chunks_mut(BLOCK) {
        let mut keystream = feedback;
        util::encrypt_block(&cipher, &mut keystream);
        feedback[..chunk.len()].copy_from_slice(chunk);
        util::xor_in_place(chunk, &keystream[..chunk.len()]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_length() {
        let key = [0x55u8; 32];
        let iv = [0x09u8; BLOCK];
        let mut buf = [0u8; 37];
        for (i, b) in buf.iter_mut().enumerate() {
            *b = (i * 5) as u8;
        }
        let original = buf;
        encrypt(&key, &iv, &mut buf).unwrap();
        assert_ne!(buf, original);
        decrypt(&key, &iv, &mut buf).unwrap();
        assert_eq!(buf, original);
    }
}
