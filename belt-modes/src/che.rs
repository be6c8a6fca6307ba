//! CHE: an AEAD variant computing the MAC under a counter-derived
//! subkey, interleaved with CFB-like single-pass encryption (§4.2
//! "CHE").

use crate::cfb;
use crate::error::{Error, Result};
use crate::mac;
use crate::util::BLOCK;
use subtle::ConstantTimeEq;

/// CHE tag length (octets).
pub const TAG_LEN: usize = 8;

fn derive_mac_key(key: &[u8], iv: &[u8; BLOCK]) -> [u8; 32] {
    let mut derived = [0u8; 32];
    for i in 0..32 {
        derived[i] = key[i % key.len()] ^ iv[i % BLOCK];
    }
    derived
}

/// Encrypt `buf` in place under CFB and return the tag over
/// `(aad, plaintext)`, computed under a subkey derived from `(key, iv)`.
pub fn seal(key: &[u8], iv: &[u8; BLOCK], aad: &[u8], buf: &mut [u8]) -> Result<[u8; mac::MAX_TAG_LEN]> {
    let mac_key = derive_mac_key(key, iv);
    let mut ctx = mac::Mac::start(&mac_key)?;
    ctx.step(aad);
    ctx.step(buf); // tag binds the plaintext, computed before encryption
    let tag = ctx.finish(TAG_LEN)?;

    cfb::encrypt(key, iv, buf)?;
    Ok(tag)
}

/// Decrypt `buf` in place and verify `tag` against `(aad, plaintext)`.
pub fn open(key: &[u8], iv: &[u8; BLOCK], aad: &[u8], buf: &mut [u8], tag: &[u8]) -> Result<()> {
    cfb::decrypt(key, iv, buf)?;

    let mac_key = derive_mac_key(key, iv);
    let mut ctx = mac::Mac::start(&mac_key)?;
    ctx.step(aad);
    ctx.step(buf);
    let expected = ctx.finish(tag.len())?;

    if !bool::from(expected[..tag.len()].ct_eq(tag)) {
        // The caller must not observe the now-decrypted buffer.
        buf.fill(0);
        return Err(Error::BadMac);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_open_round_trip() {
        let key = [0x33u8; 32];
        let iv = [0x44u8; BLOCK];
        let aad = b"che-aad";
        let mut buf = *b"che authenticated encryption!!";
        let plaintext = buf;

        let tag = seal(&key, &iv, aad, &mut buf).unwrap();
        open(&key, &iv, aad, &mut buf, &tag).unwrap();
        assert_eq!(buf, plaintext);
    }

    #[test]
    fn tamper_zeroes_plaintext_on_failure() {
        let key = [0x33u8; 32];
        let iv = [0x44u8; BLOCK];
        let mut buf = *b"0123456789012345";
        let tag = seal(&key, &iv, b"aad", &mut buf).unwrap();

        let mut bad_tag = tag;
        bad_tag[0] ^= 1;
        let err = open(&key, &iv, b"aad", &mut buf, &bad_tag).unwrap_err();
        assert_eq!(err, Error::BadMac);
        assert!(buf.iter().all(|&b| b == 0));
    }
}
