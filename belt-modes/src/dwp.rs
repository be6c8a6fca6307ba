//! DWP: CTR encryption combined with a MAC over `(AAD, ciphertext)`
//! (§4.2 "DWP").

use crate::ctr::Ctr;
use crate::error::{Error, Result};
use crate::mac;
use crate::util::BLOCK;
use subtle::ConstantTimeEq;

/// Default DWP tag length (octets).
pub const TAG_LEN: usize = 8;

fn mac_input_len(aad: &[u8], ciphertext: &[u8]) -> usize {
    8 + aad.len() + 8 + ciphertext.len()
}

fn compute_tag(mac_key: &[u8], aad: &[u8], ciphertext: &[u8]) -> Result<[u8; mac::MAX_TAG_LEN]> {
    let mut ctx = mac::Mac::start(mac_key)?;
    ctx.step(&(aad.len() as u64).to_le_bytes());
    ctx.step(aad);
    ctx.step(&(ciphertext.len() as u64).to_le_bytes());
    ctx.step(ciphertext);
    let _ = mac_input_len(aad, ciphertext);
    ctx.finish(TAG_LEN)
}

/// Encrypt `buf` in place under CTR and return the authentication tag
/// over `(aad, ciphertext)`.
pub fn seal(
    enc_key: &[u8],
    mac_key: &[u8],
    iv: &[u8; BLOCK],
    aad: &[u8],
    buf: &mut [u8],
) -> Result<[u8; mac::MAX_TAG_LEN]> {
    let mut ctx = Ctr::start(enc_key, iv)?;
    ctx.step(buf);
    compute_tag(mac_key, aad, buf)
}

/// Verify `tag` over `(aad, buf)` and, only if it matches, decrypt `buf`
/// in place. Authentication failure never reveals any plaintext octet
/// (§7 "BadMac").
pub fn open(
    enc_key: &[u8],
    mac_key: &[u8],
    iv: &[u8; BLOCK],
    aad: &[u8],
    buf: &mut [u8],
    tag: &[u8],
) -> Result<()> {
    let expected = compute_tag(mac_key, aad, buf)?;
    if !bool::from(expected[..tag.len()].ct_eq(tag)) {
        return Err(Error::BadMac);
    }
    let mut ctx = Ctr::start(enc_key, iv)?;
    ctx.step(buf);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_open_round_trip() {
        let enc_key = [0x11u8; 32];
        let mac_key = [0x22u8; 32];
        let iv = [0x01u8; BLOCK];
        let aad = b"associated data";
        let mut buf = *b"this is a secret message!!";
        let plaintext = buf;

        let tag = seal(&enc_key, &mac_key, &iv, aad, &mut buf).unwrap();
        assert_ne!(&buf[..], &plaintext[..]);

        open(&enc_key, &mac_key, &iv, aad, &mut buf, &tag).unwrap();
        assert_eq!(buf, plaintext);
    }

    #[test]
    fn bit_flip_in_ciphertext_fails_auth() {
        let enc_key = [0x11u8; 32];
        let mac_key = [0x22u8; 32];
        let iv = [0x01u8; BLOCK];
        let aad = b"aad";
        let mut buf = *b"0123456789012345";
        let tag = seal(&enc_key, &mac_key, &iv, aad, &mut buf).unwrap();

        buf[0] ^= 1;
        assert_eq!(
            open(&enc_key, &mac_key, &iv, aad, &mut buf, &tag),
            Err(Error::BadMac)
        );
    }

    #[test]
    fn bit_flip_in_aad_fails_auth() {
        let enc_key = [0x11u8; 32];
        let mac_key = [0x22u8; 32];
        let iv = [0x01u8; BLOCK];
        let mut buf = *b"0123456789012345";
        let tag = seal(&enc_key, &mac_key, &iv, b"aad", &mut buf).unwrap();

        assert_eq!(
            open(&enc_key, &mac_key, &iv, b"bad", &mut buf, &tag),
            Err(Error::BadMac)
        );
    }
}
