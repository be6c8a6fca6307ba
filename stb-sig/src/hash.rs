//! Hash-algorithm selection by signature length (§4.8): the digest
//! that binds `signed_content || cert_chain_octets || date_bytes` uses
//! belt-hash for Bign96/Bign128 signatures, bash-hash384/512 for
//! Bign192/Bign256 ones.

use alloc::vec::Vec;

use belt_hash::BeltHash;
use belt_hash::Digest;
use bash::Digest as _;

use crate::Error;

/// Computes the hash that binds a signed file's content, its
/// certificate chain octets and its date octets, choosing the
/// algorithm by `signature_len` (34/36 or 48 octets select belt-hash;
/// 72 selects bash-hash384; 96 selects bash-hash512).
pub fn bound_hash(
    signed_content: &[u8],
    cert_chain_octets: &[u8],
    date_bytes: &[u8; 6],
    signature_len: usize,
) -> Result<Vec<u8>, Error> {
    match signature_len {
        34 | 36 | 48 => {
            let mut hasher = BeltHash::new();
            hasher.update(signed_content);
            hasher.update(cert_chain_octets);
            hasher.update(date_bytes);
            Ok(hasher.finalize().to_vec())
        }
        72 => {
            let mut hasher = bash::hash::BashHash192::new();
            hasher.update(signed_content);
            hasher.update(cert_chain_octets);
            hasher.update(date_bytes);
            Ok(hasher.finalize().to_vec())
        }
        96 => {
            let mut hasher = bash::hash::BashHash256::new();
            hasher.update(signed_content);
            hasher.update(cert_chain_octets);
            hasher.update(date_bytes);
            Ok(hasher.finalize().to_vec())
        }
        _ => Err(Error::BadSig),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_belt_hash_for_short_signatures() {
        let digest = bound_hash(b"content", b"certs", &[0u8; 6], 48).unwrap();
        assert_eq!(digest.len(), 32);
    }

    #[test]
    fn selects_bash_hash384_for_bign192_signatures() {
        let digest = bound_hash(b"content", b"certs", &[0u8; 6], 72).unwrap();
        assert_eq!(digest.len(), 48);
    }

    #[test]
    fn selects_bash_hash512_for_bign256_signatures() {
        let digest = bound_hash(b"content", b"certs", &[0u8; 6], 96).unwrap();
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn rejects_unrecognized_signature_lengths() {
        assert_eq!(
            bound_hash(b"content", b"certs", &[0u8; 6], 17),
            Err(Error::BadSig)
        );
    }

    #[test]
    fn hash_changes_if_any_bound_component_changes() {
        let a = bound_hash(b"content", b"certs", &[0u8; 6], 48).unwrap();
        let b = bound_hash(b"content", b"certs", &[1u8; 6], 48).unwrap();
        assert_ne!(a, b);
    }
}
