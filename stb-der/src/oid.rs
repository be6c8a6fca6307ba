//! The object identifiers STB 34.101's containers name by OID (§6).

use der::asn1::ObjectIdentifier;

/// belt-hash, as used inside Bign96/Bign128 signatures.
pub const BELT_HASH: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.112.0.2.0.34.101.31.81");
/// bash-hash384, as used inside Bign192 signatures.
pub const BASH_HASH384: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.112.0.2.0.34.101.77.12");
/// bash-hash512, as used inside Bign256 signatures.
pub const BASH_HASH512: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.112.0.2.0.34.101.77.13");

/// Bign96.
pub const CURVE96: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.112.0.2.0.34.101.45.3.0");
/// Bign128.
pub const CURVE256V1: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.112.0.2.0.34.101.45.3.1");
/// Bign192.
pub const CURVE384V1: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.112.0.2.0.34.101.45.3.2");
/// Bign256.
pub const CURVE512V1: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.112.0.2.0.34.101.45.3.3");

/// Bign public key, as carried by a `SubjectPublicKeyInfo`.
pub const BIGN_PUBKEY: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.112.0.2.0.34.101.45.2.1");
/// A Bels share, as wrapped by bpki.
pub const BELS_SHARE: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.112.0.2.0.34.101.60.11");
/// Bels sharing mode 1 of 3 (see `bels_mode`).
pub const BELS_MODE_1: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.112.0.2.0.34.101.60.2.1");
/// Bels sharing mode 2 of 3 (see `bels_mode`).
pub const BELS_MODE_2: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.112.0.2.0.34.101.60.2.2");
/// Bels sharing mode 3 of 3 (see `bels_mode`).
pub const BELS_MODE_3: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.112.0.2.0.34.101.60.2.3");

/// PBKDF2, as used by bpki's key-derivation step.
pub const PBKDF2: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.5.12");
/// PBES2, the outer wrapping scheme bpki uses.
pub const PBES2: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.5.13");
/// belt-kwp256, the key-wrap algorithm bpki uses under PBES2.
pub const BELT_KWP256: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.112.0.2.0.34.101.31.73");
/// hmac-hbelt, the PBKDF2 PRF bpki uses.
pub const HMAC_HBELT: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.112.0.2.0.34.101.47.12");

/// Returns the one of [`CURVE96`]/[`CURVE256V1`]/[`CURVE384V1`]/
/// [`CURVE512V1`] whose private-key width (in octets) is `width`, if
/// any such level exists.
pub fn curve_oid_for_key_width(width: usize) -> Option<ObjectIdentifier> {
    match width {
        24 => Some(CURVE96),
        32 => Some(CURVE256V1),
        48 => Some(CURVE384V1),
        64 => Some(CURVE512V1),
        _ => None,
    }
}

/// Returns the hash OID a Bign signature's length selects (§6: 32-octet
/// signatures hash with belt-hash, 48/64-octet ones with bash-hash).
pub fn hash_oid_for_signature_len(len: usize) -> Option<ObjectIdentifier> {
    match len {
        34 | 36 => Some(BELT_HASH),
        48 => Some(BELT_HASH),
        72 => Some(BASH_HASH384),
        96 => Some(BASH_HASH512),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_oids_round_trip_by_key_width() {
        assert_eq!(curve_oid_for_key_width(24), Some(CURVE96));
        assert_eq!(curve_oid_for_key_width(32), Some(CURVE256V1));
        assert_eq!(curve_oid_for_key_width(48), Some(CURVE384V1));
        assert_eq!(curve_oid_for_key_width(64), Some(CURVE512V1));
        assert_eq!(curve_oid_for_key_width(17), None);
    }
}
