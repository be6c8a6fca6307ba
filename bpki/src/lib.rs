#![no_std]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod error;
mod payload;

pub use error::Error;
pub use payload::PayloadKind;

use alloc::vec;
use alloc::vec::Vec;

use stb_der::{Decode, Encode, ObjectIdentifier, OctetString, Sequence, Uint};

#[derive(Sequence)]
struct AlgorithmParams {
    alg: ObjectIdentifier,
    param: ObjectIdentifier,
}

#[derive(Sequence)]
struct PrivateKeyInfo {
    version: Uint,
    algorithm: AlgorithmParams,
    payload: OctetString,
}

#[derive(Sequence)]
struct Pbkdf2Prf {
    oid: ObjectIdentifier,
}

#[derive(Sequence)]
struct Pbkdf2Inner {
    salt: OctetString,
    iterations: Uint,
    prf: Pbkdf2Prf,
}

#[derive(Sequence)]
struct Pbkdf2AlgId {
    oid: ObjectIdentifier,
    params: Pbkdf2Inner,
}

#[derive(Sequence)]
struct Pbes2Params {
    kdf: Pbkdf2AlgId,
    enc_oid: ObjectIdentifier,
}

#[derive(Sequence)]
struct Pbes2AlgId {
    oid: ObjectIdentifier,
    params: Pbes2Params,
}

#[derive(Sequence)]
struct Container {
    algorithm: Pbes2AlgId,
    ciphertext: OctetString,
}

fn u32_to_uint(value: u32) -> Result<Uint, Error> {
    Uint::new(&value.to_be_bytes()).map_err(|_| Error::BadFormat)
}

fn uint_to_u32(value: &Uint) -> Result<u32, Error> {
    let bytes = value.as_bytes();
    if bytes.len() > 4 {
        return Err(Error::BadFormat);
    }
    let mut buf = [0u8; 4];
    buf[4 - bytes.len()..].copy_from_slice(bytes);
    Ok(u32::from_be_bytes(buf))
}

/// Wraps `payload` (a Bign private key or Bels share, per `kind`) under
/// a key derived from `(pwd, salt, iterations)`, returning the DER
/// container (§4.7).
pub fn wrap(
    payload: &[u8],
    kind: PayloadKind,
    pwd: &[u8],
    salt: &[u8],
    iterations: u32,
) -> Result<Vec<u8>, Error> {
    kind.validate_len(payload.len())?;

    let mut key = [0u8; 32];
    belt_hash::belt_pbkdf2(pwd, salt, iterations, &mut key)
        .map_err(|_| Error::IterationCountTooLow)?;

    let pki = PrivateKeyInfo {
        version: Uint::new(&[0]).map_err(|_| Error::BadFormat)?,
        algorithm: AlgorithmParams {
            alg: kind.alg_oid(),
            param: kind.param_oid(payload.len())?,
        },
        payload: OctetString::new(payload.to_vec()).map_err(|_| Error::BadFormat)?,
    };
    let inner = pki.to_der().map_err(|_| Error::BadFormat)?;

    let mut ciphertext = vec![0u8; inner.len() + 16];
    belt_modes::kwp_mode::wrap(&key, &[], &inner, &mut ciphertext).map_err(|_| Error::BadMac)?;

    let container = Container {
        algorithm: Pbes2AlgId {
            oid: stb_der::PBES2,
            params: Pbes2Params {
                kdf: Pbkdf2AlgId {
                    oid: stb_der::PBKDF2,
                    params: Pbkdf2Inner {
                        salt: OctetString::new(salt.to_vec()).map_err(|_| Error::BadFormat)?,
                        iterations: u32_to_uint(iterations)?,
                        prf: Pbkdf2Prf {
                            oid: stb_der::HMAC_HBELT,
                        },
                    },
                },
                enc_oid: stb_der::BELT_KWP256,
            },
        },
        ciphertext: OctetString::new(ciphertext).map_err(|_| Error::BadFormat)?,
    };
    container.to_der().map_err(|_| Error::BadFormat)
}

/// Reverses [`wrap`]: derives the key from `pwd` and the container's
/// own salt/iteration count, unwraps the ciphertext, and returns the
/// recovered payload along with what it is.
pub fn unwrap(container_der: &[u8], pwd: &[u8]) -> Result<(PayloadKind, Vec<u8>), Error> {
    let container = Container::from_der(container_der).map_err(|_| Error::BadFormat)?;

    if container.algorithm.oid != stb_der::PBES2 {
        return Err(Error::BadOid);
    }
    let kdf = &container.algorithm.params.kdf;
    if kdf.oid != stb_der::PBKDF2 || kdf.params.prf.oid != stb_der::HMAC_HBELT {
        return Err(Error::BadOid);
    }
    if container.algorithm.params.enc_oid != stb_der::BELT_KWP256 {
        return Err(Error::BadOid);
    }

    let salt = kdf.params.salt.as_bytes();
    let iterations = uint_to_u32(&kdf.params.iterations)?;

    let mut key = [0u8; 32];
    belt_hash::belt_pbkdf2(pwd, salt, iterations, &mut key)
        .map_err(|_| Error::IterationCountTooLow)?;

    let ciphertext = container.ciphertext.as_bytes();
    if ciphertext.len() < 16 {
        return Err(Error::BadFormat);
    }
    let mut inner = vec![0u8; ciphertext.len() - 16];
    belt_modes::kwp_mode::unwrap(&key, &[], ciphertext, &mut inner).map_err(|_| Error::BadMac)?;

    let pki = PrivateKeyInfo::from_der(&inner).map_err(|_| Error::BadFormat)?;
    let kind = PayloadKind::from_oids(pki.algorithm.alg, pki.algorithm.param)?;
    let payload = pki.payload.as_bytes().to_vec();
    kind.validate_len(payload.len())?;
    Ok((kind, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITERATIONS: u32 = 10_000;

    #[test]
    fn wrap_then_unwrap_a_bign_private_key_round_trips() {
        let payload = [0x42u8; 32];
        let container = wrap(
            &payload,
            PayloadKind::BignPrivateKey,
            b"correct horse",
            b"some-salt",
            ITERATIONS,
        )
        .expect("wraps");

        let (kind, recovered) = unwrap(&container, b"correct horse").expect("unwraps");
        assert_eq!(kind, PayloadKind::BignPrivateKey);
        assert_eq!(recovered, payload);
    }

    #[test]
    fn wrap_then_unwrap_a_bels_share_round_trips() {
        let mut payload = [0u8; 33];
        payload[0] = 3;
        let container = wrap(
            &payload,
            PayloadKind::BelsShare,
            b"pwd",
            b"salt-value",
            ITERATIONS,
        )
        .expect("wraps");

        let (kind, recovered) = unwrap(&container, b"pwd").expect("unwraps");
        assert_eq!(kind, PayloadKind::BelsShare);
        assert_eq!(recovered.as_slice(), &payload[..]);
    }

    #[test]
    fn wrong_password_fails_the_integrity_check() {
        let payload = [0x11u8; 48];
        let container = wrap(
            &payload,
            PayloadKind::BignPrivateKey,
            b"pwd-a",
            b"salt",
            ITERATIONS,
        )
        .unwrap();

        assert_eq!(unwrap(&container, b"pwd-b"), Err(Error::BadMac));
    }

    #[test]
    fn low_iteration_counts_are_rejected() {
        let payload = [0x22u8; 32];
        assert_eq!(
            wrap(
                &payload,
                PayloadKind::BignPrivateKey,
                b"pwd",
                b"salt",
                100
            ),
            Err(Error::IterationCountTooLow)
        );
    }

    #[test]
    fn unsupported_payload_lengths_are_rejected() {
        let payload = [0x33u8; 40];
        assert_eq!(
            wrap(
                &payload,
                PayloadKind::BignPrivateKey,
                b"pwd",
                b"salt",
                ITERATIONS
            ),
            Err(Error::BadPayloadLen)
        );
    }
}
