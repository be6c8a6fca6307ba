//! The payload types bpki containers may carry (§4.7).

use stb_der::ObjectIdentifier;

use crate::Error;

/// What a wrapped payload is: a Bign private key at one of the three
/// bpki-supported security levels, or a Bels share.
///
/// Bign96's 24-octet private key is deliberately not a supported
/// payload width here; its short-form bit-packing makes it unsuitable
/// for this container (§4.7 lists only 32/48/64-octet Bign keys).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PayloadKind {
    /// A Bign private key (32, 48 or 64 octets).
    BignPrivateKey,
    /// A Bels share (17, 25 or 33 octets, leading index 1..16).
    BelsShare,
}

impl PayloadKind {
    pub(crate) fn validate_len(&self, len: usize) -> Result<(), Error> {
        let ok = match self {
            PayloadKind::BignPrivateKey => matches!(len, 32 | 48 | 64),
            PayloadKind::BelsShare => matches!(len, 17 | 25 | 33),
        };
        if ok { Ok(()) } else { Err(Error::BadPayloadLen) }
    }

    pub(crate) fn alg_oid(&self) -> ObjectIdentifier {
        match self {
            PayloadKind::BignPrivateKey => stb_der::BIGN_PUBKEY,
            PayloadKind::BelsShare => stb_der::BELS_SHARE,
        }
    }

    /// The `param` field this payload/width pairing encodes as: the
    /// curve for a Bign key, the sharing mode for a Bels share (only
    /// [`stb_der::BELS_MODE_1`] is produced or accepted here — modes 2
    /// and 3 name alternate public generator tables this crate's Bels
    /// layer does not implement).
    pub(crate) fn param_oid(&self, len: usize) -> Result<ObjectIdentifier, Error> {
        match self {
            PayloadKind::BignPrivateKey => {
                stb_der::curve_oid_for_key_width(len).ok_or(Error::BadPayloadLen)
            }
            PayloadKind::BelsShare => Ok(stb_der::BELS_MODE_1),
        }
    }

    pub(crate) fn from_oids(alg: ObjectIdentifier, param: ObjectIdentifier) -> Result<Self, Error> {
        if alg == stb_der::BIGN_PUBKEY {
            if param != stb_der::CURVE256V1 && param != stb_der::CURVE384V1 && param != stb_der::CURVE512V1 {
                return Err(Error::BadOid);
            }
            Ok(PayloadKind::BignPrivateKey)
        } else if alg == stb_der::BELS_SHARE {
            if param != stb_der::BELS_MODE_1 {
                return Err(Error::BadOid);
            }
            Ok(PayloadKind::BelsShare)
        } else {
            Err(Error::BadOid)
        }
    }
}
