//! Errors the wrap/unwrap containers can report.

/// Errors from [`crate::wrap`]/[`crate::unwrap`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The DER container was malformed or truncated.
    BadFormat,
    /// An algorithm identifier named something other than PBES2,
    /// PBKDF2, HMAC-HBelt or belt-kwp256.
    BadOid,
    /// The stored iteration count was below the floor PBKDF2-HMAC-HBelt
    /// enforces.
    IterationCountTooLow,
    /// The payload's length didn't match any supported Bign
    /// private-key or Bels-share width for the algorithm identifier it
    /// was tagged with.
    BadPayloadLen,
    /// The wrapped blob failed Belt-KWP's integrity check.
    BadMac,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::BadFormat => write!(f, "bpki: malformed container"),
            Error::BadOid => write!(f, "bpki: unrecognized algorithm identifier"),
            Error::IterationCountTooLow => write!(f, "bpki: iteration count below the floor"),
            Error::BadPayloadLen => write!(f, "bpki: payload length doesn't match its algorithm"),
            Error::BadMac => write!(f, "bpki: integrity check failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
