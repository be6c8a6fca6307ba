//! Errors the Bign layer can report.

/// Failures from keypair generation, signing or verification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A signature did not verify.
    BadSignature,
    /// A public key failed validation (off-curve, identity, or
    /// `q * Q != O`).
    BadPublicKey,
    /// An input buffer did not match the expected length for the level.
    BadLength,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::BadSignature => write!(f, "bign: signature verification failed"),
            Error::BadPublicKey => write!(f, "bign: public key validation failed"),
            Error::BadLength => write!(f, "bign: input length did not match the security level"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
