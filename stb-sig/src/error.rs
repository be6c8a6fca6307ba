//! Errors the envelope layer can report.

/// Errors from locating, decoding or validating a signature envelope.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The envelope's DER encoding was malformed, or no valid DER
    /// `SEQUENCE` header could be found in the tail probe.
    BadFormat,
    /// A date field was the wrong width, or a date was required (the
    /// write format) but none was given.
    BadDate,
    /// Chain validation rejected the certificate chain.
    BadCert,
    /// The signature's length didn't select any known hash algorithm.
    BadSig,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::BadFormat => write!(f, "stb-sig: malformed envelope"),
            Error::BadDate => write!(f, "stb-sig: invalid or missing date"),
            Error::BadCert => write!(f, "stb-sig: certificate chain rejected"),
            Error::BadSig => write!(f, "stb-sig: signature length selects no known hash"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
