//! The exhaustive error kind for mode failures (§7, the subset the modes
//! layer can itself produce).

/// Errors a Belt mode can report.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Argument invalid or buffer too small.
    BadInput,
    /// Algorithm parameters fail validation (e.g. an IV of the wrong size).
    BadParams,
    /// Key material is malformed.
    BadKey,
    /// Authentication failure: the MAC/tag did not verify.
    BadMac,
    /// A wrapped blob failed its integrity check or framing.
    BadFormat,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::BadInput => write!(f, "belt-modes: invalid argument or buffer size"),
            Error::BadParams => write!(f, "belt-modes: invalid algorithm parameters"),
            Error::BadKey => write!(f, "belt-modes: invalid key"),
            Error::BadMac => write!(f, "belt-modes: authentication failed"),
            Error::BadFormat => write!(f, "belt-modes: malformed input"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Convenience result alias.
pub type Result<T> = core::result::Result<T, Error>;
