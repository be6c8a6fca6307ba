//! Errors the Bash layers can report.

/// Failures from `bash-ae`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Authentication failure: the tag did not verify.
    BadMac,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::BadMac => write!(f, "bash-ae: authentication failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
