//! Errors the generator can report.

/// Errors from constructing or driving a [`crate::Brng`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The key or IV passed to [`crate::Brng::new`]/[`crate::Brng::rekey`]
    /// was not exactly 32 octets.
    BadSeed,
    /// [`crate::Brng::health`] found the generator in a state it cannot
    /// have reached honestly (all-zero counter and feedback), which can
    /// only follow a construction bug rather than normal operation.
    Unhealthy,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::BadSeed => write!(f, "brng: key or iv was not 32 octets"),
            Error::Unhealthy => write!(f, "brng: generator failed its self-test"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
