//! Errors the Bels layer can report.

/// Failures from share construction or secret recovery.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A share's index was outside `[1, 16]`.
    BadIndex,
    /// Two or more shares passed to [`crate::recover`] carried the same
    /// index — interpolation requires `k` distinct points.
    DuplicateIndex,
    /// Fewer than two shares were given to [`crate::recover`].
    NotEnoughShares,
    /// [`crate::split`]'s `k` or `out.len()` was outside the valid
    /// range (`2 <= k <= out.len() <= 16`).
    BadThreshold,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::BadIndex => write!(f, "bels: share index outside 1..=16"),
            Error::DuplicateIndex => write!(f, "bels: duplicate share index"),
            Error::NotEnoughShares => write!(f, "bels: at least two shares are required"),
            Error::BadThreshold => write!(f, "bels: invalid k/n for splitting"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
