//! Certificate-chain validation (§4.8): either the chain's first entry
//! equals a caller-supplied anchor, or a caller-supplied validator
//! accepts each issuer/subject pair in sequence.
//!
//! CVC parsing itself is out of scope here (§1): this crate carries
//! certificates as opaque octets and only ever compares or hands them,
//! whole, to a caller-supplied [`ChainValidator`] — a collaborator
//! built elsewhere can parse and check them `btok_cvc_val2`-style.

use alloc::vec::Vec;

use crate::Error;

/// A pluggable chain-link check, shaped after `btok_cvc_val2`: given an
/// issuer certificate, its subject certificate, and the date the
/// signature carries (if any), decide whether the subject is validly
/// signed by the issuer as of that date.
pub trait ChainValidator {
    /// Returns `Ok(())` if `subject` is acceptable as signed by
    /// `issuer` as of `date`.
    fn validate_link(&self, issuer: &[u8], subject: &[u8], date: Option<[u8; 6]>) -> Result<(), Error>;
}

/// Validates a chain by requiring its first certificate to equal a
/// fixed anchor, without inspecting any other link.
pub struct AnchorValidator<'a> {
    /// The trusted root certificate's raw octets.
    pub anchor: &'a [u8],
}

impl ChainValidator for AnchorValidator<'_> {
    fn validate_link(&self, issuer: &[u8], _subject: &[u8], _date: Option<[u8; 6]>) -> Result<(), Error> {
        if issuer == self.anchor {
            Ok(())
        } else {
            Err(Error::BadCert)
        }
    }
}

/// Validates `certs` either against a fixed anchor (the first
/// certificate must equal it) or, if no anchor is given, by running
/// `validator` over each consecutive issuer/subject pair.
pub fn validate_chain(
    certs: &[Vec<u8>],
    date: Option<[u8; 6]>,
    anchor: Option<&[u8]>,
    validator: &dyn ChainValidator,
) -> Result<(), Error> {
    if certs.is_empty() {
        return Err(Error::BadCert);
    }
    if let Some(anchor) = anchor {
        if certs[0] == anchor {
            return Ok(());
        }
        return Err(Error::BadCert);
    }
    for pair in certs.windows(2) {
        validator.validate_link(&pair[0], &pair[1], date)?;
    }
    Ok(())
}
