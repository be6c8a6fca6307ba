//! The on-disk signature envelope (§4.8): a DER `SEQUENCE` of a
//! certificate chain, an optional date, and the raw signature octets —
//! stored byte-reversed and located by scanning the tail of the signed
//! file.

use alloc::vec::Vec;

use stb_der::{Decode, Encode, OctetString, Sequence};

use crate::Error;

#[derive(Sequence)]
struct Envelope4 {
    certs: Vec<OctetString>,
    date: OctetString,
    signature: OctetString,
}

#[derive(Sequence)]
struct Envelope3 {
    certs: Vec<OctetString>,
    signature: OctetString,
}

/// A decoded (or about-to-be-encoded) signature envelope.
///
/// Encoding always produces the dated 4-element `SEQUENCE` (§9's
/// resolution: the dated variant is the write format). Decoding accepts
/// either that or the older undated 3-element `SEQUENCE`; the
/// superseded `APPLICATION`-tagged (`0x7F4E`) format from before the
/// `SEQUENCE` envelope is not decodable here (§9, explicitly excluded).
pub struct Envelope {
    /// Raw octets of each certificate in the chain, in order.
    pub certs: Vec<Vec<u8>>,
    /// The signing date, if the envelope carries one.
    pub date: Option<[u8; 6]>,
    /// The raw signature octets (34, 48, 72 or 96 of them).
    pub signature: Vec<u8>,
}

impl Envelope {
    /// Builds a dated envelope, the only shape [`Self::to_der`] can
    /// encode.
    pub fn new(certs: Vec<Vec<u8>>, date: [u8; 6], signature: Vec<u8>) -> Self {
        Self {
            certs,
            date: Some(date),
            signature,
        }
    }

    /// Encodes this envelope as DER. Fails with [`Error::BadDate`] if
    /// no date was set, since the write format always carries one.
    pub fn to_der(&self) -> Result<Vec<u8>, Error> {
        let date = self.date.ok_or(Error::BadDate)?;
        let certs = encode_certs(&self.certs)?;
        let envelope = Envelope4 {
            certs,
            date: OctetString::new(date.to_vec()).map_err(|_| Error::BadFormat)?,
            signature: OctetString::new(self.signature.clone()).map_err(|_| Error::BadFormat)?,
        };
        envelope.to_der().map_err(|_| Error::BadFormat)
    }

    /// Encodes this envelope and reverses the resulting octets, ready
    /// to be appended to a signed file (§4.8).
    pub fn to_reversed_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = self.to_der()?;
        bytes.reverse();
        Ok(bytes)
    }

    /// Decodes an envelope from its (non-reversed) DER bytes, trying
    /// the dated shape before falling back to the undated one.
    pub fn from_der(bytes: &[u8]) -> Result<Self, Error> {
        if let Ok(env4) = Envelope4::from_der(bytes) {
            let date_bytes = env4.date.as_bytes();
            let date: [u8; 6] = date_bytes.try_into().map_err(|_| Error::BadDate)?;
            return Ok(Self {
                certs: decode_certs(env4.certs),
                date: Some(date),
                signature: env4.signature.as_bytes().to_vec(),
            });
        }
        let env3 = Envelope3::from_der(bytes).map_err(|_| Error::BadFormat)?;
        Ok(Self {
            certs: decode_certs(env3.certs),
            date: None,
            signature: env3.signature.as_bytes().to_vec(),
        })
    }

    /// The concatenation of every certificate's raw octets, as bound
    /// into the signed hash (§4.8).
    pub fn cert_chain_octets(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for cert in &self.certs {
            out.extend_from_slice(cert);
        }
        out
    }

    /// The date octets as bound into the signed hash, or an empty
    /// slice when the envelope carries none (the legacy shape).
    pub fn date_bytes(&self) -> [u8; 6] {
        self.date.unwrap_or([0u8; 6])
    }
}

fn encode_certs(certs: &[Vec<u8>]) -> Result<Vec<OctetString>, Error> {
    certs
        .iter()
        .map(|c| OctetString::new(c.clone()).map_err(|_| Error::BadFormat))
        .collect()
}

fn decode_certs(certs: Vec<OctetString>) -> Vec<Vec<u8>> {
    certs.into_iter().map(|c| c.as_bytes().to_vec()).collect()
}

/// Parses a DER `SEQUENCE` tag-and-length header from `head` (which
/// must start at the tag octet), returning the TLV's total length
/// (tag + length + content) if `head` carries enough of the header to
/// determine it.
fn der_sequence_total_len(head: &[u8]) -> Option<usize> {
    if head.len() < 2 || head[0] != 0x30 {
        return None;
    }
    let len_byte = head[1];
    if len_byte < 0x80 {
        Some(2 + usize::from(len_byte))
    } else {
        let num_len_octets = usize::from(len_byte & 0x7f);
        if num_len_octets == 0 || num_len_octets > 4 || head.len() < 2 + num_len_octets {
            return None;
        }
        let mut content_len: usize = 0;
        for &b in &head[2..2 + num_len_octets] {
            content_len = (content_len << 8) | usize::from(b);
        }
        Some(2 + num_len_octets + content_len)
    }
}

/// Locates a byte-reversed envelope appended to `file`'s tail: reads up
/// to 16 octets from the end, reverses them to read the `SEQUENCE`
/// header in its original orientation, and uses the decoded length to
/// find where the envelope begins. Returns `(start, len)`, the
/// envelope's byte range within `file` (still in reversed/on-disk
/// form).
pub fn locate(file: &[u8]) -> Result<(usize, usize), Error> {
    let probe_len = file.len().min(16);
    let mut probe = file[file.len() - probe_len..].to_vec();
    probe.reverse();
    let total_len = der_sequence_total_len(&probe).ok_or(Error::BadFormat)?;
    if total_len > file.len() {
        return Err(Error::BadFormat);
    }
    let start = file.len() - total_len;
    Ok((start, total_len))
}

/// Locates and decodes the envelope appended to `file`'s tail (§4.8).
/// Returns the decoded envelope together with the offset at which the
/// originally signed content ends.
pub fn locate_and_decode(file: &[u8]) -> Result<(Envelope, usize), Error> {
    let (start, len) = locate(file)?;
    let mut bytes = file[start..start + len].to_vec();
    bytes.reverse();
    let envelope = Envelope::from_der(&bytes)?;
    Ok((envelope, start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dated_envelope_round_trips_through_der() {
        let envelope = Envelope::new(
            alloc::vec![alloc::vec![0xCAu8; 10], alloc::vec![0xFEu8; 12]],
            [1, 2, 3, 4, 5, 6],
            alloc::vec![0x42u8; 48],
        );
        let der = envelope.to_der().expect("encodes");
        let decoded = Envelope::from_der(&der).expect("decodes");
        assert_eq!(decoded.certs, envelope.certs);
        assert_eq!(decoded.date, envelope.date);
        assert_eq!(decoded.signature, envelope.signature);
    }

    #[test]
    fn undated_legacy_envelope_decodes() {
        #[derive(Sequence)]
        struct Legacy {
            certs: Vec<OctetString>,
            signature: OctetString,
        }
        let legacy = Legacy {
            certs: alloc::vec![OctetString::new(alloc::vec![0xABu8; 6]).unwrap()],
            signature: OctetString::new(alloc::vec![0x55u8; 34]).unwrap(),
        };
        let der = legacy.to_der().expect("encodes");
        let decoded = Envelope::from_der(&der).expect("decodes");
        assert_eq!(decoded.date, None);
        assert_eq!(decoded.signature, alloc::vec![0x55u8; 34]);
    }

    #[test]
    fn locate_finds_a_reversed_envelope_appended_to_a_file() {
        let envelope = Envelope::new(
            alloc::vec![alloc::vec![0x11u8; 5]],
            [9, 8, 7, 6, 5, 4],
            alloc::vec![0x22u8; 34],
        );
        let reversed = envelope.to_reversed_bytes().expect("encodes");

        let mut file = alloc::vec![0xAAu8; 100];
        file.extend_from_slice(&reversed);

        let (decoded, signed_end) = locate_and_decode(&file).expect("locates");
        assert_eq!(signed_end, 100);
        assert_eq!(decoded.signature, alloc::vec![0x22u8; 34]);
        assert_eq!(decoded.date, Some([9, 8, 7, 6, 5, 4]));
    }
}
