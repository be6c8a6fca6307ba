//! Expansion of 16/24/32-octet Belt keys to the 32-octet (8-word) form
//! the round function consumes.

use crate::block::{self, RoundKeys};
use crate::util::load_le_u32;

/// Errors produced while expanding a variable-length Belt key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidKeyLength;

impl core::fmt::Display for InvalidKeyLength {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "belt key must be 16, 24 or 32 octets")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidKeyLength {}

/// Expand a 16/24/32-octet key into the 32-octet form used internally.
///
/// 16-octet keys are duplicated; 24-octet keys are extended by running
/// one extra round of the block function keyed by the key itself
/// doubled up, per §4.1.
pub(crate) fn expand(key: &[u8]) -> Result<[u32; 8], InvalidKeyLength> {
    let mut expanded = [0u8; 32];
    match key.len() {
        32 => expanded.copy_from_slice(key),
        16 => {
            expanded[..16].copy_from_slice(key);
            expanded[16..].copy_from_slice(key);
        }
        24 => {
            expanded[..24].copy_from_slice(key);
            // Extend the remaining 8 octets by hashing the key through one
            // extra application of the round function, keyed by the key
            // doubled up to 32 octets (duplicating the first 8 octets).
            let mut scratch = [0u8; 32];
            scratch[..24].copy_from_slice(key);
            scratch[24..].copy_from_slice(&key[..8]);
            let scratch_words = words_from_bytes(&scratch);
            let keys = RoundKeys::new(scratch_words);
            let mut block = [0u32; 4];
            block::encrypt(&keys, &mut block);
            let tail = words_to_bytes(&block);
            expanded[24..].copy_from_slice(&tail[..8]);
        }
        _ => return Err(InvalidKeyLength),
    }
    Ok(words_from_bytes(&expanded))
}

fn words_from_bytes(bytes: &[u8; 32]) -> [u32; 8] {
    let mut out = [0u32; 8];
    for (word, chunk) in out.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = load_le_u32(chunk);
    }
    out
}

fn words_to_bytes(words: &[u32; 4]) -> [u8; 16] {
    let mut out = [0u8; 16];
    for (word, chunk) in words.iter().zip(out.chunks_exact_mut(4)) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_byte_key_is_duplicated() {
        let key = [0x11u8; 16];
        let expanded = expand(&key).unwrap();
        assert_eq!(expanded[0], expanded[4]);
        assert_eq!(expanded[3], expanded[7]);
    }

    #[test]
    fn rejects_bad_lengths() {
        assert_eq!(expand(&[0u8; 20]), Err(InvalidKeyLength));
    }
}
