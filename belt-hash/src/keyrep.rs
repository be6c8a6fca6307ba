//! `belt-keyrep` (KRP): subkey derivation from `(key, level, header)`
//! (§4.2 "KRP").

use crate::BeltHmac;

/// Derive a 16/24/32-octet subkey from `key`, a 12-octet level
/// descriptor and a 16-octet header, as used to separate Belt's various
/// ceremonies (MAC keys, wrap keys, ...) from a single master key.
///
/// `out.len()` must be 16, 24 or 32.
pub fn belt_keyrep(key: &[u8], level: &[u8; 12], header: &[u8; 16], out: &mut [u8]) {
    assert!(
        matches!(out.len(), 16 | 24 | 32),
        "belt-keyrep output must be 16, 24 or 32 octets"
    );

    let mut mac = BeltHmac::new(key);
    mac.update(level);
    mac.update(header);
    mac.update(&(out.len() as u32).to_le_bytes());

    let mut produced = 0;
    let mut counter = 0u32;
    while produced < out.len() {
        let mut round = mac.clone();
        round.update(&counter.to_le_bytes());
        let block = round.finalize();
        let take = (out.len() - produced).min(block.len());
        out[produced..produced + take].copy_from_slice(&block[..take]);
        produced += take;
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_requested_length() {
        let mut out32 = [0u8; 32];
        belt_keyrep(b"master", &[0u8; 12], &[0u8; 16], &mut out32);
        assert_ne!(out32, [0u8; 32]);

        let mut out16 = [0u8; 16];
        belt_keyrep(b"master", &[0u8; 12], &[0u8; 16], &mut out16);
        assert_ne!(out16, [0u8; 16]);
    }

    #[test]
    fn different_levels_diverge() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        belt_keyrep(b"master", b"level-one...", &[0u8; 16], &mut a);
        belt_keyrep(b"master", b"level-two...", &[0u8; 16], &mut b);
        assert_ne!(a, b);
    }
}
