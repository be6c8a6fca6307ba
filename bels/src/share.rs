//! `Share`, and the `split`/`recover` operations over it (§4.5).

use rand_core::CryptoRngCore;

use crate::gf256;
use crate::Error;

/// One share of a secret split by [`split`]: a 1-octet index in
/// `[1, 16]` (evaluated at the small integers `1..=16` themselves, a
/// substitute for the standard's own `α_i` generator table — see
/// [`crate::gf256`]'s module docs) followed by a secret-sized body.
#[derive(Clone, Copy)]
pub struct Share<const BODY: usize> {
    index: u8,
    body: [u8; BODY],
}

impl<const BODY: usize> Share<BODY> {
    /// Total wire length: the 1-octet index plus the body.
    pub const ENCODED_LEN: usize = BODY + 1;

    /// This share's index.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// The share body, without its index prefix.
    pub fn body(&self) -> &[u8; BODY] {
        &self.body
    }

    /// Encodes as `index || body` into `out`, which must be exactly
    /// [`Self::ENCODED_LEN`] octets.
    pub fn write_bytes(&self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), Self::ENCODED_LEN);
        out[0] = self.index;
        out[1..].copy_from_slice(&self.body);
    }

    /// Decodes `index || body`; `bytes` must be exactly
    /// [`Self::ENCODED_LEN`] octets and the index must lie in
    /// `[1, 16]`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != Self::ENCODED_LEN {
            return Err(Error::BadIndex);
        }
        let index = bytes[0];
        if !(1..=16).contains(&index) {
            return Err(Error::BadIndex);
        }
        let mut body = [0u8; BODY];
        body.copy_from_slice(&bytes[1..]);
        Ok(Self { index, body })
    }
}

#[cfg(feature = "zeroize")]
impl<const BODY: usize> Drop for Share<BODY> {
    fn drop(&mut self) {
        zeroize::Zeroize::zeroize(&mut self.body[..]);
    }
}

/// Splits `secret` into `out.len()` shares (`out.len()` must be at
/// most 16), any `k` of which reconstruct it via [`recover`]: samples
/// a random degree-`(k - 1)` polynomial `f` over `GF(2^8)` per byte
/// with `f(0)` equal to that byte of `secret`, and sets share `i`'s
/// body to `f(i)` for `i = 1..=out.len()`.
pub fn split<const BODY: usize>(
    secret: &[u8; BODY],
    k: u8,
    out: &mut [Share<BODY>],
    rng: &mut impl CryptoRngCore,
) -> Result<(), Error> {
    let n = out.len();
    if n == 0 || n > 16 || k < 2 || usize::from(k) > n {
        return Err(Error::BadThreshold);
    }

    // One length-k coefficient vector per secret byte: coeffs[byte][0]
    // is that byte of the secret, coeffs[byte][1..k] are random.
    let mut coeffs = [[0u8; 16]; BODY];
    for (byte_idx, secret_byte) in secret.iter().enumerate() {
        coeffs[byte_idx][0] = *secret_byte;
        rng.fill_bytes(&mut coeffs[byte_idx][1..usize::from(k)]);
    }

    for (slot, share) in out.iter_mut().enumerate() {
        let index = (slot + 1) as u8;
        let mut body = [0u8; BODY];
        for (byte_idx, out_byte) in body.iter_mut().enumerate() {
            *out_byte = eval_poly(&coeffs[byte_idx][..usize::from(k)], index);
        }
        *share = Share { index, body };
    }
    Ok(())
}

/// Horner's method evaluation of `f(x)` over `GF(2^8)`.
fn eval_poly(coeffs: &[u8], x: u8) -> u8 {
    let mut acc = 0u8;
    for coeff in coeffs.iter().rev() {
        acc = gf256::mul(acc, x) ^ coeff;
    }
    acc
}

/// Recovers the shared secret from `shares` (a `k`-subset, for
/// whatever `k` was used at [`split`] time) via Lagrange interpolation
/// at `x = 0`.
pub fn recover<const BODY: usize>(shares: &[Share<BODY>]) -> Result<[u8; BODY], Error> {
    if shares.len() < 2 {
        return Err(Error::NotEnoughShares);
    }
    for (i, a) in shares.iter().enumerate() {
        if !(1..=16).contains(&a.index) {
            return Err(Error::BadIndex);
        }
        for b in &shares[i + 1..] {
            if a.index == b.index {
                return Err(Error::DuplicateIndex);
            }
        }
    }

    // The Lagrange basis coefficient for share `i`, evaluated at
    // x = 0, doesn't depend on which byte of the body is being
    // interpolated, so it's computed once and reused across bytes.
    // At x = 0: L_i = product_{j != i} x_j / (x_j - x_i), and GF(2^8)
    // subtraction is XOR.
    let mut basis = [0u8; 16];
    for (i, share_i) in shares.iter().enumerate() {
        let mut numerator = 1u8;
        let mut denominator = 1u8;
        for (j, share_j) in shares.iter().enumerate() {
            if i == j {
                continue;
            }
            numerator = gf256::mul(numerator, share_j.index);
            denominator = gf256::mul(denominator, share_j.index ^ share_i.index);
        }
        basis[i] = gf256::mul(numerator, gf256::inv(denominator));
    }

    let mut out = [0u8; BODY];
    for byte_idx in 0..BODY {
        let mut acc = 0u8;
        for (i, share_i) in shares.iter().enumerate() {
            acc ^= gf256::mul(basis[i], share_i.body[byte_idx]);
        }
        out[byte_idx] = acc;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingRng(u64);

    impl rand_core::RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }
        fn next_u64(&mut self) -> u64 {
            self.0 = self.0.wrapping_add(0x9e3779b97f4a7c15);
            self.0
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            rand_core::impls::fill_bytes_via_next(self, dst);
        }
        fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dst);
            Ok(())
        }
    }

    impl rand_core::CryptoRng for CountingRng {}

    fn blank_share<const BODY: usize>() -> Share<BODY> {
        Share {
            index: 0,
            body: [0u8; BODY],
        }
    }

    #[test]
    fn split_then_recover_with_exactly_k_shares() {
        let secret = [0x42u8; 16];
        let mut shares = [blank_share::<16>(); 5];
        let mut rng = CountingRng(1);
        split(&secret, 3, &mut shares, &mut rng).expect("splits");

        let subset = [shares[0], shares[2], shares[4]];
        let recovered = recover(&subset).expect("recovers");
        assert_eq!(recovered, secret);
    }

    #[test]
    fn any_k_subset_recovers_the_same_secret() {
        let secret = [0x99u8; 24];
        let mut shares = [blank_share::<24>(); 6];
        let mut rng = CountingRng(7);
        split(&secret, 4, &mut shares, &mut rng).expect("splits");

        let subset_a = [shares[0], shares[1], shares[2], shares[3]];
        let subset_b = [shares[2], shares[3], shares[4], shares[5]];
        assert_eq!(recover(&subset_a).unwrap(), secret);
        assert_eq!(recover(&subset_b).unwrap(), secret);
    }

    #[test]
    fn duplicate_index_is_rejected() {
        let mut a = blank_share::<16>();
        a.index = 1;
        let mut b = blank_share::<16>();
        b.index = 1;
        assert_eq!(recover(&[a, b]), Err(Error::DuplicateIndex));
    }

    #[test]
    fn fewer_than_two_shares_is_rejected() {
        let mut a = blank_share::<16>();
        a.index = 1;
        assert_eq!(recover(&[a]), Err(Error::NotEnoughShares));
    }

    #[test]
    fn share_byte_round_trip() {
        let mut share = blank_share::<32>();
        share.index = 5;
        share.body = [0xabu8; 32];
        let mut bytes = [0u8; 33];
        share.write_bytes(&mut bytes);
        let decoded = Share::<32>::from_bytes(&bytes).expect("decodes");
        assert_eq!(decoded.index(), 5);
        assert_eq!(decoded.body(), &[0xabu8; 32]);
    }
}
