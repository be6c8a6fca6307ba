//! Fixed-width arithmetic shared by field elements and scalars, over
//! the four Bign curve sizes (192/256/384/512-bit).

use subtle::{Choice, ConditionallySelectable};

/// An unsigned `N`-limb (64-bit limbs, little-endian) big integer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Elem<const N: usize>(pub [u64; N]);

impl<const N: usize> Elem<N> {
    pub(crate) const ZERO: Self = Self([0u64; N]);

    pub(crate) fn one() -> Self {
        let mut out = Self::ZERO;
        out.0[0] = 1;
        out
    }

    /// Parses a big-endian octet string of exactly `N * 8` bytes.
    pub(crate) fn from_be_bytes(bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len(), N * 8);
        let mut limbs = [0u64; N];
        for (i, chunk) in bytes.rchunks(8).enumerate() {
            let mut word = [0u8; 8];
            word[8 - chunk.len()..].copy_from_slice(chunk);
            limbs[i] = u64::from_be_bytes(word);
        }
        Self(limbs)
    }

    /// Writes `self` as a big-endian octet string into `out` (`N * 8` bytes).
    pub(crate) fn to_be_bytes(&self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), N * 8);
        let len = out.len();
        for (i, word) in self.0.iter().enumerate() {
            let start = len - (i + 1) * 8;
            out[start..start + 8].copy_from_slice(&word.to_be_bytes());
        }
    }

    /// Parses a little-endian octet string (Bign private keys, §4.4,
    /// are stored this way).
    pub(crate) fn from_le_bytes(bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len(), N * 8);
        let mut limbs = [0u64; N];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            limbs[i] = u64::from_le_bytes(word);
        }
        Self(limbs)
    }

    /// Writes `self` as a little-endian octet string into `out` (`N * 8` bytes).
    pub(crate) fn to_le_bytes(&self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), N * 8);
        for (i, word) in self.0.iter().enumerate() {
            out[i * 8..i * 8 + 8].copy_from_slice(&word.to_le_bytes());
        }
    }

    pub(crate) fn is_zero(&self) -> Choice {
        let acc = self.0.iter().fold(0u64, |acc, limb| acc | limb);
        Choice::from((acc == 0) as u8)
    }

    fn raw_add(&self, rhs: &Self) -> (Self, u64) {
        let mut out = [0u64; N];
        let mut carry = 0u64;
        for i in 0..N {
            let (s1, c1) = self.0[i].overflowing_add(rhs.0[i]);
            let (s2, c2) = s1.overflowing_add(carry);
            out[i] = s2;
            carry = (c1 as u64) + (c2 as u64);
        }
        (Self(out), carry)
    }

    fn raw_sub(&self, rhs: &Self) -> (Self, u64) {
        let mut out = [0u64; N];
        let mut borrow = 0u64;
        for i in 0..N {
            let (d1, b1) = self.0[i].overflowing_sub(rhs.0[i]);
            let (d2, b2) = d1.overflowing_sub(borrow);
            out[i] = d2;
            borrow = (b1 as u64) + (b2 as u64);
        }
        (Self(out), borrow)
    }

    /// `self >= rhs`, in constant time.
    pub(crate) fn ge(&self, rhs: &Self) -> Choice {
        let (_, borrow) = self.raw_sub(rhs);
        Choice::from((borrow == 0) as u8)
    }

    fn shl1_or(&self, bit: u64) -> (Self, u64) {
        let mut out = [0u64; N];
        let mut carry = bit;
        for i in 0..N {
            let dropped = self.0[i] >> 63;
            out[i] = (self.0[i] << 1) | carry;
            carry = dropped;
        }
        (Self(out), carry)
    }

    /// `self mod m`, by binary long division. Correct regardless of how
    /// much larger than `m` the dividend is, rather than only when it's
    /// less than twice `m` (the case a single conditional subtraction
    /// would handle) — needed when reducing a product mod a group
    /// order that's nearly as wide as the field it's computed in.
    pub(crate) fn rem(&self, m: &Self) -> Self {
        let mut r = Self::ZERO;
        for i in (0..N * 64).rev() {
            let bit = (self.0[i / 64] >> (i % 64)) & 1;
            let (shifted, dropped) = r.shl1_or(bit);
            let (diff, borrow) = shifted.raw_sub(m);
            let always_sub = Choice::from((dropped != 0) as u8);
            let ge_case = Choice::from((borrow == 0) as u8) & !always_sub;
            let apply = always_sub | ge_case;
            r = Self::conditional_select(&shifted, &diff, apply);
        }
        r
    }

    pub(crate) fn add_mod(&self, rhs: &Self, p: &Self) -> Self {
        let (sum, carry) = self.raw_add(rhs);
        let (reduced, borrow) = sum.raw_sub(p);
        let need_reduce = Choice::from((carry != 0) as u8) | Choice::from((borrow == 0) as u8);
        Self::conditional_select(&sum, &reduced, need_reduce)
    }

    pub(crate) fn sub_mod(&self, rhs: &Self, p: &Self) -> Self {
        let (diff, borrow) = self.raw_sub(rhs);
        let (restored, _) = diff.raw_add(p);
        Self::conditional_select(&diff, &restored, Choice::from((borrow != 0) as u8))
    }

    pub(crate) fn neg_mod(&self, p: &Self) -> Self {
        Self::ZERO.sub_mod(self, p)
    }

    /// Double-and-add modular multiplication, branch-free in the
    /// per-bit accumulation.
    pub(crate) fn mul_mod(&self, rhs: &Self, p: &Self) -> Self {
        let mut acc = Self::ZERO;
        for i in (0..N * 64).rev() {
            acc = acc.add_mod(&acc, p);
            let bit = (rhs.0[i / 64] >> (i % 64)) & 1;
            let with_add = acc.add_mod(self, p);
            acc = Self::conditional_select(&acc, &with_add, Choice::from(bit as u8));
        }
        acc
    }

    /// Square-and-multiply modular exponentiation, used for Fermat
    /// inversion and the `p ≡ 3 (mod 4)` square root.
    pub(crate) fn pow_mod(&self, exponent: &Self, p: &Self) -> Self {
        let mut acc = Self::one();
        for i in (0..N * 64).rev() {
            acc = acc.mul_mod(&acc, p);
            let bit = (exponent.0[i / 64] >> (i % 64)) & 1;
            let with_mul = acc.mul_mod(self, p);
            acc = Self::conditional_select(&acc, &with_mul, Choice::from(bit as u8));
        }
        acc
    }

    /// `self^-1 mod p` via Fermat's little theorem; `p` must be prime.
    pub(crate) fn inv_mod(&self, p: &Self) -> Self {
        let mut two = Self::ZERO;
        two.0[0] = 2;
        let exponent = p.sub_mod(&two, p);
        self.pow_mod(&exponent, p)
    }

    /// `sqrt(self) mod p` assuming `p ≡ 3 (mod 4)`; returns an
    /// arbitrary value if `self` is not a quadratic residue (callers
    /// must verify by squaring).
    pub(crate) fn sqrt_mod(&self, p: &Self) -> Self {
        // (p + 1) / 4, as a plain integer (not reduced mod p): p ≡ 3
        // (mod 4) makes p + 1 divisible by 4, so repeated halving exactly
        // computes the quotient.
        let (p_plus_one, _) = p.raw_add(&Self::one());
        let exponent = p_plus_one.shr1().shr1();
        self.pow_mod(&exponent, p)
    }

    fn shr1(&self) -> Self {
        let mut out = [0u64; N];
        let mut carry = 0u64;
        for i in (0..N).rev() {
            out[i] = (self.0[i] >> 1) | (carry << 63);
            carry = self.0[i] & 1;
        }
        Self(out)
    }
}

impl<const N: usize> ConditionallySelectable for Elem<N> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = [0u64; N];
        let mask = 0u64.wrapping_sub(choice.unwrap_u8() as u64);
        for i in 0..N {
            out[i] = a.0[i] ^ (mask & (a.0[i] ^ b.0[i]));
        }
        Self(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type E = Elem<4>;

    fn from_u64(v: u64) -> E {
        let mut e = E::ZERO;
        e.0[0] = v;
        e
    }

    #[test]
    fn add_mod_wraps_at_modulus() {
        let p = from_u64(17);
        let a = from_u64(10);
        let b = from_u64(12);
        assert_eq!(a.add_mod(&b, &p), from_u64(5));
    }

    #[test]
    fn sub_mod_wraps_below_zero() {
        let p = from_u64(17);
        let a = from_u64(3);
        let b = from_u64(10);
        assert_eq!(a.sub_mod(&b, &p), from_u64(10));
    }

    #[test]
    fn mul_mod_matches_schoolbook() {
        let p = from_u64(101);
        let a = from_u64(37);
        let b = from_u64(54);
        assert_eq!(a.mul_mod(&b, &p), from_u64((37 * 54) % 101));
    }

    #[test]
    fn inv_mod_round_trips() {
        let p = from_u64(101);
        let a = from_u64(37);
        let inv = a.inv_mod(&p);
        assert_eq!(a.mul_mod(&inv, &p), from_u64(1));
    }

    #[test]
    fn rem_reduces_values_far_larger_than_the_modulus() {
        // self = 2^192, which uses the top limb of a 4-limb element and
        // is nowhere near `2 * m`.
        let mut self_val = E::ZERO;
        self_val.0[3] = 1;
        let m = from_u64(101);
        assert_eq!(self_val.rem(&m), from_u64(58));
    }

    #[test]
    fn rem_is_a_noop_below_the_modulus() {
        let m = from_u64(101);
        let a = from_u64(37);
        assert_eq!(a.rem(&m), a);
    }

    #[test]
    fn be_byte_round_trip() {
        let bytes = [0x11u8; 32];
        let e = E::from_be_bytes(&bytes);
        let mut out = [0u8; 32];
        e.to_be_bytes(&mut out);
        assert_eq!(out, bytes);
    }
}
