//! Constant-time comparisons against the field modulus (STB 34.101.45
//! Appendix G step 4.6: `k` must land in `{1, ..., q-1}`).

use subtle::{Choice, ConstantTimeEq};

/// `true` iff every octet of `x` is zero.
pub(crate) fn is_zero(x: &[u8]) -> Choice {
    x.iter().fold(Choice::from(1u8), |acc, &b| acc & b.ct_eq(&0))
}

/// `true` iff `x < y` as big-endian unsigned integers of equal length.
///
/// Scans every octet pair regardless of where the first difference is
/// found, so the comparison does not branch on secret data.
pub(crate) fn lt(x: &[u8], y: &[u8]) -> Choice {
    debug_assert_eq!(x.len(), y.len());
    let mut lt = Choice::from(0u8);
    let mut eq_so_far = Choice::from(1u8);
    for (&a, &b) in x.iter().zip(y.iter()) {
        let byte_lt = Choice::from((a < b) as u8);
        let byte_eq = a.ct_eq(&b);
        lt |= eq_so_far & byte_lt;
        eq_so_far &= byte_eq;
    }
    lt
}
