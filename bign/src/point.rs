//! Jacobian short-Weierstrass point arithmetic and scalar
//! multiplication.
//!
//! `y^2 = x^3 + a*x + b (mod p)`. The base point is `(xG, yG)`, which
//! is `(0, yG)` for every level except `curve512v1` (§4.4, and see
//! `curve.rs`'s module docs for why that one level departs from the
//! convention).

use crate::curve::CurveParams;
use crate::fe::Elem;
use subtle::{Choice, ConditionallySelectable};

/// A point in Jacobian coordinates `(X : Y : Z)`, representing the
/// affine point `(X/Z^2, Y/Z^3)`. `Z = 0` is the point at infinity.
#[derive(Clone, Copy)]
pub(crate) struct Point<const N: usize> {
    pub(crate) x: Elem<N>,
    pub(crate) y: Elem<N>,
    pub(crate) z: Elem<N>,
}

impl<const N: usize> Point<N> {
    pub(crate) fn identity() -> Self {
        Self {
            x: Elem::one(),
            y: Elem::one(),
            z: Elem::ZERO,
        }
    }

    pub(crate) fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// The base point `G = (xG, yG)`.
    pub(crate) fn base(params: &CurveParams<N>) -> Self {
        Self {
            x: params.xg,
            y: params.yg,
            z: Elem::one(),
        }
    }

    /// Builds an affine point `(x, y)`, in Jacobian form with `Z = 1`.
    pub(crate) fn from_affine(x: Elem<N>, y: Elem<N>) -> Self {
        Self {
            x,
            y,
            z: Elem::one(),
        }
    }

    /// Converts to affine `(x, y)`; the caller must ensure `self` is
    /// not the point at infinity.
    pub(crate) fn to_affine(&self, p: &Elem<N>) -> (Elem<N>, Elem<N>) {
        let z_inv = self.z.inv_mod(p);
        let z_inv2 = z_inv.mul_mod(&z_inv, p);
        let z_inv3 = z_inv2.mul_mod(&z_inv, p);
        (self.x.mul_mod(&z_inv2, p), self.y.mul_mod(&z_inv3, p))
    }

    /// Whether `(x, y)` satisfies the curve equation.
    pub(crate) fn is_on_curve(x: &Elem<N>, y: &Elem<N>, params: &CurveParams<N>) -> Choice {
        let p = &params.p;
        let lhs = y.mul_mod(y, p);
        let x2 = x.mul_mod(x, p);
        let x3 = x2.mul_mod(x, p);
        let ax = params.a.mul_mod(x, p);
        let rhs = x3.add_mod(&ax, p).add_mod(&params.b, p);
        lhs.ge(&rhs) & rhs.ge(&lhs)
    }

    /// Point doubling, generic in the curve's `a` coefficient (no
    /// `a = -3` shortcut).
    pub(crate) fn double(&self, params: &CurveParams<N>) -> Self {
        let p = &params.p;
        let identity = Self::identity();
        let is_identity = self.is_identity();

        let xx = self.x.mul_mod(&self.x, p);
        let yy = self.y.mul_mod(&self.y, p);
        let yyyy = yy.mul_mod(&yy, p);
        let zz = self.z.mul_mod(&self.z, p);

        let s = {
            let sum = self.x.add_mod(&yy, p);
            let sum2 = sum.mul_mod(&sum, p);
            let t = sum2.sub_mod(&xx, p).sub_mod(&yyyy, p);
            t.add_mod(&t, p)
        };
        let m = {
            let three_xx = xx.add_mod(&xx, p).add_mod(&xx, p);
            let zz2 = zz.mul_mod(&zz, p);
            let a_zz2 = params.a.mul_mod(&zz2, p);
            three_xx.add_mod(&a_zz2, p)
        };
        let t = {
            let s2 = s.add_mod(&s, p);
            m.mul_mod(&m, p).sub_mod(&s2, p)
        };
        let y3 = {
            let s_minus_t = s.sub_mod(&t, p);
            let eight_yyyy = yyyy.add_mod(&yyyy, p).add_mod(&yyyy, p).add_mod(&yyyy, p);
            let eight_yyyy = eight_yyyy.add_mod(&eight_yyyy, p);
            m.mul_mod(&s_minus_t, p).sub_mod(&eight_yyyy, p)
        };
        let z3 = {
            let sum = self.y.add_mod(&self.z, p);
            let sum2 = sum.mul_mod(&sum, p);
            sum2.sub_mod(&yy, p).sub_mod(&zz, p)
        };

        let doubled = Self { x: t, y: y3, z: z3 };
        Self::conditional_select(&doubled, &identity, is_identity)
    }

    /// Point addition via the classic Jacobian formulas; returns
    /// `self` doubled when `self == rhs`, constant-time-selected.
    pub(crate) fn add(&self, rhs: &Self, params: &CurveParams<N>) -> Self {
        let p = &params.p;
        let self_is_identity = self.is_identity();
        let rhs_is_identity = rhs.is_identity();

        let z1z1 = self.z.mul_mod(&self.z, p);
        let z2z2 = rhs.z.mul_mod(&rhs.z, p);
        let u1 = self.x.mul_mod(&z2z2, p);
        let u2 = rhs.x.mul_mod(&z1z1, p);
        let s1 = self.y.mul_mod(&rhs.z, p).mul_mod(&z2z2, p);
        let s2 = rhs.y.mul_mod(&self.z, p).mul_mod(&z1z1, p);

        let h = u2.sub_mod(&u1, p);
        let r = s2.sub_mod(&s1, p);
        let is_same_point = h.is_zero() & r.is_zero();

        let hh = h.mul_mod(&h, p);
        let hhh = hh.mul_mod(&h, p);
        let v = u1.mul_mod(&hh, p);
        let x3 = {
            let r2 = r.mul_mod(&r, p);
            let v2 = v.add_mod(&v, p);
            r2.sub_mod(&hhh, p).sub_mod(&v2, p)
        };
        let y3 = {
            let v_minus_x3 = v.sub_mod(&x3, p);
            let s1_hhh = s1.mul_mod(&hhh, p);
            r.mul_mod(&v_minus_x3, p).sub_mod(&s1_hhh, p)
        };
        let z3 = self.z.mul_mod(&rhs.z, p).mul_mod(&h, p);

        let general = Self { x: x3, y: y3, z: z3 };
        let doubled = self.double(params);
        let result = Self::conditional_select(&general, &doubled, is_same_point);
        let result = Self::conditional_select(&result, self, rhs_is_identity);
        Self::conditional_select(&result, rhs, self_is_identity)
    }

    /// Scalar multiplication. Under the `safe-ct` feature, walks a
    /// fixed-width ladder that performs the same sequence of point
    /// operations regardless of the scalar's bits (double-then
    /// conditionally-add, the add always executed and its result
    /// selected via a constant-time mux) to avoid SPA leakage of a
    /// secret scalar. Without it, adds are skipped on zero bits.
    pub(crate) fn scalar_mul(&self, scalar: &Elem<N>, params: &CurveParams<N>) -> Self {
        let mut acc = Self::identity();
        for i in (0..N * 64).rev() {
            acc = acc.double(params);
            let bit = (scalar.0[i / 64] >> (i % 64)) & 1;
            if cfg!(feature = "safe-ct") {
                let with_add = acc.add(self, params);
                acc = Self::conditional_select(&acc, &with_add, Choice::from(bit as u8));
            } else if bit == 1 {
                acc = acc.add(self, params);
            }
        }
        acc
    }
}

impl<const N: usize> ConditionallySelectable for Point<N> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: Elem::conditional_select(&a.x, &b.x, choice),
            y: Elem::conditional_select(&a.y, &b.y, choice),
            z: Elem::conditional_select(&a.z, &b.z, choice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::curve256v1;

    #[test]
    fn base_point_is_on_curve() {
        let params = curve256v1();
        assert!(bool::from(Point::is_on_curve(&params.xg, &params.yg, &params)));
    }

    #[test]
    fn doubling_then_halving_distance_matches_scalar_mul() {
        let params = curve256v1();
        let g = Point::base(&params);
        let two = {
            let mut e = Elem::ZERO;
            e.0[0] = 2;
            e
        };
        let doubled = g.double(&params);
        let via_scalar = g.scalar_mul(&two, &params);
        let (dx, dy) = doubled.to_affine(&params.p);
        let (sx, sy) = via_scalar.to_affine(&params.p);
        assert_eq!(dx, sx);
        assert_eq!(dy, sy);
    }

    #[test]
    fn addition_with_identity_is_noop() {
        let params = curve256v1();
        let g = Point::base(&params);
        let id = Point::identity();
        let sum = g.add(&id, &params);
        let (gx, gy) = g.to_affine(&params.p);
        let (sx, sy) = sum.to_affine(&params.p);
        assert_eq!(gx, sx);
        assert_eq!(gy, sy);
    }

    #[test]
    fn scalar_mul_by_three_matches_add_of_double_and_base() {
        let params = curve256v1();
        let g = Point::base(&params);
        let three = {
            let mut e = Elem::ZERO;
            e.0[0] = 3;
            e
        };
        let via_scalar = g.scalar_mul(&three, &params);
        let via_add = g.double(&params).add(&g, &params);
        let (ax, ay) = via_scalar.to_affine(&params.p);
        let (bx, by) = via_add.to_affine(&params.p);
        assert_eq!(ax, bx);
        assert_eq!(ay, by);
    }
}
