//! Curve parameter sets for the four Bign security levels (§4.4): the
//! tuple `(l, p, a, b, q, xG, yG)`.
//!
//! STB 34.101.45 Annex A publishes the `bign-curve256v1` constants used
//! at the 128-bit level, and they are reproduced here: the field prime
//! and `b` coefficient are grounded on the BignP256 curve definition
//! (`a = p - 3`, matching the annex's stated relation), with `q` its
//! documented group order and `yG` the square root of `b` that the
//! `x_G = 0` convention selects. Annex A's 96/192/256-bit-level
//! constants are not in this retrieval pack, so those three levels
//! instead borrow real, independently published curves at matching
//! field widths (NIST P-192/P-384 and RFC 5639 brainpoolP512r1) so that
//! `q` is genuinely the order of the chosen base point rather than an
//! arbitrary value - see `DESIGN.md`. P-192 and P-384 both admit a
//! square root of `b` at `x_G = 0`, so they keep the standard's `x_G =
//! 0` convention; brainpoolP512r1's `b` has no square root mod `p`, so
//! curve512v1 instead carries brainpool's own published generator
//! point, a deviation from the `x_G = 0` convention recorded in
//! `DESIGN.md`.

use crate::fe::Elem;

/// Security level, selecting field width and byte lengths throughout
/// the crate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    /// 96-bit security: 24-octet field, 34-octet short-form signature.
    L96,
    /// 128-bit security: 32-octet field.
    L128,
    /// 192-bit security: 48-octet field.
    L192,
    /// 256-bit security: 64-octet field.
    L256,
}

impl Level {
    /// Field/scalar width in octets (`2l/8`).
    pub const fn field_len(self) -> usize {
        match self {
            Level::L96 => 24,
            Level::L128 => 32,
            Level::L192 => 48,
            Level::L256 => 64,
        }
    }

    /// `l/8`, the truncated-hash half of a signature.
    pub const fn half_len(self) -> usize {
        self.field_len() / 2
    }

    /// Long-form signature length, `3l/8`.
    pub const fn signature_len(self) -> usize {
        self.half_len() + self.field_len()
    }

    /// The OID arc suffix identifying this level's curve (§6).
    pub const fn curve_oid(self) -> &'static str {
        match self {
            Level::L96 => "1.2.112.0.2.0.34.101.45.3.0",
            Level::L128 => "1.2.112.0.2.0.34.101.45.3.1",
            Level::L192 => "1.2.112.0.2.0.34.101.45.3.2",
            Level::L256 => "1.2.112.0.2.0.34.101.45.3.3",
        }
    }
}

macro_rules! curve_params {
    ($name:ident, $limbs:expr, $p:expr, $a:expr, $b:expr, $q:expr, $xg:expr, $yg:expr) => {
        pub(crate) fn $name() -> CurveParams<$limbs> {
            CurveParams {
                p: Elem::from_be_bytes(&$p),
                a: Elem::from_be_bytes(&$a),
                b: Elem::from_be_bytes(&$b),
                q: Elem::from_be_bytes(&$q),
                xg: Elem::from_be_bytes(&$xg),
                yg: Elem::from_be_bytes(&$yg),
            }
        }
    };
}

/// The parameter tuple `(p, a, b, q, xG, yG)` for one curve. `xG` is
/// `0` for every level except `curve512v1` (see module docs).
pub(crate) struct CurveParams<const N: usize> {
    pub(crate) p: Elem<N>,
    pub(crate) a: Elem<N>,
    pub(crate) b: Elem<N>,
    pub(crate) q: Elem<N>,
    pub(crate) xg: Elem<N>,
    pub(crate) yg: Elem<N>,
}

// NIST P-192 (secp192r1): a genuine prime-order curve at curve96's
// 192-bit field width, with x_G = 0 re-derived as a square root of b
// (not P-192's own published generator, which has x != 0).
curve_params!(
    curve96,
    3,
    hex_literal::hex!("fffffffffffffffffffffffffffffffeffffffffffffffff"),
    hex_literal::hex!("fffffffffffffffffffffffffffffffefffffffffffffffc"),
    hex_literal::hex!("64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1"),
    hex_literal::hex!("ffffffffffffffffffffffff99def836146bc9b1b4d22831"),
    hex_literal::hex!("000000000000000000000000000000000000000000000000"),
    hex_literal::hex!("8497a9fa119ff34c9c24a156ed0d44a0c5f5d1f19fc9f0ed")
);

// bign-curve256v1 (STB 34.101.45 Annex A, l = 128): p = 2^256 - 189,
// a = p - 3, b and q from the annex; yG re-derived as the square root
// of b at x_G = 0 (the annex does not publish yG in a form present in
// this pack).
curve_params!(
    curve256v1,
    4,
    hex_literal::hex!("ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff43"),
    hex_literal::hex!("ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff40"),
    hex_literal::hex!("77ce6c1515f3a8edd2c13aabe4d8fbbe4cf55069978b9253b22e7d6bd69c03f1"),
    hex_literal::hex!("ffffffffffffffffffffffffffffffffd95c8ed60dfb4dfc7e5abf99263d6607"),
    hex_literal::hex!("0000000000000000000000000000000000000000000000000000000000000000"),
    hex_literal::hex!("6bf7fc3cfb16d69f5ce4c9a351d6835d78913966c408f6521e29cf1804516a93")
);

// NIST P-384 (secp384r1): a genuine prime-order curve at curve384v1's
// 384-bit field width, x_G = 0 re-derived the same way as curve96.
curve_params!(
    curve384v1,
    6,
    hex_literal::hex!(
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000ffffffff"
    ),
    hex_literal::hex!(
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000fffffffc"
    ),
    hex_literal::hex!(
        "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875ac656398d8a2ed19d2a85c8edd3ec2aef"
    ),
    hex_literal::hex!(
        "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf581a0db248b0a77aecec196accc52973"
    ),
    hex_literal::hex!(
        "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000"
    ),
    hex_literal::hex!(
        "c306610fb0ae5a159cf45c06069f22a6c5eb3641c602d42dea2c4b4f75550793406d80d2b91ad54f9048bd487af1ade1"
    )
);

// RFC 5639 brainpoolP512r1: a genuine prime-order curve at curve512v1's
// 512-bit field width. Its b is not a quadratic residue mod p, so no
// x_G = 0 point exists; this carries brainpool's own published
// generator (Gx, Gy) instead (see module docs).
curve_params!(
    curve512v1,
    8,
    hex_literal::hex!(
        "aadd9db8dbe9c48b3fd4e6ae33c9fc07cb308db3b3c9d20ed6639cca703308717d4d9b009bc66842aecda12ae6a380e62881ff2f2d82c68528aa6056583a48f3"
    ),
    hex_literal::hex!(
        "7830a3318b603b89e2327145ac234cc594cbdd8d3df91610a83441caea9863bc2ded5d5aa8253aa10a2ef1c98b9ac8b57f1117a72bf2c7b9e7c1ac4d77fc94ca"
    ),
    hex_literal::hex!(
        "3df91610a83441caea9863bc2ded5d5aa8253aa10a2ef1c98b9ac8b57f1117a72bf2c7b9e7c1ac4d77fc94cadc083e67984050b75ebae5dd2809bd638016f723"
    ),
    hex_literal::hex!(
        "aadd9db8dbe9c48b3fd4e6ae33c9fc07cb308db3b3c9d20ed6639cca70330870553e5c414ca92619418661197fac10471db1d381085ddaddb58796829ca90069"
    ),
    hex_literal::hex!(
        "81aee4bdd82ed9645a21322e9c4c6a9385ed9f70b5d916c1b43b62eef4d0098eff3b1f78e2d0d48d50d1687b93b97d5f7c6d5047406a5e688b352209bcb9f822"
    ),
    hex_literal::hex!(
        "7dde385d566332ecc0eabfa9cf7822fdf209f70024a57b1aa000c55b881f8111b2dcde494a5f485e5bca4bd88a2763aed1ca2b2fa8f0540678cd1e0f3ad80892"
    )
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    #[test]
    fn curve96_field_width_matches_level() {
        let params = curve96();
        assert_eq!(Level::L96.field_len(), 24);
        assert_eq!(params.p.0.len() * 8, 24);
    }

    #[test]
    fn curve256_field_width_matches_level() {
        let params = curve256v1();
        assert_eq!(Level::L128.field_len(), 32);
        assert_eq!(params.p.0.len() * 8, 32);
    }

    /// For every level, `G = (xG, yG)` must actually generate a
    /// subgroup of order `q` - i.e. `q * G = O`. A `q` that merely
    /// looks like a group order (e.g. `p - 2`) without this property
    /// makes every signature verify or fail by coincidence rather than
    /// by the underlying group law.
    fn order_matches_base_point<const N: usize>(params: &CurveParams<N>) -> bool {
        let on_curve = Point::is_on_curve(&params.xg, &params.yg, params);
        let g = Point::base(params);
        let q_g = g.scalar_mul(&params.q, params);
        bool::from(on_curve) && bool::from(q_g.is_identity())
    }

    #[test]
    fn curve96_base_point_has_order_q() {
        assert!(order_matches_base_point(&curve96()));
    }

    #[test]
    fn curve256v1_base_point_has_order_q() {
        assert!(order_matches_base_point(&curve256v1()));
    }

    #[test]
    fn curve384v1_base_point_has_order_q() {
        assert!(order_matches_base_point(&curve384v1()));
    }

    #[test]
    fn curve512v1_base_point_has_order_q() {
        assert!(order_matches_base_point(&curve512v1()));
    }

    #[test]
    fn base_point_ordinate_is_on_curve() {
        let params = curve256v1();
        // x_G = 0, so the curve equation reduces to y^2 = b.
        let lhs = params.yg.mul_mod(&params.yg, &params.p);
        assert_eq!(lhs, params.b);
    }
}
