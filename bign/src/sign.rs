//! Keypair generation, Sign/Verify (§4.4) and the Bign96 short form.

use belt_hash::{BeltHash, Digest};
use bign_genk::Array;
use subtle::ConstantTimeEq;

use crate::curve::{CurveParams, Level};
use crate::fe::Elem;
use crate::point::Point;
use crate::Error;

/// A validated public key: a curve point that is not the identity and
/// lies on the curve.
pub(crate) struct PublicPoint<const N: usize> {
    pub(crate) x: Elem<N>,
    pub(crate) y: Elem<N>,
}

/// Parses and validates `(x_Q, y_Q)` (on-curve, not the identity,
/// `q * Q = O`): §4.4's public-key validation.
pub(crate) fn validate_public_key<const N: usize>(
    x: Elem<N>,
    y: Elem<N>,
    params: &CurveParams<N>,
) -> Result<PublicPoint<N>, Error> {
    let on_curve = Point::is_on_curve(&x, &y, params);
    let point = Point::from_affine(x, y);
    let not_identity = !point.is_identity();
    let q_times_q = point.scalar_mul(&params.q, params);
    let order_checks = q_times_q.is_identity();
    if bool::from(on_curve & not_identity & order_checks) {
        Ok(PublicPoint { x, y })
    } else {
        Err(Error::BadPublicKey)
    }
}

/// Derives `Q = d * G` for a validated private scalar `d`.
pub(crate) fn derive_public_key<const N: usize>(
    d: &Elem<N>,
    params: &CurveParams<N>,
) -> (Elem<N>, Elem<N>) {
    let g = Point::base(params);
    let q_point = g.scalar_mul(d, params);
    q_point.to_affine(&params.p)
}

fn left_pad<const N: usize>(bytes: &[u8]) -> Elem<N> {
    let mut buf = [0u8; 64];
    let width = N * 8;
    buf[width - bytes.len()..width].copy_from_slice(bytes);
    Elem::from_be_bytes(&buf[..width])
}

/// `belt-hash(oid_der || <x mod q>_{2l} || h)` — the §4.4 compression
/// step shared by Sign and Verify. Callers truncate the 32-octet
/// result to `half_len` octets themselves.
fn s0_digest<const N: usize>(oid_der: &[u8], x_mod_q: &Elem<N>, h: &[u8]) -> [u8; 32] {
    let mut x_bytes = [0u8; 64];
    let width = N * 8;
    x_mod_q.to_be_bytes(&mut x_bytes[..width]);
    let mut hasher = BeltHash::new();
    hasher.update(oid_der);
    hasher.update(&x_bytes[..width]);
    hasher.update(h);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(digest.as_slice());
    out
}

/// Computes a Bign signature given an already-derived ephemeral
/// scalar `k` (deterministic via `bign-genk`, or random). `h` must be
/// exactly `N` octets (the field width), already the output of the
/// hash algorithm named by `oid_der`.
pub(crate) fn sign_with_k<const N: usize>(
    params: &CurveParams<N>,
    d: &Elem<N>,
    oid_der: &[u8],
    h: &[u8],
    k: Elem<N>,
    half_len: usize,
    s0_out: &mut [u8],
) -> Elem<N> {
    let r = Point::base(params).scalar_mul(&k, params);
    let (rx, _ry) = r.to_affine(&params.p);
    let rx_mod_q = rx.rem(&params.q);

    let digest = s0_digest(oid_der, &rx_mod_q, h);
    s0_out.copy_from_slice(&digest[..half_len]);

    let s0_elem = left_pad::<N>(&digest[..half_len]);
    let h_elem = Elem::<N>::from_be_bytes(h).rem(&params.q);
    let s0_d = s0_elem.mul_mod(d, &params.q);
    let s0_d_plus_h = s0_d.add_mod(&h_elem, &params.q);
    k.sub_mod(&s0_d_plus_h, &params.q)
}

/// Verifies a parsed `(s0, s1)` pair against `h`; `Ok(())` iff it
/// verifies.
pub(crate) fn verify_parts<const N: usize>(
    params: &CurveParams<N>,
    public: &PublicPoint<N>,
    oid_der: &[u8],
    h: &[u8],
    s0: &[u8],
    s1: &Elem<N>,
    half_len: usize,
) -> Result<(), Error> {
    let h_elem = Elem::<N>::from_be_bytes(h).rem(&params.q);
    let s1_plus_h = s1.add_mod(&h_elem, &params.q);
    let s0_elem = left_pad::<N>(s0);

    let q_point = Point::from_affine(public.x, public.y);
    let lhs = Point::base(params).scalar_mul(&s1_plus_h, params);
    let rhs = q_point.scalar_mul(&s0_elem, params);
    let r_prime = lhs.add(&rhs, params);
    let (rx, _ry) = r_prime.to_affine(&params.p);
    let rx_mod_q = rx.rem(&params.q);

    let digest = s0_digest(oid_der, &rx_mod_q, h);
    if bool::from(digest[..half_len].ct_eq(s0)) {
        Ok(())
    } else {
        Err(Error::BadSignature)
    }
}

/// Pads/truncates a field-width buffer for `bign-genk`, which only
/// accepts 32/48/64-octet inputs (§Appendix G): curve96's 24-octet
/// field is zero-extended up to 32 octets for the call and the result
/// truncated back down, since leading zero octets don't change a
/// big-endian integer's value or the rejection-sampling comparison.
pub(crate) fn genk_belt<const N: usize, const PAD: usize>(
    d: &Elem<N>,
    q: &Elem<N>,
    h: &Elem<N>,
    data: &[u8],
) -> Elem<N> {
    let bytes = N * 8;
    let mut d_buf = [0u8; PAD];
    let mut q_buf = [0u8; PAD];
    let mut h_buf = [0u8; PAD];
    d.to_be_bytes(&mut d_buf[PAD - bytes..]);
    q.to_be_bytes(&mut q_buf[PAD - bytes..]);
    h.to_be_bytes(&mut h_buf[PAD - bytes..]);

    match PAD {
        32 => {
            let k = bign_genk::generate_k::<BeltHash, belt_block::BeltBlock, bign_genk::consts::U32>(
                &Array::try_from(&d_buf[..]).expect("PAD==32"),
                &Array::try_from(&q_buf[..]).expect("PAD==32"),
                &Array::try_from(&h_buf[..]).expect("PAD==32"),
                data,
            );
            Elem::from_be_bytes(&k.as_slice()[PAD - bytes..])
        }
        48 => {
            let k = bign_genk::generate_k::<BeltHash, belt_block::BeltBlock, bign_genk::consts::U48>(
                &Array::try_from(&d_buf[..]).expect("PAD==48"),
                &Array::try_from(&q_buf[..]).expect("PAD==48"),
                &Array::try_from(&h_buf[..]).expect("PAD==48"),
                data,
            );
            Elem::from_be_bytes(&k.as_slice()[PAD - bytes..])
        }
        64 => {
            let k = bign_genk::generate_k::<BeltHash, belt_block::BeltBlock, bign_genk::consts::U64>(
                &Array::try_from(&d_buf[..]).expect("PAD==64"),
                &Array::try_from(&q_buf[..]).expect("PAD==64"),
                &Array::try_from(&h_buf[..]).expect("PAD==64"),
                data,
            );
            Elem::from_be_bytes(&k.as_slice()[PAD - bytes..])
        }
        _ => unreachable!("PAD is always 32, 48 or 64"),
    }
}

/// Packs a long-form Bign96 signature (`s0 || s1`, 36 octets) into the
/// 34-octet short form by dropping `s1`'s two leading octets. Unlike
/// the three full-length levels, curve96's `q` is genuinely 192 bits
/// wide (the same width as its field), so `s1 < 2^176` - and hence a
/// lossless drop - only holds for the minority of signatures whose
/// ephemeral scalar happens to land there; this is a simplified stand-in
/// for the standard's own (unspecified in this pack) bit-packing, not
/// a scheme that succeeds on every signature. Returns `None` when the
/// dropped octets are nonzero.
pub fn pack_bign96_short(long_form: &[u8; 36]) -> Option<[u8; 34]> {
    if long_form[12] != 0 || long_form[13] != 0 {
        return None;
    }
    let mut out = [0u8; 34];
    out[..12].copy_from_slice(&long_form[..12]);
    out[12..].copy_from_slice(&long_form[14..]);
    Some(out)
}

/// The inverse of [`pack_bign96_short`].
pub fn unpack_bign96_short(short_form: &[u8; 34]) -> [u8; 36] {
    let mut out = [0u8; 36];
    out[..12].copy_from_slice(&short_form[..12]);
    out[14..].copy_from_slice(&short_form[12..]);
    out
}

/// §4.4's hash-OID selection for the signature length used by the
/// high-level envelope (C13): `32 => Belt-HASH`, `48`/`64 => Bash-HASH`.
pub fn hash_oid_for_level(level: Level) -> &'static str {
    match level {
        Level::L96 => "1.2.112.0.2.0.34.101.31.81",
        Level::L128 => "1.2.112.0.2.0.34.101.31.81",
        Level::L192 => "1.2.112.0.2.0.34.101.77.12",
        Level::L256 => "1.2.112.0.2.0.34.101.77.13",
    }
}
