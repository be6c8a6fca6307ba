//! `belt-pbkdf2`: PBKDF2 instantiated with HMAC-HBelt (§4.2 "PBKDF2" /
//! §4.7). STB 34.101.78 requires an iteration count of at least 10000;
//! this is enforced here rather than left to the caller.

use crate::BeltHmac;

/// Minimum iteration count STB 34.101.78 allows for password-based key
/// derivation.
pub const MIN_ITERATIONS: u32 = 10_000;

/// Errors from [`belt_pbkdf2`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// `iterations < MIN_ITERATIONS`.
    IterationCountTooLow,
}

/// Derive `out.len()` octets of key material from `(password, salt,
/// iterations)`.
pub fn belt_pbkdf2(password: &[u8], salt: &[u8], iterations: u32, out: &mut [u8]) -> Result<(), Error> {
    if iterations < MIN_ITERATIONS {
        return Err(Error::IterationCountTooLow);
    }

    let mut block_index: u32 = 1;
    let mut produced = 0;
    while produced < out.len() {
        let mut mac = BeltHmac::new(password);
        mac.update(salt);
        mac.update(&block_index.to_be_bytes());
        let mut u = mac.finalize();
        let mut t = u;

        for _ in 1..iterations {
            let mut mac = BeltHmac::new(password);
            mac.update(&u);
            u = mac.finalize();
            for (t_byte, u_byte) in t.iter_mut().zip(u.iter()) {
                *t_byte ^= u_byte;
            }
        }

        let take = (out.len() - produced).min(t.len());
        out[produced..produced + take].copy_from_slice(&t[..take]);
        produced += take;
        block_index += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_low_iteration_counts() {
        let mut out = [0u8; 32];
        assert_eq!(
            belt_pbkdf2(b"pwd", b"salt", 100, &mut out),
            Err(Error::IterationCountTooLow)
        );
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        belt_pbkdf2(b"zed", b"saltsalt", MIN_ITERATIONS, &mut a).unwrap();
        belt_pbkdf2(b"zed", b"saltsalt", MIN_ITERATIONS, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_passwords_diverge() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        belt_pbkdf2(b"zed", b"saltsalt", MIN_ITERATIONS, &mut a).unwrap();
        belt_pbkdf2(b"red", b"saltsalt", MIN_ITERATIONS, &mut b).unwrap();
        assert_ne!(a, b);
    }
}
