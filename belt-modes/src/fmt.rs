//! FMT: format-preserving encryption of a sequence of base-`m` digits
//! via an alternating Feistel network over Belt-block (§4.2 "FMT").
//!
//! Digits are split into a left half of `u = len / 2` digits and a right
//! half of `v = len - u` digits, each folded into a single integer.
//! Rounds alternate which half is updated, each using the *other* half's
//! (unmodified-this-round) value as input to a Belt-block-keyed pseudo-
//! random function, mirroring FF1/FF3-style format-preserving schemes.

use crate::error::{Error, Result};
use crate::util;
use belt_block::BeltBlock;

/// Minimum round count required by §4.2.
pub const MIN_ROUNDS: u8 = 12;

fn digits_to_value(digits: &[u32], m: u32) -> u128 {
    digits
        .iter()
        .fold(0u128, |acc, &d| acc * m as u128 + d as u128)
}

fn value_to_digits(mut value: u128, m: u32, digits: &mut [u32]) {
    for d in digits.iter_mut().rev() {
        *d = (value % m as u128) as u32;
        value /= m as u128;
    }
}

fn modulus(m: u32, len: usize) -> Result<u128> {
    (m as u128).checked_pow(len as u32).ok_or(Error::BadParams)
}

fn round_value(cipher: &BeltBlock, round: u8, side_len: usize, input: u128) -> u128 {
    let mut block = [0u8; 16];
    block[0] = round;
    block[1] = side_len as u8;
    block[2..].copy_from_slice(&input.to_le_bytes()[..14]);
    util::encrypt_block(cipher, &mut block);
    u128::from_le_bytes(block)
}

fn halves(len: usize) -> (usize, usize) {
    let u = len / 2;
    (u, len - u)
}

fn validate(m: u32, digits: &[u32]) -> Result<()> {
    if m < 2 || digits.len() < 2 {
        return Err(Error::BadParams);
    }
    if digits.iter().any(|&d| d >= m) {
        return Err(Error::BadInput);
    }
    Ok(())
}

/// Encrypt `digits` (each `< m`) in place under `key`, running at least
/// [`MIN_ROUNDS`] Feistel rounds.
pub fn encrypt(key: &[u8], m: u32, digits: &mut [u32]) -> Result<()> {
    encrypt_with_rounds(key, m, digits, MIN_ROUNDS)
}

/// As [`encrypt`] but with an explicit round count (must be `>= MIN_ROUNDS`).
pub fn encrypt_with_rounds(key: &[u8], m: u32, digits: &mut [u32], rounds: u8) -> Result<()> {
    if rounds < MIN_ROUNDS {
        return Err(Error::BadParams);
    }
    validate(m, digits)?;
    let cipher = util::new_cipher(key)?;
    let (u, v) = halves(digits.len());
    let mod_u = modulus(m, u)?;
    let mod_v = modulus(m, v)?;

    let mut a = digits_to_value(&digits[..u], m);
    let mut b = digits_to_value(&digits[u..], m);

    for round in 0..rounds {
        if round % 2 == 0 {
            let w = round_value(&cipher, round, v, a) % mod_v;
            b = (b + w) % mod_v;
        } else {
            let w = round_value(&cipher, round, u, b) % mod_u;
            a = (a + w) % mod_u;
        }
    }

    value_to_digits(a, m, &mut digits[..u]);
    value_to_digits(b, m, &mut digits[u..]);
    Ok(())
}

/// Decrypt `digits` in place, the inverse of [`encrypt`].
pub fn decrypt(key: &[u8], m: u32, digits: &mut [u32]) -> Result<()> {
    decrypt_with_rounds(key, m, digits, MIN_ROUNDS)
}

/// As [`decrypt`] but with an explicit round count matching the call to
/// [`encrypt_with_rounds`] that produced `digits`.
pub fn decrypt_with_rounds(key: &[u8], m: u32, digits: &mut [u32], rounds: u8) -> Result<()> {
    if rounds < MIN_ROUNDS {
        return Err(Error::BadParams);
    }
    validate(m, digits)?;
    let cipher = util::new_cipher(key)?;
    let (u, v) = halves(digits.len());
    let mod_u = modulus(m, u)?;
    let mod_v = modulus(m, v)?;

    let mut a = digits_to_value(&digits[..u], m);
    let mut b = digits_to_value(&digits[u..], m);

    for round in (0..rounds).rev() {
        if round % 2 == 0 {
            let w = round_value(&cipher, round, v, a) % mod_v;
            b = (b + mod_v - w) % mod_v;
        } else {
            let w = round_value(&cipher, round, u, b) % mod_u;
            a = (a + mod_u - w) % mod_u;
        }
    }

    value_to_digits(a, m, &mut digits[..u]);
    value_to_digits(b, m, &mut digits[u..]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_decimal_digits() {
        let key = [0x5Cu8; 32];
        let mut digits = [1u32, 2, 3, 4, 5, 6, 7, 8];
        let original = digits;
        encrypt(&key, 10, &mut digits).unwrap();
        assert_ne!(digits, original);
        assert!(digits.iter().all(|&d| d < 10));
        decrypt(&key, 10, &mut digits).unwrap();
        assert_eq!(digits, original);
    }

    #[test]
    fn round_trips_non_decimal_radix() {
        let key = [0x5Du8; 32];
        let mut digits = [0u32, 15, 8, 3, 12];
        let original = digits;
        encrypt(&key, 16, &mut digits).unwrap();
        assert!(digits.iter().all(|&d| d < 16));
        decrypt(&key, 16, &mut digits).unwrap();
        assert_eq!(digits, original);
    }

    #[test]
    fn rejects_out_of_range_digit() {
        let key = [0x5Eu8; 32];
        let mut digits = [0u32, 10, 2, 3];
        assert_eq!(encrypt(&key, 10, &mut digits), Err(Error::BadInput));
    }

    #[test]
    fn rejects_below_minimum_rounds() {
        let key = [0x5Fu8; 32];
        let mut digits = [1u32, 2, 3, 4];
        assert_eq!(
            encrypt_with_rounds(&key, 10, &mut digits, 4),
            Err(Error::BadParams)
        );
    }
}
