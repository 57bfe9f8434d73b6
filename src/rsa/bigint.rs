// RSA Big Integer Operations
// Wrapper around num-bigint for the number theory behind key generation

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Modular exponentiation: base^exp mod modulus
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }
    base.modpow(exp, modulus)
}

/// Extended Euclidean Algorithm
///
/// Requires `a >= b > 0`. Returns `(g, t)` where `g = gcd(a, b)` and `t` is the
/// Bézout coefficient of `b` reduced into `[0, a)`, so `a*x + b*t = g` for some
/// integer `x`. When `g = 1`, `t` is the inverse of `b` modulo `a`.
///
/// Operands are unsigned, so negative inputs cannot reach this function.
pub fn extended_euclidean(a: &RsaBigInt, b: &RsaBigInt) -> Result<(RsaBigInt, RsaBigInt)> {
    if b.is_zero() {
        return Err(Error::Validation("operand b must be non-zero".to_string()));
    }
    if a < b {
        return Err(Error::Validation(
            "operand a must be greater than or equal to b".to_string(),
        ));
    }

    let modulus = BigInt::from(a.clone());
    let mut r = modulus.clone();
    let mut new_r = BigInt::from(b.clone());
    let mut t = BigInt::zero();
    let mut new_t = BigInt::one();

    while !new_r.is_zero() {
        let quotient = &r / &new_r;

        let next_t = &t - &quotient * &new_t;
        t = std::mem::replace(&mut new_t, next_t);

        let next_r = &r - &quotient * &new_r;
        r = std::mem::replace(&mut new_r, next_r);
    }

    let t = t.mod_floor(&modulus);
    Ok((r.magnitude().clone(), t.magnitude().clone()))
}

/// Compute modular inverse: b^(-1) mod m
/// Requires m >= b; fails when gcd(b, m) != 1
pub fn mod_inverse(b: &RsaBigInt, m: &RsaBigInt) -> Result<RsaBigInt> {
    let (gcd, t) = extended_euclidean(m, b)?;
    if !gcd.is_one() {
        return Err(Error::Validation(
            "value is not invertible modulo the given modulus".to_string(),
        ));
    }
    Ok(t)
}

/// Carmichael function for n = p*q: (p-1)(q-1) / gcd(p-1, q-1)
/// Requires p >= q > 1
pub fn carmichael_lambda(p: &RsaBigInt, q: &RsaBigInt) -> Result<RsaBigInt> {
    if q <= &RsaBigInt::one() {
        return Err(Error::Validation("prime factors must exceed 1".to_string()));
    }
    let p_minus_1 = p - 1u8;
    let q_minus_1 = q - 1u8;
    let (gcd, _) = extended_euclidean(&p_minus_1, &q_minus_1)?;
    Ok((p_minus_1 * q_minus_1) / gcd)
}
