// Miller-Rabin primality test and prime candidate search

use num_bigint::RandBigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::RngCore;
use tracing::debug;

use super::bigint::{mod_pow, RsaBigInt};
use crate::error::{Error, Result};

/// Miller-Rabin primality test
///
/// Returns `true` only if the probability that a composite `n` passes is at
/// most `2^tolerance_exponent`. Each round halves the exponent twice, so
/// `ceil((1 - tolerance_exponent) / 2)` random witnesses are tried.
pub fn is_probably_prime<R: RngCore + ?Sized>(
    n: &RsaBigInt,
    tolerance_exponent: i32,
    rng: &mut R,
) -> Result<bool> {
    if tolerance_exponent >= 0 {
        return Err(Error::Validation(format!(
            "tolerance exponent must be negative, got {}",
            tolerance_exponent
        )));
    }

    let two = RsaBigInt::from(2u8);
    if n < &two {
        return Ok(false);
    }
    if n == &two || n == &RsaBigInt::from(3u8) {
        return Ok(true);
    }
    if n.is_even() {
        return Ok(false);
    }

    // Write n-1 as 2^r * d with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut r = 0u64;
    while d.is_even() {
        d >>= 1;
        r += 1;
    }

    let rounds = (1 - i64::from(tolerance_exponent) + 1) / 2;

    for _ in 0..rounds {
        // Witness in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = mod_pow(&a, &d, n);

        if x.is_one() || x == n_minus_one {
            continue;
        }

        let mut composite = true;
        for _ in 1..r {
            x = mod_pow(&x, &two, n);
            if x == n_minus_one {
                composite = false;
                break;
            }
        }

        if composite {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Draw a random `bits`-bit odd integer with its top bit set
pub fn random_candidate<R: RngCore + ?Sized>(bits: u64, rng: &mut R) -> RsaBigInt {
    let mut candidate = rng.gen_biguint(bits);
    candidate |= RsaBigInt::one() << (bits - 1);
    candidate |= RsaBigInt::one();
    candidate
}

/// Constraints on a prime factor of an RSA modulus
#[derive(Clone, Debug)]
pub struct PrimeSearch<'a> {
    pub bits: u64,
    /// `p - 1` must not be a multiple of this exponent
    pub exponent: &'a RsaBigInt,
    /// A previously chosen factor the new prime must differ from
    pub exclude: Option<&'a RsaBigInt>,
    pub tolerance_exponent: i32,
    pub max_attempts: u64,
}

impl PrimeSearch<'_> {
    /// Sample candidates until one satisfies every constraint, or fail once
    /// `max_attempts` candidates have been rejected
    pub fn run<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<RsaBigInt> {
        if self.bits < 2 {
            return Err(Error::Validation(format!(
                "prime bit length must be at least 2, got {}",
                self.bits
            )));
        }

        for attempt in 1..=self.max_attempts {
            let candidate = random_candidate(self.bits, rng);

            if self.exclude == Some(&candidate) {
                continue;
            }
            if ((&candidate - 1u8) % self.exponent).is_zero() {
                continue;
            }
            if is_probably_prime(&candidate, self.tolerance_exponent, rng)? {
                debug!(bits = self.bits, attempt, "accepted prime candidate");
                return Ok(candidate);
            }
        }

        Err(Error::KeyGenerationFailed {
            attempts: self.max_attempts,
        })
    }
}
