// RSA Key Generation
// Key records, supported key sizes and the key pair generator

use std::fmt;

use num_traits::{One, Zero};
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::info;

use super::bigint::{carmichael_lambda, from_u64, mod_inverse, RsaBigInt};
use super::prime::PrimeSearch;
use super::rng::{self, Seed};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};

/// Public exponent used for every generated key
pub const PUBLIC_EXPONENT: u64 = 65537;

/// Supported modulus sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeySize {
    Bits1024,
    #[default]
    Bits2048,
    Bits4096,
}

impl KeySize {
    /// Size of the modulus in bits
    pub fn bits(self) -> u64 {
        match self {
            KeySize::Bits1024 => 1024,
            KeySize::Bits2048 => 2048,
            KeySize::Bits4096 => 4096,
        }
    }
}

impl TryFrom<u64> for KeySize {
    type Error = Error;

    fn try_from(bits: u64) -> Result<Self> {
        match bits {
            1024 => Ok(KeySize::Bits1024),
            2048 => Ok(KeySize::Bits2048),
            4096 => Ok(KeySize::Bits4096),
            other => Err(Error::Validation(format!(
                "unsupported key size {} (expected 1024, 2048 or 4096)",
                other
            ))),
        }
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Inputs to a single key generation
///
/// Without a seed the generator draws from OS entropy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyGenerationParams {
    pub seed: Option<Seed>,
    pub key_size: KeySize,
}

impl KeyGenerationParams {
    pub fn new(key_size: KeySize) -> Self {
        Self {
            seed: None,
            key_size,
        }
    }

    /// Reproducible parameters: the same seed yields the same key pair
    pub fn seeded(seed: impl Into<Seed>, key_size: KeySize) -> Self {
        Self {
            seed: Some(seed.into()),
            key_size,
        }
    }
}

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    n: RsaBigInt,
    e: RsaBigInt,
}

/// RSA Private Key
///
/// `Debug` never prints the private exponent.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    n: RsaBigInt,
    d: RsaBigInt,
}

impl PublicKey {
    /// Build a public key, checking `n > 1` and `e = 65537`
    pub fn new(n: RsaBigInt, e: RsaBigInt) -> Result<Self> {
        if n <= RsaBigInt::one() {
            return Err(Error::Format("public key modulus must exceed 1".to_string()));
        }
        if e != from_u64(PUBLIC_EXPONENT) {
            return Err(Error::Format(format!(
                "public exponent must be {}, got {}",
                PUBLIC_EXPONENT, e
            )));
        }
        Ok(Self { n, e })
    }

    pub fn n(&self) -> &RsaBigInt {
        &self.n
    }

    pub fn e(&self) -> &RsaBigInt {
        &self.e
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Short hex identifier of the modulus, safe to log
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.n.to_bytes_be());
        hex::encode(&digest[..8])
    }

    /// Textbook RSA: m^e mod n
    pub fn encrypt_int(&self, m: &RsaBigInt) -> Result<RsaBigInt> {
        super::encrypt::encrypt_int(m, self)
    }
}

impl PrivateKey {
    /// Build a private key, checking `n > 1` and `0 < d < n`
    pub fn new(n: RsaBigInt, d: RsaBigInt) -> Result<Self> {
        if n <= RsaBigInt::one() {
            return Err(Error::Format("private key modulus must exceed 1".to_string()));
        }
        if d.is_zero() || d >= n {
            return Err(Error::Format(
                "private exponent must lie in (0, n)".to_string(),
            ));
        }
        Ok(Self { n, d })
    }

    pub fn n(&self) -> &RsaBigInt {
        &self.n
    }

    pub fn d(&self) -> &RsaBigInt {
        &self.d
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Textbook RSA: c^d mod n
    pub fn decrypt_int(&self, c: &RsaBigInt) -> Result<RsaBigInt> {
        super::decrypt::decrypt_int(c, self)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("n", &self.n)
            .field("d", &"<redacted>")
            .finish()
    }
}

/// RSA Key Pair (both public and private keys)
///
/// The prime factors are kept for inspection but are never persisted.
#[derive(Clone)]
pub struct RsaKeyPair {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
    p: RsaBigInt,
    q: RsaBigInt,
}

impl RsaKeyPair {
    /// Prime factors of the modulus, ordered `p > q`
    pub fn primes(&self) -> (&RsaBigInt, &RsaBigInt) {
        (&self.p, &self.q)
    }

    /// Get the bit length of the key
    pub fn bit_length(&self) -> u64 {
        self.public_key.bit_length()
    }
}

impl fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &self.private_key)
            .finish_non_exhaustive()
    }
}

/// Bounded RSA key pair generator
#[derive(Debug, Clone, Default)]
pub struct KeyGenerator {
    config: GeneratorConfig,
}

impl KeyGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one key pair, drawing randomness from the seed in `params`
    /// or from OS entropy when no seed is given
    pub fn generate(&self, params: &KeyGenerationParams) -> Result<RsaKeyPair> {
        let mut rng = match &params.seed {
            Some(seed) => rng::seeded(seed),
            None => rng::secure(),
        };
        let keypair = self.generate_with_rng(params.key_size.bits(), &mut rng)?;

        info!(
            bits = params.key_size.bits(),
            seeded = params.seed.is_some(),
            fingerprint = %keypair.public_key.fingerprint(),
            "generated RSA key pair"
        );
        Ok(keypair)
    }

    /// Generate a key pair with a modulus of `bits` bits from the given source
    ///
    /// Accepts any even size of at least 48 bits so tests can use moduli small
    /// enough to verify by trial division.
    pub(crate) fn generate_with_rng<R: RngCore + ?Sized>(
        &self,
        bits: u64,
        rng: &mut R,
    ) -> Result<RsaKeyPair> {
        if bits < 48 || bits % 2 != 0 {
            return Err(Error::Validation(format!(
                "modulus size must be an even number of bits >= 48, got {}",
                bits
            )));
        }

        let e = from_u64(PUBLIC_EXPONENT);
        let half_bits = bits / 2;

        // Step 1: Find p and q of equal size with (p-1) and (q-1) coprime to e
        let p = PrimeSearch {
            bits: half_bits,
            exponent: &e,
            exclude: None,
            tolerance_exponent: self.config.tolerance_exponent,
            max_attempts: self.config.max_attempts,
        }
        .run(rng)?;

        let q = PrimeSearch {
            bits: half_bits,
            exponent: &e,
            exclude: Some(&p),
            tolerance_exponent: self.config.tolerance_exponent,
            max_attempts: self.config.max_attempts,
        }
        .run(rng)?;

        // Ensure p > q
        let (p, q) = if p < q { (q, p) } else { (p, q) };

        // Step 2: Compute n = p * q
        let n = &p * &q;

        // Step 3: Compute λ(n) = lcm(p-1, q-1)
        let lambda = carmichael_lambda(&p, &q)?;

        // Step 4: Compute d = e^(-1) mod λ(n)
        let d = mod_inverse(&e, &lambda)?;

        Ok(RsaKeyPair {
            public_key: PublicKey::new(n.clone(), e)?,
            private_key: PrivateKey::new(n, d)?,
            p,
            q,
        })
    }
}

/// Generate an RSA key pair with the default generator configuration
pub fn generate_keypair(params: &KeyGenerationParams) -> Result<RsaKeyPair> {
    KeyGenerator::default().generate(params)
}
