//! Hybrid encryption: a fresh AES-128 key encrypts the payload in counter mode
//! and the key itself is wrapped with textbook RSA.
//!
//! The wrap is unpadded, so `wrapped_key = k^e mod n` is deterministic in `k`.
//! Each call draws a new `k`, which is what keeps the zero initial counter
//! from ever repeating a keystream.

pub mod cipher;

use num_bigint::{BigUint, RandBigInt};
use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::error::Result;
use crate::rsa::{PrivateKey, PublicKey, RsaBigInt};

use self::cipher::{decrypt_ctr, encrypt_ctr, key_to_bytes, KEY_BITS};

/// Initial counter value for every encrypt and decrypt call
pub const INITIAL_COUNTER: u128 = 0;

/// RSA-wrapped symmetric key plus the payload it encrypts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedContainer {
    wrapped_key: RsaBigInt,
    ciphertext: Vec<u8>,
}

impl EncryptedContainer {
    pub fn new(wrapped_key: RsaBigInt, ciphertext: Vec<u8>) -> Self {
        Self {
            wrapped_key,
            ciphertext,
        }
    }

    pub fn wrapped_key(&self) -> &RsaBigInt {
        &self.wrapped_key
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}

/// Encrypt `plaintext` for the holder of `public_key`
pub fn encrypt<R>(public_key: &PublicKey, plaintext: &[u8], rng: &mut R) -> Result<EncryptedContainer>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let key: BigUint = rng.gen_biguint(KEY_BITS);
    let ciphertext = encrypt_ctr(&key_to_bytes(&key)?, INITIAL_COUNTER, plaintext)?;
    let wrapped_key = public_key.encrypt_int(&key)?;

    debug!(
        bytes = plaintext.len(),
        fingerprint = %public_key.fingerprint(),
        "encrypted payload"
    );
    Ok(EncryptedContainer::new(wrapped_key, ciphertext))
}

/// Recover the plaintext sealed in `container`
pub fn decrypt(private_key: &PrivateKey, container: &EncryptedContainer) -> Result<Vec<u8>> {
    let key = private_key.decrypt_int(container.wrapped_key())?;
    let plaintext = decrypt_ctr(&key_to_bytes(&key)?, INITIAL_COUNTER, container.ciphertext())?;

    debug!(bytes = plaintext.len(), "decrypted payload");
    Ok(plaintext)
}
