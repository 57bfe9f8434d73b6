// AES-128 in counter mode, the symmetric half of the hybrid scheme

use aes::cipher::{KeyIvInit, StreamCipher};
use num_bigint::BigUint;

use crate::error::{Error, Result};

type Aes128Ctr = ctr::Ctr128BE<aes::Aes128>;

/// Symmetric key size in bits
pub const KEY_BITS: u64 = 128;

/// Symmetric key size in bytes
pub const KEY_BYTES: usize = 16;

/// Encrypt `plaintext` with AES-128-CTR. The 16-byte counter block starts at
/// `initial_counter` (big-endian) and increments once per block.
pub fn encrypt_ctr(key: &[u8; KEY_BYTES], initial_counter: u128, plaintext: &[u8]) -> Result<Vec<u8>> {
    apply_keystream(key, initial_counter, plaintext)
}

/// Inverse of [`encrypt_ctr`]
pub fn decrypt_ctr(key: &[u8; KEY_BYTES], initial_counter: u128, ciphertext: &[u8]) -> Result<Vec<u8>> {
    apply_keystream(key, initial_counter, ciphertext)
}

fn apply_keystream(key: &[u8; KEY_BYTES], initial_counter: u128, data: &[u8]) -> Result<Vec<u8>> {
    let mut buffer = data.to_vec();
    let mut cipher = Aes128Ctr::new(&(*key).into(), &initial_counter.to_be_bytes().into());
    cipher
        .try_apply_keystream(&mut buffer)
        .map_err(|e| Error::Cipher(e.to_string()))?;
    Ok(buffer)
}

/// Little-endian 16-byte encoding of an integer symmetric key
pub fn key_to_bytes(key: &BigUint) -> Result<[u8; KEY_BYTES]> {
    let le = key.to_bytes_le();
    if le.len() > KEY_BYTES {
        return Err(Error::Cipher(format!(
            "symmetric key has {} bits, expected at most {}",
            key.bits(),
            KEY_BITS
        )));
    }
    let mut bytes = [0u8; KEY_BYTES];
    bytes[..le.len()].copy_from_slice(&le);
    Ok(bytes)
}
