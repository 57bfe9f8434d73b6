// RSA Encryption Implementation
// Textbook (unpadded) RSA on integers, used to wrap symmetric keys

use super::bigint::{mod_pow, RsaBigInt};
use super::keygen::PublicKey;
use crate::error::{Error, Result};

/// Encrypt an integer message: c = m^e mod n
///
/// No padding is applied. The message must be smaller than the modulus.
pub fn encrypt_int(m: &RsaBigInt, public_key: &PublicKey) -> Result<RsaBigInt> {
    if m >= public_key.n() {
        return Err(Error::Validation(format!(
            "message of {} bits does not fit under a {}-bit modulus",
            m.bits(),
            public_key.bit_length()
        )));
    }
    Ok(mod_pow(m, public_key.e(), public_key.n()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::keygen::PUBLIC_EXPONENT;

    fn toy_key() -> PublicKey {
        // p = 61, q = 53
        PublicKey::new(from_u64(3233), from_u64(PUBLIC_EXPONENT)).unwrap()
    }

    #[test]
    fn test_encrypt_int() {
        let key = toy_key();
        let c = encrypt_int(&from_u64(65), &key).unwrap();
        assert_eq!(c, mod_pow(&from_u64(65), &from_u64(PUBLIC_EXPONENT), &from_u64(3233)));
        assert_eq!(key.encrypt_int(&from_u64(0)).unwrap(), from_u64(0));
        assert_eq!(key.encrypt_int(&from_u64(1)).unwrap(), from_u64(1));
    }

    #[test]
    fn test_encrypt_rejects_oversized_message() {
        let key = toy_key();
        assert!(matches!(
            encrypt_int(&from_u64(3233), &key),
            Err(Error::Validation(_))
        ));
    }
}
