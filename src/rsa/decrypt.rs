// RSA Decryption Implementation

use super::bigint::{mod_pow, RsaBigInt};
use super::keygen::PrivateKey;
use crate::error::{Error, Result};

/// Decrypt an integer ciphertext: m = c^d mod n
pub fn decrypt_int(c: &RsaBigInt, private_key: &PrivateKey) -> Result<RsaBigInt> {
    if c >= private_key.n() {
        return Err(Error::Validation(
            "ciphertext integer is not reduced modulo n".to_string(),
        ));
    }
    Ok(mod_pow(c, private_key.d(), private_key.n()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::{carmichael_lambda, from_u64, mod_inverse};
    use crate::rsa::keygen::{PublicKey, PUBLIC_EXPONENT};

    #[test]
    fn test_roundtrip_toy_key() {
        // p = 61, q = 53, λ = 780; gcd(65537, 780) = 1
        let n = from_u64(3233);
        let lambda = carmichael_lambda(&from_u64(61), &from_u64(53)).unwrap();
        let e = from_u64(PUBLIC_EXPONENT) % &lambda;
        let d = mod_inverse(&e, &lambda).unwrap();

        let public_key = PublicKey::new(n.clone(), from_u64(PUBLIC_EXPONENT)).unwrap();
        let private_key = PrivateKey::new(n, d).unwrap();

        for m in [0u64, 1, 2, 65, 1000, 3232] {
            let c = public_key.encrypt_int(&from_u64(m)).unwrap();
            assert_eq!(decrypt_int(&c, &private_key).unwrap(), from_u64(m));
        }
    }

    #[test]
    fn test_decrypt_rejects_unreduced_ciphertext() {
        let key = PrivateKey::new(from_u64(3233), from_u64(413)).unwrap();
        assert!(key.decrypt_int(&from_u64(5000)).is_err());
    }
}
