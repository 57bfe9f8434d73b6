// On-disk JSON records for keys and encrypted containers
//
//   public key:  {"n": <integer>, "e": <integer>}
//   private key: {"n": <integer>, "d": <integer>}
//   container:   {"key": <integer>, "ciphertext": "<base64>"}
//
// Integers are written as bare JSON numbers of arbitrary size.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hybrid::EncryptedContainer;
use crate::rsa::{PrivateKey, PublicKey, RsaBigInt};

/// Serde adapter writing a `BigUint` as an unbounded JSON integer
mod json_integer {
    use std::str::FromStr;

    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::rsa::RsaBigInt;

    pub fn serialize<S: Serializer>(value: &RsaBigInt, serializer: S) -> Result<S::Ok, S::Error> {
        let number: serde_json::Number = value.to_str_radix(10).parse().map_err(S::Error::custom)?;
        number.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RsaBigInt, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        let digits = number.to_string();
        RsaBigInt::from_str(&digits)
            .map_err(|_| D::Error::custom(format!("expected a non-negative integer, got {}", digits)))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PublicKeyRecord {
    #[serde(with = "json_integer")]
    n: RsaBigInt,
    #[serde(with = "json_integer")]
    e: RsaBigInt,
}

#[derive(Serialize, Deserialize)]
struct PrivateKeyRecord {
    #[serde(with = "json_integer")]
    n: RsaBigInt,
    #[serde(with = "json_integer")]
    d: RsaBigInt,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContainerRecord {
    #[serde(with = "json_integer")]
    key: RsaBigInt,
    ciphertext: String,
}

pub fn public_key_to_json(key: &PublicKey) -> Result<String> {
    let record = PublicKeyRecord {
        n: key.n().clone(),
        e: key.e().clone(),
    };
    Ok(serde_json::to_string(&record)?)
}

pub fn public_key_from_json(json: &str) -> Result<PublicKey> {
    let record: PublicKeyRecord = serde_json::from_str(json)?;
    PublicKey::new(record.n, record.e)
}

pub fn private_key_to_json(key: &PrivateKey) -> Result<String> {
    let record = PrivateKeyRecord {
        n: key.n().clone(),
        d: key.d().clone(),
    };
    Ok(serde_json::to_string(&record)?)
}

pub fn private_key_from_json(json: &str) -> Result<PrivateKey> {
    let record: PrivateKeyRecord = serde_json::from_str(json)?;
    PrivateKey::new(record.n, record.d)
}

pub fn container_to_json(container: &EncryptedContainer) -> Result<String> {
    let record = ContainerRecord {
        key: container.wrapped_key().clone(),
        ciphertext: STANDARD.encode(container.ciphertext()),
    };
    Ok(serde_json::to_string(&record)?)
}

/// Parse a container record. The base64 payload may be wrapped across lines.
pub fn container_from_json(json: &str) -> Result<EncryptedContainer> {
    let record: ContainerRecord = serde_json::from_str(json)?;
    let compact: String = record
        .ciphertext
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let ciphertext = STANDARD.decode(compact)?;
    Ok(EncryptedContainer::new(record.key, ciphertext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::PUBLIC_EXPONENT;

    #[test]
    fn test_public_key_record_uses_bare_integers() {
        let n = RsaBigInt::parse_bytes(b"123456789012345678901234567890123456789", 10).unwrap();
        let key = PublicKey::new(n.clone(), from_u64(PUBLIC_EXPONENT)).unwrap();

        let json = public_key_to_json(&key).unwrap();
        assert_eq!(
            json,
            r#"{"n":123456789012345678901234567890123456789,"e":65537}"#
        );
        assert_eq!(public_key_from_json(&json).unwrap(), key);
    }

    #[test]
    fn test_private_key_record() {
        let key = private_key_from_json(r#"{"n": 3233, "d": 413}"#).unwrap();
        assert_eq!(key.n(), &from_u64(3233));
        assert_eq!(key.d(), &from_u64(413));
        assert_eq!(private_key_to_json(&key).unwrap(), r#"{"n":3233,"d":413}"#);
    }

    #[test]
    fn test_malformed_key_records() {
        for json in [
            r#"{"n": 3233}"#,
            r#"{"n": "3233", "e": 65537}"#,
            r#"{"n": -3233, "e": 65537}"#,
            r#"{"n": 32.5, "e": 65537}"#,
            r#"{"n": 3233, "e": 3}"#,
            "not json",
        ] {
            assert!(
                matches!(public_key_from_json(json), Err(Error::Format(_))),
                "{} should be rejected",
                json
            );
        }
        assert!(matches!(
            private_key_from_json(r#"{"n": 3233, "e": 65537}"#),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_container_record() {
        let container = EncryptedContainer::new(from_u64(42), b"hello".to_vec());
        let json = container_to_json(&container).unwrap();
        assert_eq!(json, r#"{"key":42,"ciphertext":"aGVsbG8="}"#);
        assert_eq!(container_from_json(&json).unwrap(), container);
    }

    #[test]
    fn test_container_accepts_wrapped_base64() {
        let json = "{\"key\": 7, \"ciphertext\": \"aGVs\\nbG8=\\n\"}";
        let container = container_from_json(json).unwrap();
        assert_eq!(container.ciphertext(), b"hello");
        assert_eq!(container.wrapped_key(), &from_u64(7));
    }

    #[test]
    fn test_malformed_container() {
        assert!(matches!(
            container_from_json(r#"{"ciphertext": "aGVsbG8="}"#),
            Err(Error::Format(_))
        ));
        assert!(matches!(
            container_from_json(r#"{"key": 1, "ciphertext": "***"}"#),
            Err(Error::Format(_))
        ));
    }
}
