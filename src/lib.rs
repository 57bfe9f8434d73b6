//! RSA key generation from first principles, plus hybrid file encryption.
//!
//! Keys are built from two Miller-Rabin tested primes with the private
//! exponent derived through the extended Euclidean algorithm over the
//! Carmichael function. Files are encrypted with a fresh AES-128-CTR key that
//! is itself wrapped with textbook (unpadded) RSA. The scheme makes no
//! side-channel or padding claims.
//!
//! ```rust,no_run
//! use rsa_hybrid::hybrid;
//! use rsa_hybrid::rsa::{generate_keypair, rng, KeyGenerationParams, KeySize};
//!
//! let keypair = generate_keypair(&KeyGenerationParams::new(KeySize::Bits2048))?;
//! let container = hybrid::encrypt(&keypair.public_key, b"hello", &mut rng::secure())?;
//! let plaintext = hybrid::decrypt(&keypair.private_key, &container)?;
//! assert_eq!(plaintext, b"hello");
//! # Ok::<(), rsa_hybrid::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod hybrid;
pub mod rsa;
pub mod util;

pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use hybrid::EncryptedContainer;
pub use rsa::{KeyGenerationParams, KeyGenerator, KeySize, PrivateKey, PublicKey, RsaKeyPair, Seed};
pub use util::file_ops::Mode;
