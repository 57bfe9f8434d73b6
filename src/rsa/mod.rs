// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod prime;
pub mod rng;

pub use bigint::{extended_euclidean, RsaBigInt};
pub use keygen::{
    generate_keypair, KeyGenerationParams, KeyGenerator, KeySize, PrivateKey, PublicKey,
    RsaKeyPair, PUBLIC_EXPONENT,
};
pub use prime::is_probably_prime;
pub use rng::Seed;
