// Random sources for key generation and the hybrid codec
//
// Every component takes an explicit RNG. Production callers use `secure()`;
// tests and reproducible key derivation use `seeded()`.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

/// Seed for the deterministic generator
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Seed {
    Text(String),
    Number(u64),
}

impl Seed {
    /// Canonical bytes hashed into the ChaCha seed. The tag keeps `Text("7")`
    /// and `Number(7)` apart.
    fn canonical_bytes(&self) -> Vec<u8> {
        match self {
            Seed::Text(text) => [b"text:".as_slice(), text.as_bytes()].concat(),
            Seed::Number(number) => [b"number:".as_slice(), number.to_be_bytes().as_slice()].concat(),
        }
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        Seed::Text(text.to_string())
    }
}

impl From<String> for Seed {
    fn from(text: String) -> Self {
        Seed::Text(text)
    }
}

impl From<u64> for Seed {
    fn from(number: u64) -> Self {
        Seed::Number(number)
    }
}

/// Cryptographically secure generator seeded from OS entropy
pub fn secure() -> ChaCha20Rng {
    ChaCha20Rng::from_entropy()
}

/// Deterministic generator: the same seed always yields the same stream
pub fn seeded(seed: &Seed) -> ChaCha20Rng {
    let digest: [u8; 32] = Sha256::digest(seed.canonical_bytes()).into();
    ChaCha20Rng::from_seed(digest)
}
