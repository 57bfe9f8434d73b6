// File Operations for RSA Hybrid Encryption
// Loads and stores key/container records and runs whole-file encrypt/decrypt

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rand::{CryptoRng, RngCore};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::records;
use crate::error::{Error, Result};
use crate::hybrid::{self, EncryptedContainer};
use crate::rsa::rng;
use crate::rsa::{PrivateKey, PublicKey, RsaKeyPair};

/// Extension of exported public key files
pub const PUBLIC_KEY_EXTENSION: &str = "pub";

/// Extension of exported private key files
pub const PRIVATE_KEY_EXTENSION: &str = "prv";

/// Direction of a file operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(flag: &str) -> Result<Self> {
        match flag {
            "encrypt" | "-e" => Ok(Mode::Encrypt),
            "decrypt" | "-d" => Ok(Mode::Decrypt),
            other => Err(Error::Validation(format!(
                "unknown mode '{}' (expected encrypt/-e or decrypt/-d)",
                other
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Encrypt => write!(f, "encrypt"),
            Mode::Decrypt => write!(f, "decrypt"),
        }
    }
}

/// Read entire file into memory
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Write data to file
///
/// Data goes to a temporary file next to `path` which is then renamed over
/// it, so readers never observe a partially written file.
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| Error::Io(e.error))?;
    debug!(path = %path.display(), bytes = data.len(), "wrote file");
    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn load_public_key(path: &Path) -> Result<PublicKey> {
    records::public_key_from_json(&read_text(path)?)
}

pub fn load_private_key(path: &Path) -> Result<PrivateKey> {
    records::private_key_from_json(&read_text(path)?)
}

pub fn load_container(path: &Path) -> Result<EncryptedContainer> {
    records::container_from_json(&read_text(path)?)
}

pub fn save_public_key(path: &Path, key: &PublicKey) -> Result<()> {
    write_file(path, records::public_key_to_json(key)?.as_bytes())
}

pub fn save_private_key(path: &Path, key: &PrivateKey) -> Result<()> {
    write_file(path, records::private_key_to_json(key)?.as_bytes())
}

pub fn save_container(path: &Path, container: &EncryptedContainer) -> Result<()> {
    write_file(path, records::container_to_json(container)?.as_bytes())
}

/// Export a key pair as `<owner>.pub` and `<owner>.prv` inside `dir`
///
/// Returns the public and private key paths.
pub fn export_keys(keypair: &RsaKeyPair, dir: &Path, owner: &str) -> Result<(PathBuf, PathBuf)> {
    if owner.is_empty() {
        return Err(Error::Validation("key owner name must not be empty".to_string()));
    }
    let public_path = dir.join(format!("{}.{}", owner, PUBLIC_KEY_EXTENSION));
    let private_path = dir.join(format!("{}.{}", owner, PRIVATE_KEY_EXTENSION));

    save_public_key(&public_path, &keypair.public_key)?;
    save_private_key(&private_path, &keypair.private_key)?;

    info!(
        public = %public_path.display(),
        private = %private_path.display(),
        "exported key pair"
    );
    Ok((public_path, private_path))
}

/// Encrypt `in_path` for the public key stored at `key_path`
pub fn encrypt_file<R>(key_path: &Path, in_path: &Path, out_path: &Path, rng: &mut R) -> Result<()>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let public_key = load_public_key(key_path)?;
    let plaintext = read_file(in_path)?;
    let container = hybrid::encrypt(&public_key, &plaintext, rng)?;
    save_container(out_path, &container)
}

/// Decrypt the container at `in_path` with the private key stored at `key_path`
pub fn decrypt_file(key_path: &Path, in_path: &Path, out_path: &Path) -> Result<()> {
    let container = load_container(in_path)?;
    let private_key = load_private_key(key_path)?;
    let plaintext = hybrid::decrypt(&private_key, &container)?;
    write_file(out_path, &plaintext)
}

/// Dispatch a file operation. Encryption draws its symmetric key from OS entropy.
pub fn run(mode: Mode, key_path: &Path, in_path: &Path, out_path: &Path) -> Result<()> {
    info!(%mode, input = %in_path.display(), output = %out_path.display(), "processing file");
    match mode {
        Mode::Encrypt => encrypt_file(key_path, in_path, out_path, &mut rng::secure()),
        Mode::Decrypt => decrypt_file(key_path, in_path, out_path),
    }
}
