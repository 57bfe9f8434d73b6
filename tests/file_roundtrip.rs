//! Whole-file encryption through the on-disk key and container records

use std::fs;

use rsa_hybrid::rsa::{rng, KeyGenerationParams, KeyGenerator, KeySize, RsaKeyPair, Seed};
use rsa_hybrid::util::file_ops::{self, Mode};
use rsa_hybrid::Error;

fn alice() -> RsaKeyPair {
    KeyGenerator::default()
        .generate(&KeyGenerationParams::seeded("alice", KeySize::Bits1024))
        .unwrap()
}

#[test]
fn exported_keys_encrypt_and_decrypt_files() {
    let dir = tempfile::tempdir().unwrap();
    let keypair = alice();
    let (public_path, private_path) = file_ops::export_keys(&keypair, dir.path(), "alice").unwrap();

    assert_eq!(public_path, dir.path().join("alice.pub"));
    assert_eq!(private_path, dir.path().join("alice.prv"));

    let public_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&public_path).unwrap()).unwrap();
    assert_eq!(public_json["e"], 65537);
    let private_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&private_path).unwrap()).unwrap();
    assert!(private_json.get("d").is_some());
    assert!(private_json.get("e").is_none());

    let plaintext: Vec<u8> = (0..5000u32).map(|i| (i % 256) as u8).collect();
    let input = dir.path().join("plain.bin");
    let sealed = dir.path().join("sealed.json");
    let output = dir.path().join("opened.bin");
    fs::write(&input, &plaintext).unwrap();

    file_ops::run(Mode::Encrypt, &public_path, &input, &sealed).unwrap();
    let container: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&sealed).unwrap()).unwrap();
    assert!(container["ciphertext"].is_string());
    assert!(container["key"].is_number());

    file_ops::run(Mode::Decrypt, &private_path, &sealed, &output).unwrap();
    assert_eq!(fs::read(&output).unwrap(), plaintext);
}

#[test]
fn empty_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let (public_path, private_path) = file_ops::export_keys(&alice(), dir.path(), "alice").unwrap();

    let input = dir.path().join("empty");
    let sealed = dir.path().join("empty.json");
    let output = dir.path().join("empty.out");
    fs::write(&input, b"").unwrap();

    let mut rng = rng::seeded(&Seed::from("empty"));
    file_ops::encrypt_file(&public_path, &input, &sealed, &mut rng).unwrap();
    file_ops::decrypt_file(&private_path, &sealed, &output).unwrap();
    assert!(fs::read(&output).unwrap().is_empty());
}

#[test]
fn loaded_keys_match_generated_keys() {
    let dir = tempfile::tempdir().unwrap();
    let keypair = alice();
    let (public_path, private_path) = file_ops::export_keys(&keypair, dir.path(), "alice").unwrap();

    assert_eq!(file_ops::load_public_key(&public_path).unwrap(), keypair.public_key);
    assert_eq!(file_ops::load_private_key(&private_path).unwrap(), keypair.private_key);
}

#[test]
fn malformed_container_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let (_, private_path) = file_ops::export_keys(&alice(), dir.path(), "alice").unwrap();

    let sealed = dir.path().join("broken.json");
    let output = dir.path().join("never.bin");
    fs::write(&sealed, r#"{"ciphertext": "aGVsbG8="}"#).unwrap();

    let result = file_ops::decrypt_file(&private_path, &sealed, &output);
    assert!(matches!(result, Err(Error::Format(_))));
    assert!(!output.exists());
}

#[test]
fn public_key_cannot_decrypt() {
    let dir = tempfile::tempdir().unwrap();
    let (public_path, _) = file_ops::export_keys(&alice(), dir.path(), "alice").unwrap();

    let input = dir.path().join("plain.txt");
    let sealed = dir.path().join("sealed.json");
    fs::write(&input, b"attack at dawn").unwrap();
    file_ops::run(Mode::Encrypt, &public_path, &input, &sealed).unwrap();

    // A public key record has no "d" field
    let result = file_ops::run(Mode::Decrypt, &public_path, &sealed, &dir.path().join("out"));
    assert!(matches!(result, Err(Error::Format(_))));
}
