//! Tests for RS256 key loading

use crate::errors::TokenError;
use crate::services::token::{Rs256KeyManager, TokenServiceConfig};

use super::{fixtures_dir, test_config};

const PRIVATE_PEM: &str = include_str!("../../../../tests/fixtures/keys/jwt_private_key.pem");
const PUBLIC_PEM: &str = include_str!("../../../../tests/fixtures/keys/jwt_public_key.pem");
const OTHER_PUBLIC_PEM: &str = include_str!("../../../../tests/fixtures/keys/other_public_key.pem");

fn key_load_message(result: Result<Rs256KeyManager, TokenError>) -> String {
    match result {
        Err(TokenError::KeyLoadError { message }) => message,
        Err(other) => panic!("expected KeyLoadError, got {:?}", other),
        Ok(_) => panic!("expected KeyLoadError, got a key manager"),
    }
}

#[test]
fn test_load_resolves_paths_against_base_dir() {
    let manager = Rs256KeyManager::load(
        fixtures_dir(),
        "keys/jwt_private_key.pem",
        "keys/jwt_public_key.pem",
    )
    .unwrap();

    let (private_path, public_path) = manager.key_paths();
    assert_eq!(private_path, fixtures_dir().join("keys/jwt_private_key.pem"));
    assert_eq!(public_path, fixtures_dir().join("keys/jwt_public_key.pem"));
}

#[test]
fn test_from_config() {
    let config = test_config("Ares API", 60);
    assert!(Rs256KeyManager::from_config(&config).is_ok());
}

#[test]
fn test_missing_key_file() {
    let message = key_load_message(Rs256KeyManager::load(
        fixtures_dir(),
        "keys/does_not_exist.pem",
        "keys/jwt_public_key.pem",
    ));
    assert!(message.contains("Failed to read private key"));
    assert!(message.contains("does_not_exist.pem"));
}

#[test]
fn test_missing_key_file_under_default_base_dir() {
    let config = TokenServiceConfig {
        base_dir: fixtures_dir().join("nowhere"),
        ..TokenServiceConfig::default()
    };
    let message = key_load_message(Rs256KeyManager::from_config(&config));
    assert!(message.contains("nowhere"));
}

#[test]
fn test_corrupt_key_file() {
    let message = key_load_message(Rs256KeyManager::load(
        fixtures_dir(),
        "keys/corrupt_key.pem",
        "keys/jwt_public_key.pem",
    ));
    assert!(message.contains("Invalid private key format"));
}

#[test]
fn test_public_key_in_private_slot() {
    let message = key_load_message(Rs256KeyManager::load(
        fixtures_dir(),
        "keys/jwt_public_key.pem",
        "keys/jwt_public_key.pem",
    ));
    assert!(message.to_lowercase().contains("private key"));
}

#[test]
fn test_mismatched_halves_are_rejected() {
    let message = key_load_message(Rs256KeyManager::load(
        fixtures_dir(),
        "keys/jwt_private_key.pem",
        "keys/other_public_key.pem",
    ));
    assert!(message.contains("does not match"));

    let message =
        key_load_message(Rs256KeyManager::from_pem_strings(PRIVATE_PEM, OTHER_PUBLIC_PEM));
    assert!(message.contains("does not match"));
}

#[test]
fn test_from_pem_strings() {
    let manager = Rs256KeyManager::from_pem_strings(PRIVATE_PEM, PUBLIC_PEM).unwrap();
    let (private_path, _) = manager.key_paths();
    assert_eq!(private_path.to_str(), Some("memory"));
}

#[test]
fn test_debug_output_omits_key_material() {
    let manager = Rs256KeyManager::from_pem_strings(PRIVATE_PEM, PUBLIC_PEM).unwrap();
    let debug = format!("{:?}", manager);

    assert!(debug.contains("Rs256KeyManager"));
    assert!(!debug.contains("BEGIN"));
}
