//! Integration tests: configuration loading through concurrent use of one service

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ares_core::{Claims, TokenError, TokenService, TokenServiceConfig, ValidationFailure};
use ares_shared::config::{AppConfig, Environment};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn service_from_app_config() -> TokenService {
    let app_config = AppConfig::load_from(fixtures_dir(), Environment::Development)
        .expect("configuration should load");
    TokenService::new(TokenServiceConfig::from_app_config(&app_config))
        .expect("service should build from default key paths")
}

#[test]
fn test_service_builds_from_layered_config() {
    let service = service_from_app_config();

    assert_eq!(service.issuer(), "Ares API");
    assert_eq!(service.lifetime(), 3600);

    let claims = Claims::new().with("sub", "42").with("role_id", 3);
    let token = service.issue(&claims).unwrap();

    let payload = service.validate(&token).into_result().unwrap();
    assert_eq!(payload.iss, "Ares API");
    assert_eq!(payload.claims, claims);
}

#[test]
fn test_bad_base_dir_fails_construction() {
    let app_config =
        AppConfig::load_from(fixtures_dir().join("keys"), Environment::Development).unwrap();
    let result = TokenService::new(TokenServiceConfig::from_app_config(&app_config));

    assert!(matches!(result, Err(TokenError::KeyLoadError { .. })));
}

#[test]
fn test_serializable_claims() {
    #[derive(serde::Serialize)]
    struct Principal<'a> {
        sub: &'a str,
        username: &'a str,
    }

    let service = service_from_app_config();
    let claims = Claims::from_serializable(&Principal {
        sub: "42",
        username: "habbo",
    })
    .unwrap();

    let token = service.issue_at(&claims, 1_000_000).unwrap();
    let payload = service.validate_at(&token, 1_000_000).into_result().unwrap();
    assert_eq!(payload.claim("username"), Some(serde_json::json!("habbo")));

    assert_eq!(
        service.validate_at(&token, 1_003_600).into_result().unwrap_err(),
        ValidationFailure::Expired {
            exp: 1_003_600,
            now: 1_003_600
        }
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_issue_and_validate() {
    let service = Arc::new(service_from_app_config());

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::task::spawn_blocking(move || {
                let claims = Claims::new().with("sub", i.to_string());
                let token = service.issue(&claims).unwrap();
                let payload = service.validate(&token).into_result().unwrap();
                assert_eq!(payload.claim("sub"), Some(serde_json::json!(i.to_string())));
                payload.jti
            })
        })
        .collect();

    let mut jtis = HashSet::new();
    for handle in handles {
        jtis.insert(handle.await.unwrap());
    }
    assert_eq!(jtis.len(), 32);
}
