//! Issue a token and verify it with the configured key pair.
//!
//! ```text
//! ARES__BASE_DIR=core/tests/fixtures cargo run -p ares_core --example token_roundtrip
//! ```

use ares_core::{Claims, DomainResult, TokenService, TokenServiceConfig, ValidationResult};
use ares_shared::{init_tracing, AppConfig};

fn main() -> DomainResult<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        base_dir = %config.base_dir.display(),
        "Starting token round trip"
    );

    let service = TokenService::new(TokenServiceConfig::from_app_config(&config))?;

    let claims = Claims::new().with("sub", "42").with("username", "demo");
    let token = service.issue(&claims)?;
    println!("token:\n{}\n", token);

    match service.validate(&token) {
        ValidationResult::Valid(payload) => {
            println!("valid until {} (lifetime {}s)", payload.exp, service.lifetime());
            println!("jti: {}", payload.jti);
        }
        ValidationResult::Invalid(failure) => println!("rejected: {}", failure),
    }

    let expired_at = chrono::Utc::now().timestamp() + service.lifetime();
    if let Some(failure) = service.validate_at(&token, expired_at).failure() {
        println!("at {}: {}", expired_at, failure);
    }

    println!("garbage: {}", service.validate_token("not.a.token"));

    Ok(())
}
