//! Administrator authentication end to end.

use crate::common::builders::{ADMIN_PASSWORD, admin_input};
use crate::common::{TestWorld, test_config};
use chrono::Utc;
use ecorota::providers::{JwtTokenProvider, TokenProvider};
use ecorota::{EcoRotaConfig, EcoRotaError, ErrorKind};

#[tokio::test]
async fn test_login_token_carries_identity_and_expiry() {
    let world = TestWorld::with_config(test_config().with_token_ttl_seconds(600));
    let admin = world
        .administrators
        .create(admin_input("ana@ecorota.com"))
        .await
        .unwrap();

    let session = world
        .administrators
        .authenticate("Ana@EcoRota.com", ADMIN_PASSWORD)
        .await
        .unwrap();
    let claims = world.administrators.verify_token(&session.token).unwrap();

    assert_eq!(claims.sub, admin.id().value());
    assert_eq!(claims.subject().email, "ana@ecorota.com");
    assert_eq!(claims.iss, "ecorota");
    assert_eq!(claims.exp - claims.iat, 600);
    assert!(claims.expires_at().is_some_and(|at| at > Utc::now()));

    let body = serde_json::to_value(&session).unwrap();
    assert!(body["administrator"].get("passwordHash").is_none());
    assert!(!body.to_string().contains(admin.password_hash()));
}

#[tokio::test]
async fn test_tokens_from_another_deployment_are_rejected() {
    let world = TestWorld::new();
    world
        .administrators
        .create(admin_input("ana@ecorota.com"))
        .await
        .unwrap();
    let session = world
        .administrators
        .authenticate("ana@ecorota.com", ADMIN_PASSWORD)
        .await
        .unwrap();

    let other = EcoRotaConfig::default().with_token_secret("some-other-deployment-secret");
    let foreign = JwtTokenProvider::from_config(&other.token).unwrap();
    assert!(foreign.verify(&session.token).is_err());

    let forged = foreign
        .generate(&world.administrators.verify_token(&session.token).unwrap().subject(), None)
        .unwrap();
    let err = world.administrators.verify_token(&forged).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_failed_logins() {
    let world = TestWorld::new();
    world
        .administrators
        .create(admin_input("ana@ecorota.com"))
        .await
        .unwrap();

    for (email, password) in [
        ("ana@ecorota.com", "wrong"),
        ("ana@ecorota.com", ""),
        ("nobody@ecorota.com", ADMIN_PASSWORD),
    ] {
        let err = world
            .administrators
            .authenticate(email, password)
            .await
            .unwrap_err();
        assert!(matches!(err, EcoRotaError::InvalidCredentials), "{}", email);
    }

    let malformed = world
        .administrators
        .authenticate("not an email", ADMIN_PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(malformed.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_configuration_from_environment_style_variables() {
    let config = EcoRotaConfig::from_vars([
        ("ECOROTA_TOKEN_SECRET", "vars-secret-long-enough-000"),
        ("ECOROTA_TOKEN_ISSUER", "prefeitura"),
        ("ECOROTA_HASH_COST", "5"),
    ])
    .unwrap();
    let world = TestWorld::with_config(config);

    let admin = world
        .administrators
        .create(admin_input("ana@ecorota.com"))
        .await
        .unwrap();
    assert!(admin.password_hash().starts_with("$2b$05$"));

    let session = world
        .administrators
        .authenticate("ana@ecorota.com", ADMIN_PASSWORD)
        .await
        .unwrap();
    let claims = world.administrators.verify_token(&session.token).unwrap();
    assert_eq!(claims.iss, "prefeitura");
}
