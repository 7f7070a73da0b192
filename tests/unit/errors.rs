//! Error classification.

use ecorota::storage::{EntityKind, PersistenceError};
use ecorota::{EcoRotaError, ErrorKind, ProviderError, ValidationError};
use std::error::Error;

#[test]
fn test_every_family_maps_to_a_kind() {
    let cases: Vec<(EcoRotaError, ErrorKind)> = vec![
        (ValidationError::missing_field("name").into(), ErrorKind::InvalidInput),
        (
            PersistenceError::not_found(EntityKind::Route, 7).into(),
            ErrorKind::NotFound,
        ),
        (
            PersistenceError::conflict_on("email", "taken").into(),
            ErrorKind::Conflict,
        ),
        (
            PersistenceError::dependency("still referenced").into(),
            ErrorKind::Conflict,
        ),
        (PersistenceError::technical("disk").into(), ErrorKind::Internal),
        (ProviderError::hashing("bad salt").into(), ErrorKind::Internal),
        (ProviderError::invalid_token("expired").into(), ErrorKind::Unauthorized),
        (ProviderError::provider("down").into(), ErrorKind::Internal),
        (EcoRotaError::InvalidCredentials, ErrorKind::Unauthorized),
    ];

    for (error, kind) in cases {
        assert_eq!(error.kind(), kind, "{}", error);
    }
}

#[test]
fn test_specific_error_survives_wrapping() {
    let error: EcoRotaError = ValidationError::InvalidPostalCode {
        value: "123".to_string(),
        digits: 3,
    }
    .into();

    assert!(matches!(
        error.as_validation(),
        Some(ValidationError::InvalidPostalCode { digits: 3, .. })
    ));
    assert!(error.as_persistence().is_none());
}

#[test]
fn test_not_found_message_names_entity_and_id() {
    let error: EcoRotaError = PersistenceError::not_found(EntityKind::Neighborhood, 12).into();
    assert_eq!(
        error.to_string(),
        "Neighborhood with identifier '12' was not found."
    );
}

#[test]
fn test_provider_error_keeps_source() {
    let cause = std::io::Error::other("entropy unavailable");
    let error = ProviderError::provider_with_source("token signing failed", Box::new(cause));
    assert_eq!(
        error.source().map(|s| s.to_string()).as_deref(),
        Some("entropy unavailable")
    );
}
