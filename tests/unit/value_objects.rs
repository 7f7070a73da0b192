//! Value object properties.
//!
//! Boundaries are checked with proptest over the whole valid range and just
//! outside it; the documented examples are pinned as plain tests.

use ecorota::ValidationError;
use ecorota::domain::value_objects::{
    AcceptedMaterials, Address, AddressChanges, CollectionDays, CollectionTime, Email,
    GeoLocation, MAX_DESCRIPTION_LENGTH, MIN_DESCRIPTION_LENGTH, MaterialType, PostalCode,
    ProblemAttachments, ProblemDescription, ProblemJustification, ProblemProtocol, WeekDay,
};
use proptest::prelude::*;

fn week_day() -> impl Strategy<Value = WeekDay> {
    prop::sample::select(WeekDay::ALL.to_vec())
}

proptest! {
    #[test]
    fn geo_location_accepts_every_coordinate_in_range(
        latitude in -90.0f64..=90.0,
        longitude in -180.0f64..=180.0,
    ) {
        let location = GeoLocation::new(latitude, longitude).unwrap();
        prop_assert_eq!(location.latitude(), latitude);
        prop_assert_eq!(location.longitude(), longitude);
    }

    #[test]
    fn geo_location_rejects_latitude_out_of_range(
        excess in 0.000_001f64..1_000.0,
        longitude in -180.0f64..=180.0,
        south in any::<bool>(),
    ) {
        let latitude = if south { -90.0 - excess } else { 90.0 + excess };
        let is_invalid_geo = matches!(
            GeoLocation::new(latitude, longitude),
            Err(ValidationError::InvalidGeoLocation { .. })
        );
        prop_assert!(is_invalid_geo);
    }

    #[test]
    fn geo_location_rejects_longitude_out_of_range(
        latitude in -90.0f64..=90.0,
        excess in 0.000_001f64..1_000.0,
        west in any::<bool>(),
    ) {
        let longitude = if west { -180.0 - excess } else { 180.0 + excess };
        prop_assert!(GeoLocation::new(latitude, longitude).is_err());
    }

    #[test]
    fn description_length_bounds(length in 0usize..1_100, padding in 0usize..4) {
        let text = format!("{}{}{}", " ".repeat(padding), "é".repeat(length), " ".repeat(padding));
        let result = ProblemDescription::new(&text);
        let in_range = (MIN_DESCRIPTION_LENGTH..=MAX_DESCRIPTION_LENGTH).contains(&length);

        prop_assert_eq!(result.is_ok(), in_range);
        if let Ok(description) = result {
            prop_assert_eq!(description.value().chars().count(), length);
        }
    }

    #[test]
    fn collection_days_ignore_order_and_duplicates(
        days in prop::collection::vec(week_day(), 1..20),
    ) {
        let forward = CollectionDays::new(days.clone()).unwrap();
        let backward = CollectionDays::new(days.iter().rev().copied()).unwrap();
        prop_assert_eq!(&forward, &backward);

        let canonical = forward.days();
        prop_assert!(canonical.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(days.iter().all(|day| forward.has_collection_on(*day)));
    }

    #[test]
    fn email_equality_ignores_case_and_surrounding_blanks(
        local in "[a-z0-9.]{1,12}",
        domain in "[a-z0-9]{1,10}\\.com",
        padding in 0usize..3,
    ) {
        let plain = Email::new(format!("{}@{}", local, domain)).unwrap();
        let noisy = Email::new(format!(
            "{}{}@{}{}",
            " ".repeat(padding),
            local.to_uppercase(),
            domain.to_uppercase(),
            "\t".repeat(padding)
        ))
        .unwrap();
        prop_assert_eq!(plain, noisy);
    }

    #[test]
    fn postal_code_keeps_only_digits(digits in "[0-9]{8}", separator in "[ .-]{0,2}") {
        let raw = format!("{}{}{}", &digits[..5], separator, &digits[5..]);
        let code = PostalCode::new(&raw).unwrap();
        prop_assert_eq!(code.value(), digits.as_str());
        prop_assert_eq!(code.formatted(), format!("{}-{}", &digits[..5], &digits[5..]));
    }
}

#[test]
fn test_geo_location_boundaries_inclusive() {
    for (lat, lng) in [(90.0, 180.0), (-90.0, -180.0), (0.0, 0.0)] {
        assert!(GeoLocation::new(lat, lng).is_ok(), "{} {}", lat, lng);
    }
    assert!(GeoLocation::new(90.0001, 0.0).is_err());
    assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
    assert!(GeoLocation::new(0.0, f64::INFINITY).is_err());
}

#[test]
fn test_postal_code_example() {
    let code = PostalCode::new("64000-000").unwrap();
    assert_eq!(code.value(), "64000000");
    assert_eq!(code.formatted(), "64000-000");
    assert!(matches!(
        PostalCode::new("6400-000"),
        Err(ValidationError::InvalidPostalCode { digits: 7, .. })
    ));
}

#[test]
fn test_collection_days_example() {
    let days = CollectionDays::new([WeekDay::Friday, WeekDay::Monday, WeekDay::Monday]).unwrap();
    assert_eq!(days.days(), &[WeekDay::Monday, WeekDay::Friday]);
    assert!(CollectionDays::new(Vec::<WeekDay>::new()).is_err());
    assert!(days.remove_days([WeekDay::Monday, WeekDay::Friday]).is_err());
}

#[test]
fn test_collection_time_examples() {
    let window = CollectionTime::new("08:00", "12:00").unwrap();
    assert_eq!(window.formatted_interval(), "08:00 - 12:00");
    assert_eq!(window.duration_minutes(), 240);

    assert!(CollectionTime::new("12:00", "06:00").is_err());
    assert!(CollectionTime::new("08:00", "08:00").is_err());
    assert!(CollectionTime::new("8:00", "12:00").is_err());
    assert!(CollectionTime::new("24:00", "23:00").is_err());
}

#[test]
fn test_accepted_materials_examples() {
    let materials = AcceptedMaterials::new([MaterialType::Plastic, MaterialType::Plastic]).unwrap();
    assert_eq!(materials.count(), 1);
    assert!(materials.accepts(MaterialType::Plastic));
    assert!(AcceptedMaterials::new(Vec::<MaterialType>::new()).is_err());

    let more = materials.add_materials([MaterialType::Glass]);
    assert_eq!(materials.count(), 1);
    assert_eq!(more.count(), 2);
}

#[test]
fn test_address_with_changes_leaves_original() {
    let address = Address::new("Rua A", "123", Some("   "), None, None).unwrap();
    assert_eq!(address.complement(), None);

    let moved = address
        .with_changes(AddressChanges {
            number: Some("456".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(moved.number(), "456");
    assert_eq!(address.number(), "123");
}

#[test]
fn test_description_and_justification_limits() {
    assert!(ProblemDescription::new("a".repeat(10)).is_ok());
    assert!(ProblemDescription::new("a".repeat(1000)).is_ok());
    assert!(ProblemDescription::new("a".repeat(9)).is_err());
    assert!(ProblemDescription::new("a".repeat(1001)).is_err());

    assert!(ProblemJustification::new("b".repeat(500)).is_ok());
    assert!(matches!(
        ProblemJustification::new("b".repeat(501)),
        Err(ValidationError::InvalidProblemJustification { length: 501, .. })
    ));
}

#[test]
fn test_protocol_generate_and_parse() {
    let protocol = ProblemProtocol::generate(2026, 1).unwrap();
    assert_eq!(protocol.value(), "PR-2026-0001");

    let parsed = ProblemProtocol::new("PR-2026-0042").unwrap();
    assert_eq!((parsed.year(), parsed.sequence()), (2026, 42));

    for bad in ["PR-26-0001", "pr-2026-0001", "PR-2026-001", "PR-2026-0000", "PR-2026-0001-1"] {
        assert!(ProblemProtocol::new(bad).is_err(), "{}", bad);
    }
    assert!(ProblemProtocol::generate(2026, 10_000).is_err());
}

#[test]
fn test_attachments_serialize_comma_joined() {
    let attachments = ProblemAttachments::from_string(" a.jpg , ,b.png,");
    assert_eq!(attachments.len(), 2);
    assert_eq!(attachments.serialize(), "a.jpg,b.png");
    assert!(ProblemAttachments::from_string("").is_empty());
}

#[test]
fn test_serde_cannot_bypass_validation() {
    assert!(serde_json::from_str::<Email>("\"not-an-email\"").is_err());
    assert!(serde_json::from_str::<CollectionDays>("\"\"").is_err());
    assert!(serde_json::from_str::<ProblemProtocol>("\"PR-2026-0000\"").is_err());

    let days: CollectionDays = serde_json::from_str("\"sunday,monday\"").unwrap();
    assert_eq!(serde_json::to_string(&days).unwrap(), "\"monday,sunday\"");
}
