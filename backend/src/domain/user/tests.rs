//! Tests for the domain user model.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("fixed timestamp is valid")
}

#[fixture]
fn user() -> User {
    User {
        first_name: "A".into(),
        last_name: "B".into(),
        mobile: "123".into(),
        email: "a@b.com".into(),
        ..User::default()
    }
}

#[rstest]
#[case("a@b.com")]
#[case("first.last@sub.example.org")]
#[case("x@y")]
fn validate_accepts_single_separator(#[case] email: &str) {
    let user = User {
        email: email.into(),
        ..User::default()
    };
    assert!(user.validate().is_ok());
}

#[rstest]
fn validate_skips_empty_email() {
    assert!(User::default().validate().is_ok());
}

#[rstest]
#[case("plainaddress")]
#[case("a@b@c.com")]
#[case("@@")]
#[case("@b.com")]
#[case("a@")]
fn validate_rejects_malformed_email(#[case] email: &str) {
    let user = User {
        email: email.into(),
        ..User::default()
    };
    assert_eq!(user.validate(), Err(UserValidationError::InvalidEmail));
}

#[rstest]
fn validate_email_rejects_empty_input() {
    assert_eq!(validate_email(""), Err(UserValidationError::InvalidEmail));
}

#[rstest]
fn set_defaults_fills_missing_timestamps(mut user: User, now: DateTime<Utc>) {
    user.set_defaults(now);

    assert_eq!(user.created_at, Some(now));
    assert_eq!(user.updated_at, Some(now));
}

#[rstest]
fn set_defaults_is_idempotent(mut user: User, now: DateTime<Utc>) {
    user.set_defaults(now);
    let later = now + chrono::Duration::hours(1);
    user.set_defaults(later);

    assert_eq!(user.created_at, Some(now));
    assert_eq!(user.updated_at, Some(now));
}

#[rstest]
fn set_defaults_keeps_partial_values(mut user: User, now: DateTime<Utc>) {
    let earlier = now - chrono::Duration::days(1);
    user.created_at = Some(earlier);

    user.set_defaults(now);

    assert_eq!(user.created_at, Some(earlier));
    assert_eq!(user.updated_at, Some(now));
}

#[rstest]
fn set_defaults_truncates_to_microseconds(mut user: User, now: DateTime<Utc>) {
    let precise = now + chrono::Duration::nanoseconds(123_456_789);
    user.updated_at = Some(now + chrono::Duration::nanoseconds(999));

    user.set_defaults(precise);

    assert_eq!(
        user.created_at,
        Some(now + chrono::Duration::microseconds(123_456))
    );
    assert_eq!(user.updated_at, Some(now));
}

#[rstest]
fn sanitize_trims_all_string_fields() {
    let mut user = User {
        first_name: " A ".into(),
        last_name: "\tB".into(),
        mobile: "123\n".into(),
        email: "  a@b  ".into(),
        ..User::default()
    };

    user.sanitize();

    assert_eq!(user.first_name, "A");
    assert_eq!(user.last_name, "B");
    assert_eq!(user.mobile, "123");
    assert_eq!(user.email, "a@b");
}

#[rstest]
fn serialises_camel_case_without_unset_timestamps(user: User) {
    let value = serde_json::to_value(&user).expect("serialise user");

    assert_eq!(
        value,
        json!({
            "firstName": "A",
            "lastName": "B",
            "mobile": "123",
            "email": "a@b.com",
        })
    );
}

#[rstest]
fn deserialises_partial_payload_with_defaults() {
    let user: User =
        serde_json::from_value(json!({ "email": "a@b.com" })).expect("deserialise user");

    assert_eq!(user.email, "a@b.com");
    assert!(user.first_name.is_empty());
    assert!(user.created_at.is_none());
}

#[rstest]
fn timestamps_round_trip_as_rfc3339(mut user: User, now: DateTime<Utc>) {
    user.set_defaults(now);

    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(value["createdAt"], json!("2024-05-01T12:00:00Z"));

    let parsed: User = serde_json::from_value(value).expect("deserialise user");
    assert_eq!(parsed, user);
}
