//! Tests for the user value types.

use super::*;
use chrono::{Duration, TimeZone};
use rstest::{fixture, rstest};

#[fixture]
fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn user(created_at: DateTime<Utc>) -> User {
    User::new(UserDraft {
        id: UserId::new(1),
        name: UserName::new("Ann").expect("valid name"),
        email: EmailAddress::new("a@x.com").expect("valid email"),
        age: 20,
        created_at,
        updated_at: created_at,
    })
}

#[rstest]
#[case("1", 1)]
#[case("42", 42)]
#[case("18446744073709551615", u64::MAX)]
fn user_id_parses_unsigned_integers(#[case] raw: &str, #[case] expected: u64) {
    let id: UserId = raw.parse().expect("valid id");
    assert_eq!(id.get(), expected);
}

#[rstest]
#[case("")]
#[case("abc")]
#[case("-1")]
#[case("1.5")]
#[case("18446744073709551616")]
fn user_id_rejects_non_numeric_text(#[case] raw: &str) {
    assert_eq!(raw.parse::<UserId>(), Err(UserValidationError::InvalidId));
}

#[rstest]
fn user_name_rejects_empty_text() {
    assert_eq!(UserName::new(""), Err(UserValidationError::EmptyName));
}

#[rstest]
fn user_name_keeps_text_verbatim() {
    let name = UserName::new("Ada Lovelace").expect("valid name");
    assert_eq!(name.as_ref(), "Ada Lovelace");
}

#[rstest]
#[case("ann@x.com")]
#[case("first.last+tag@sub.example.org")]
#[case("o'brien@example.ie")]
fn email_accepts_valid_addresses(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), raw);
}

#[rstest]
#[case("ann", UserValidationError::InvalidEmail)]
#[case("ann@", UserValidationError::InvalidEmail)]
#[case("@x.com", UserValidationError::InvalidEmail)]
#[case("ann smith@x.com", UserValidationError::InvalidEmail)]
#[case("ann@-x.com", UserValidationError::InvalidEmail)]
#[case("ann@x", UserValidationError::InvalidEmail)]
#[case("ann@localhost", UserValidationError::InvalidEmail)]
#[case("", UserValidationError::EmptyEmail)]
fn email_rejects_invalid_addresses(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw), Err(expected));
}

#[rstest]
fn record_state_round_trips_deleted_at(created_at: DateTime<Utc>) {
    assert_eq!(RecordState::from_deleted_at(None), RecordState::Active);
    assert!(RecordState::Active.is_active());

    let deleted = RecordState::from_deleted_at(Some(created_at));
    assert!(!deleted.is_active());
    assert_eq!(deleted.deleted_at(), Some(created_at));
}

#[rstest]
fn setters_replace_individual_fields(mut user: User) {
    user.set_age(30);
    assert_eq!(user.age(), 30);
    assert_eq!(user.name().as_ref(), "Ann");
    assert_eq!(user.email().as_ref(), "a@x.com");

    user.set_email(EmailAddress::new("b@x.com").expect("valid email"));
    user.set_name(UserName::new("Bea").expect("valid name"));
    assert_eq!(user.email().as_ref(), "b@x.com");
    assert_eq!(user.name().as_ref(), "Bea");
}

#[rstest]
fn touch_never_moves_updated_at_backwards(mut user: User, created_at: DateTime<Utc>) {
    let later = created_at + Duration::minutes(5);
    user.touch(later);
    assert_eq!(user.updated_at(), later);

    user.touch(created_at);
    assert_eq!(user.updated_at(), later);
    assert_eq!(user.created_at(), created_at);
}
