//! Unit tests for invalidation record matching

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::entities::revocation::{InvalidationRecord, RevocationQuery};
use crate::domain::entities::token::TokenClass;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_record_truncates_to_second() {
    let record = InvalidationRecord::new("user-1", t0() + Duration::milliseconds(750));
    assert_eq!(record.invalidated_at, t0());
}

#[test]
fn test_expiry_is_lifetime_plus_buffer() {
    let record = InvalidationRecord::new("user-1", t0())
        .expiring_after(Duration::hours(72), Duration::minutes(2));
    assert_eq!(record.expires_at, t0() + Duration::hours(72) + Duration::minutes(2));
    assert!(!record.is_expired_at(t0() + Duration::hours(72)));
    assert!(record.is_expired_at(t0() + Duration::hours(73)));
}

#[test]
fn test_wildcard_record_matches_everything_earlier() {
    let record = InvalidationRecord::new("user-1", t0());

    let access = RevocationQuery::new("user-1", TokenClass::Access, t0() - Duration::minutes(1));
    let refresh = RevocationQuery::new("user-1", TokenClass::Refresh, t0())
        .with_device(Some("phone".to_string()))
        .with_token_id(Some("jti-1".to_string()));

    assert!(record.matches(&access));
    assert!(record.matches(&refresh));
}

#[test]
fn test_later_tokens_are_not_matched() {
    let record = InvalidationRecord::new("user-1", t0());
    let query = RevocationQuery::new("user-1", TokenClass::Access, t0() + Duration::seconds(1));
    assert!(!record.matches(&query));
}

#[test]
fn test_same_second_resolves_to_revoked() {
    let record = InvalidationRecord::new("user-1", t0());
    let query = RevocationQuery::new("user-1", TokenClass::Access, t0());
    assert!(record.matches(&query));
}

#[test]
fn test_other_subject_is_not_matched() {
    let record = InvalidationRecord::new("user-1", t0());
    let query = RevocationQuery::new("user-2", TokenClass::Access, t0());
    assert!(!record.matches(&query));
}

#[test]
fn test_device_scope() {
    let record = InvalidationRecord::new("user-1", t0()).for_device("phone");

    let phone = RevocationQuery::new("user-1", TokenClass::Refresh, t0())
        .with_device(Some("phone".to_string()));
    let laptop = RevocationQuery::new("user-1", TokenClass::Refresh, t0())
        .with_device(Some("laptop".to_string()));
    let unscoped = RevocationQuery::new("user-1", TokenClass::Access, t0());

    assert!(record.matches(&phone));
    assert!(!record.matches(&laptop));
    assert!(!record.matches(&unscoped));
}

#[test]
fn test_class_scope() {
    let record = InvalidationRecord::new("user-1", t0()).for_class(TokenClass::Refresh);

    assert!(record.matches(&RevocationQuery::new("user-1", TokenClass::Refresh, t0())));
    assert!(!record.matches(&RevocationQuery::new("user-1", TokenClass::Access, t0())));
}

#[test]
fn test_token_scope() {
    let record = InvalidationRecord::new("user-1", t0())
        .for_device("phone")
        .for_class(TokenClass::Refresh)
        .for_token("jti-1");

    let consumed = RevocationQuery::new("user-1", TokenClass::Refresh, t0())
        .with_device(Some("phone".to_string()))
        .with_token_id(Some("jti-1".to_string()));
    let replacement = consumed.clone().with_token_id(Some("jti-2".to_string()));

    assert!(record.matches(&consumed));
    assert!(!record.matches(&replacement));
}
