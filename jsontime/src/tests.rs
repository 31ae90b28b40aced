//! Tests for jsontime types.

use super::*;
use chrono::{DateTime, TimeZone, Utc};

#[test]
fn test_iso_marshal_json() {
    let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    let ts = Iso::new(dt);

    let data = serde_json::to_string(&ts).unwrap();
    assert_eq!(data, "\"2024-01-15T10:30:00.000000Z\"");
}

#[test]
fn test_iso_unmarshal_json() {
    let ts: Iso = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();
    let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    assert_eq!(ts.datetime(), expected);
}

#[test]
fn test_iso_unmarshal_offset_normalizes_to_utc() {
    let ts: Iso = serde_json::from_str("\"2024-01-15T18:30:00+08:00\"").unwrap();
    assert_eq!(ts.to_string(), "2024-01-15T10:30:00.000000Z");
}

#[test]
fn test_iso_unmarshal_rejects_garbage() {
    assert!(serde_json::from_str::<Iso>("\"yesterday\"").is_err());
    assert!(serde_json::from_str::<Iso>("1705315800").is_err());
}

#[test]
fn test_iso_round_trip_is_exact() {
    let original = Iso::now();
    let data = serde_json::to_string(&original).unwrap();
    let restored: Iso = serde_json::from_str(&data).unwrap();
    assert_eq!(original, restored);
}

#[test]
fn test_iso_truncates_to_micros() {
    let dt = DateTime::parse_from_rfc3339("2024-01-15T10:30:00.123456789Z")
        .unwrap()
        .with_timezone(&Utc);
    let ts = Iso::new(dt);
    assert_eq!(ts.datetime().timestamp_subsec_nanos(), 123_456_000);
}

#[test]
fn test_iso_now_after_is_strictly_later() {
    let far_future = Iso::new(Utc.with_ymd_and_hms(2999, 1, 1, 0, 0, 0).unwrap());
    let bumped = Iso::now_after(&far_future);
    assert!(bumped.after(&far_future));
    assert_eq!(
        bumped.datetime() - far_future.datetime(),
        chrono::Duration::microseconds(1)
    );

    let past = Iso::new(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
    let now = Iso::now_after(&past);
    assert!(now.after(&past));
}

#[test]
fn test_iso_from_str() {
    let ts: Iso = "2024-01-15T10:30:00.5Z".parse().unwrap();
    assert_eq!(ts.to_string(), "2024-01-15T10:30:00.500000Z");

    let err = "not-a-time".parse::<Iso>().unwrap_err();
    assert!(err.to_string().contains("not-a-time"));
}
