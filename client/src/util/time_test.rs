use super::*;

#[test]
fn now_secs_is_after_2020() {
    assert!(now_secs() > 1_577_836_800);
}

#[test]
fn member_since_formats_rfc3339() {
    assert_eq!(member_since(Some("2024-03-05T10:20:30Z")).as_deref(), Some("March 5, 2024"));
}

#[test]
fn member_since_accepts_fractional_seconds_and_offsets() {
    assert_eq!(
        member_since(Some("2023-11-21T08:00:00.123456+00:00")).as_deref(),
        Some("November 21, 2023")
    );
}

#[test]
fn member_since_rejects_missing_or_garbage() {
    assert_eq!(member_since(None), None);
    assert_eq!(member_since(Some("yesterday")), None);
}
