use chrono::{
    TimeZone,
    Utc,
};
use uuid::Uuid;

use super::*;
use crate::model::*;

fn record(source: Source, level: u32) -> NodeRecord {
    NodeRecord {
        timestamp: Utc.with_ymd_and_hms(2025, 7, 14, 9, 51, 36).unwrap(),
        id: Uuid::parse_str("00416e00-148b-49d1-ba25-ce1ecb8783b5").unwrap(),
        health: 123.45,
        session_id: Uuid::parse_str("f4b2a2e6-5a7b-4a2a-bcf1-6e2b8e0f9c98").unwrap(),
        source,
        level,
    }
}

#[rstest]
fn test_root_record_json() {
    let json = serde_json::to_string(&record(Source::Root, 1)).unwrap();
    assert_eq!(
        json,
        r#"{"timestamp":"2025-07-14T09:51:36.000Z","id":"00416e00-148b-49d1-ba25-ce1ecb8783b5","health":123.45,"session_id":"f4b2a2e6-5a7b-4a2a-bcf1-6e2b8e0f9c98","source":"CDN","level":1}"#
    );
}

#[rstest]
fn test_child_record_parses_back() {
    let parent = Uuid::parse_str("0f0e0d0c-0b0a-4908-8706-050403020100").unwrap();
    let original = record(Source::Node(parent), 7);

    let json = serde_json::to_string(&original).unwrap();
    assert!(json.contains(r#""source":"0f0e0d0c-0b0a-4908-8706-050403020100""#));

    let parsed: NodeRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, original);
}

#[rstest]
#[case::sentinel("CDN", Some(Source::Root))]
#[case::garbage("not-a-node", None)]
fn test_source_from_str(#[case] input: &str, #[case] expected: Option<Source>) {
    assert_eq!(input.parse::<Source>().ok(), expected);
}
