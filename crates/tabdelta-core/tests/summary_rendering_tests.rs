#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Datasets loaded from JSON, diffed, then rendered.

use tabdelta_core::diff::{diff, render_summary, result_digest};
use tabdelta_core::model::{Dataset, KeySpec};

const OLD: &str = r#"{
  "columns": ["id", "name", "age"],
  "rows": [
    {"id": 1, "name": "Ann", "age": 30},
    {"id": 2, "name": "Bob", "age": null},
    {"id": 4, "name": "Dee | Dan", "age": 51}
  ]
}"#;

const NEW: &str = r#"{
  "columns": ["id", "name", "city"],
  "rows": [
    {"id": 2, "name": "Bobby", "city": "Oslo"},
    {"id": 3, "name": "Cid"},
    {"id": 4, "name": " Dee | Dan ", "city": "Rome"}
  ]
}"#;

fn load(text: &str) -> Dataset {
    serde_json::from_str(text).unwrap()
}

#[test]
fn test_summary_lists_every_present_table() {
    let result = diff(&load(OLD), &load(NEW), &KeySpec::single("id")).unwrap();
    let summary = render_summary(&result);

    assert!(summary.contains("| removed_rows | 1 |"));
    assert!(summary.contains("| added_rows | 1 |"));
    assert!(summary.contains("| changed_rows | 2 |"));
    assert!(summary.contains("| removed_columns | 2 |"));
    assert!(summary.contains("| added_columns | 2 |"));

    assert!(summary.contains("### Removed columns"));
    assert!(summary.contains("| id | age |"));
    assert!(summary.contains("| 2 |  |"));
    assert!(summary.contains("### Added columns"));
    assert!(summary.contains("| 4 | Rome |"));
}

#[test]
fn test_summary_escapes_pipes_and_skips_rows_equal_after_trim() {
    let result = diff(&load(OLD), &load(NEW), &KeySpec::single("id")).unwrap();
    let summary = render_summary(&result);

    assert!(summary.contains("| 2 | **Bob ---> Bobby** |"));
    // Row 4 differs only by surrounding whitespace.
    assert!(!summary.contains("| 4 | Dee \\| Dan |"));
    assert!(summary.contains("| 1 | Ann | 30 |"));
}

#[test]
fn test_json_result_shape() {
    let result = diff(&load(OLD), &load(NEW), &KeySpec::single("id")).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["changed_rows"]["columns"], serde_json::json!(["name"]));
    assert_eq!(json["changed_rows"]["rows"][0]["cells"][0], "Bob ---> Bobby");
    assert_eq!(json["added_rows"]["rows"][0]["cells"], serde_json::json!(["Cid", null]));
    assert!(json["warnings"].as_array().unwrap().is_empty());
    assert_eq!(result_digest(&result).unwrap().len(), 64);
}

#[test]
fn test_invalid_dataset_json_rejected() {
    let undeclared = r#"{"columns": ["id"], "rows": [{"id": 1, "x": 2}]}"#;
    assert!(serde_json::from_str::<Dataset>(undeclared).is_err());

    let nested = r#"{"columns": ["id"], "rows": [{"id": [1]}]}"#;
    assert!(serde_json::from_str::<Dataset>(nested).is_err());
}
