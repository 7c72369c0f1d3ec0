//! Tests for step sequence ingestion (plain logs and search payloads)

use std::sync::Arc;

use tempfile::TempDir;

use alchetree::application::services::SequenceService;
use alchetree::application::ApplicationError;
use alchetree::infrastructure::traits::RealFileSystem;

fn service() -> SequenceService {
    SequenceService::new(Arc::new(RealFileSystem))
}

// ============================================================
// Plain step logs
// ============================================================

#[test]
fn given_plain_log_when_parsing_then_returns_steps_in_order() {
    // Act
    let steps =
        SequenceService::parse_lines("air + air = pressure\nearth + pressure = stone\n").unwrap();

    // Assert
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].result, "pressure");
    assert_eq!(steps[1].result, "stone");
}

#[test]
fn given_blank_lines_when_parsing_then_skips_them() {
    // Act
    let steps = SequenceService::parse_lines(
        "air + air = pressure\n\n   \nearth + pressure = stone\n",
    )
    .unwrap();

    // Assert
    assert_eq!(steps.len(), 2);
}

#[test]
fn given_malformed_line_when_parsing_then_reports_original_line_number() {
    // Act
    let err = SequenceService::parse_lines("air + air = pressure\n\nbogus line\n").unwrap_err();

    // Assert: blank lines still count towards the reported number
    match err {
        ApplicationError::Sequence { line, .. } => assert_eq!(line, 3),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn given_empty_content_when_parsing_then_no_steps() {
    // Act
    let steps = SequenceService::parse_lines("").unwrap();

    // Assert: an empty load is not an error here; building the tree is what
    // rejects an empty sequence
    assert!(steps.is_empty());
}

#[test]
fn given_log_file_when_loading_then_reads_steps() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("steps.log");
    std::fs::write(&path, "air + air = pressure\nearth + pressure = stone\n").unwrap();

    // Act
    let steps = service().load_plain(&path).unwrap();

    // Assert
    assert_eq!(steps.len(), 2);
}

#[test]
fn given_missing_file_when_loading_then_errors_with_path() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.log");

    // Act
    let err = service().load_plain(&path).unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("absent.log"));
}

// ============================================================
// Search payloads: single outcome
// ============================================================

#[test]
fn given_single_outcome_when_parsing_payload_then_one_record() {
    // Arrange
    let payload = r#"{"found": true, "steps": ["air + air = pressure"]}"#;

    // Act
    let records = SequenceService::parse_payload(payload).unwrap();

    // Assert
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].steps, vec!["air + air = pressure"]);
    assert!(records[0].runtime.is_none());
    assert!(records[0].nodes_visited.is_none());
}

#[test]
fn given_not_found_outcome_when_parsing_payload_then_errors() {
    // Arrange
    let payload = r#"{"found": false, "steps": []}"#;

    // Act
    let err = SequenceService::parse_payload(payload).unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::NoPathFound));
}

#[test]
fn given_found_without_steps_when_parsing_payload_then_errors() {
    // Arrange
    let payload = r#"{"found": true, "steps": []}"#;

    // Act
    let err = SequenceService::parse_payload(payload).unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::EmptyPayload));
}

// ============================================================
// Search payloads: multi-path batch
// ============================================================

#[test]
fn given_batch_payload_when_parsing_then_normalizes_records() {
    // Arrange
    let payload = r#"[
        {
            "Path1": ["air + air = pressure", "earth + pressure = stone"],
            "Runtime": ["12.5ms"],
            "NodesVisited": ["42"]
        },
        {"Path2": ["fire + water = steam"]}
    ]"#;

    // Act
    let records = SequenceService::parse_payload(payload).unwrap();

    // Assert
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].steps.len(), 2);
    assert_eq!(records[0].runtime.as_deref(), Some("12.5ms"));
    assert_eq!(records[0].nodes_visited, Some(42));
    assert_eq!(records[1].steps, vec!["fire + water = steam"]);
    assert!(records[1].runtime.is_none());
    assert!(records[1].nodes_visited.is_none());
}

#[test]
fn given_empty_batch_when_parsing_then_no_records() {
    // Act
    let records = SequenceService::parse_payload("[]").unwrap();

    // Assert: a search that found nothing is an empty batch, not a parse
    // error; callers decide how to report it
    assert!(records.is_empty());
}

#[test]
fn given_unparseable_visit_count_when_parsing_then_drops_it() {
    // Arrange
    let payload = r#"[{"Path1": ["a + b = c"], "Runtime": ["7ns"], "NodesVisited": ["n/a"]}]"#;

    // Act
    let records = SequenceService::parse_payload(payload).unwrap();

    // Assert: the runtime stays, the unparseable count is dropped
    assert_eq!(records[0].runtime.as_deref(), Some("7ns"));
    assert!(records[0].nodes_visited.is_none());
}

#[test]
fn given_record_without_path_key_when_parsing_then_errors() {
    // Arrange
    let payload = r#"[{"Runtime": ["1ns"]}]"#;

    // Act
    let err = SequenceService::parse_payload(payload).unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::Payload { .. }));
    assert!(err.to_string().contains("no Path key"));
}

#[test]
fn given_scalar_payload_when_parsing_then_errors() {
    // Act
    let err = SequenceService::parse_payload("42").unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::Payload { .. }));
}

#[test]
fn given_invalid_json_when_parsing_then_errors() {
    // Act
    let err = SequenceService::parse_payload("{not json").unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::Payload { .. }));
}

#[test]
fn given_payload_file_when_loading_then_reads_records() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("paths.json");
    std::fs::write(&path, r#"[{"Path1": ["air + air = pressure"]}]"#).unwrap();

    // Act
    let records = service().load_records(&path).unwrap();

    // Assert
    assert_eq!(records.len(), 1);
}

// ============================================================
// Record step parsing
// ============================================================

#[test]
fn given_record_with_bad_step_when_parsing_steps_then_numbers_from_1() {
    // Arrange
    let payload = r#"[{"Path1": ["air + air = pressure", "broken"]}]"#;
    let records = SequenceService::parse_payload(payload).unwrap();

    // Act
    let err = records[0].parse_steps().unwrap_err();

    // Assert
    match err {
        ApplicationError::Sequence { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn given_record_when_parsing_steps_then_order_preserved() {
    // Arrange
    let payload = r#"[{"Path1": ["air + air = pressure", "earth + pressure = stone"]}]"#;
    let records = SequenceService::parse_payload(payload).unwrap();

    // Act
    let steps = records[0].parse_steps().unwrap();

    // Assert
    assert_eq!(steps[0].result, "pressure");
    assert_eq!(steps[1].result, "stone");
}
