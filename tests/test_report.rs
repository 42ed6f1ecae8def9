use std::path::Path;

use scaffold_kit::Report;
use scaffold_kit::materialize::Outcome;

#[test]
fn test_report_success_and_exit_code() {
    let mut report = Report::new();
    report.record(Path::new("a.ts"), Outcome::Created, false);
    report.add_note("hello");
    assert!(report.is_success());
    assert_eq!(report.exit_code(), 0);

    report.add_error("b.ts: boom");
    assert!(!report.is_success());
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn test_report_dry_run_prefix() {
    let mut report = Report::new();
    report.record(Path::new("a.ts"), Outcome::Created, true);
    report.record(Path::new("b.ts"), Outcome::Updated, true);
    assert_eq!(report.created, vec!["[dry-run] a.ts"]);
    assert_eq!(report.updated, vec!["[dry-run] b.ts"]);
}

#[test]
fn test_report_summary_format() {
    let mut report = Report::new();
    report.record(Path::new("a.ts"), Outcome::Created, false);
    report.record(Path::new("b.ts"), Outcome::Skipped, false);
    report.add_note("n1");
    report.add_error("e1");

    let expected = "=== demo summary ===\n\
        created: 1\n  + a.ts\n\
        updated: 0\n\
        skipped: 1\n  - skip existing (use --force to overwrite): b.ts\n\
        notes:\n  * n1\n\
        errors:\n  ! e1\n";
    assert_eq!(report.summary("demo"), expected);
}

#[test]
fn test_report_summary_omits_empty_notes_and_errors() {
    let summary = Report::new().summary("demo");
    assert!(!summary.contains("notes:"));
    assert!(!summary.contains("errors:"));
}

#[test]
fn test_report_serializes_channels() {
    let mut report = Report::new();
    report.record(Path::new("a.ts"), Outcome::Created, false);
    report.add_note("n1");

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["created"], serde_json::json!(["a.ts"]));
    assert_eq!(value["notes"], serde_json::json!(["n1"]));
    assert_eq!(value["errors"], serde_json::json!([]));
}
