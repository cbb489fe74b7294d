use marks_report::config::Weighting;
use marks_report::error::MarksError;
use marks_report::output::{publish, render_report, write_report};
use marks_report::parser::DiagnosticKind;
use marks_report::pipeline::Processor;
use marks_report::types::Grade;
use std::path::Path;

const FIXTURE: &str = "tests/fixtures/student_marks.txt";

#[test]
fn test_full_pipeline() {
    let run = Processor::default()
        .process_file(Path::new(FIXTURE))
        .expect("Failed to process fixture");

    let ids: Vec<_> = run.report.records().iter().map(|r| r.id.as_str()).collect();
    // S1008 and S1010 tie on 57.00 and keep their file order.
    assert_eq!(
        ids,
        vec!["S1003", "S1001", "S1009", "S1008", "S1010", "S1002", "S1004"]
    );

    let lines: Vec<_> = run.diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![7, 8, 9]);
    assert_eq!(
        run.diagnostics[0].kind,
        DiagnosticKind::InvalidFormat { fields: 4 }
    );
    assert_eq!(run.diagnostics[1].kind, DiagnosticKind::OutOfRange);
    assert_eq!(
        run.diagnostics[2].kind,
        DiagnosticKind::InvalidNumber {
            value: "sixty".to_string()
        }
    );

    let stats = run.report.statistics();
    assert_eq!(stats.total, 7);
    assert_eq!(stats.count(Grade::A), 3);
    assert_eq!(stats.count(Grade::B), 0);
    assert_eq!(stats.count(Grade::C), 2);
    assert_eq!(stats.count(Grade::D), 1);
    assert_eq!(stats.count(Grade::F), 1);
}

#[test]
fn test_report_written_to_disk_matches_render() {
    let run = Processor::default()
        .process_file(Path::new(FIXTURE))
        .unwrap();
    let path = std::env::temp_dir().join("marks_report_integration_report.txt");
    let _ = std::fs::remove_file(&path);

    write_report(&path, &run.report).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();

    assert_eq!(content, render_report(&run.report));
    assert!(content.contains("S1001           72.50    68.00        70.70      A    \n"));
    assert!(content.contains("S1004           30.00    35.00        32.00      F    \n"));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_statistics_survive_unwritable_output() {
    let run = Processor::default()
        .process_file(Path::new(FIXTURE))
        .unwrap();
    let path = std::env::temp_dir()
        .join("marks_report_missing_dir")
        .join("report.txt");
    let mut console = Vec::new();

    let err = publish(&run.report, &path, &mut console).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MarksError>(),
        Some(MarksError::OutputUnwritable { .. })
    ));

    let printed = String::from_utf8(console).unwrap();
    assert!(printed.contains("GRADE STATISTICS"));
    assert!(printed.contains("Total Students: 7"));
    assert!(!path.exists());
}

#[test]
fn test_comments_only_is_no_data() {
    let err = Processor::default()
        .process_file(Path::new("tests/fixtures/comments_only.txt"))
        .unwrap_err();

    assert!(matches!(err, MarksError::NoData { .. }));
    assert!(err.diagnostics().is_empty());
}

#[test]
fn test_missing_input_is_unreadable() {
    let err = Processor::default()
        .process_file(Path::new("tests/fixtures/does_not_exist.txt"))
        .unwrap_err();

    assert!(matches!(err, MarksError::InputUnreadable { .. }));
}

#[test]
fn test_custom_weighting_changes_ranking() {
    let weighting = Weighting::new(0.0, 1.0).unwrap();
    let run = Processor::new(weighting)
        .process_lines(["S1 100 10", "S2 0 90"])
        .unwrap();

    assert_eq!(run.report.records()[0].id, "S2");
    assert!(render_report(&run.report).contains("Weighting: Exam 0%, Coursework 100%"));
}
