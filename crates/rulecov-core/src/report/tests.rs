#![allow(clippy::expect_used)]

use super::*;
use crate::log::LogError;

fn line(event: &str, name: &str) -> String {
    format!("{{\"type\":\"test\",\"event\":\"{event}\",\"name\":\"{name}\"}}\n")
}

fn report_for(checklist: &Checklist, content: &str) -> String {
    generate(checklist, content)
        .expect("valid log")
        .to_markdown()
}

fn status_of(report: &Report, rule: i64, subcase: i64) -> CaseStatus {
    report
        .outcomes()
        .find(|case| case.rule == rule && case.subcase == subcase)
        .map(|case| case.status)
        .expect("case in report")
}

// ── header and layout ──────────────────────────────────────────────────────

#[test]
fn exact_layout_for_small_checklist() {
    let checklist = Checklist::new([(1, vec![1, 2]), (2, vec![1])]);
    let out = report_for(&checklist, &line("ok", "foo__1_1"));
    assert_eq!(
        out,
        "# Test Report for JACK-Validator\n\
         Version: \n\
         Tested on:  \n\
         \n\
         \n\
         ## Tests for Rule #1\n\
         Rule #1.1 has passed.\n\
         Rule #1.2 is missing from tests.\n\
         \n\
         ## Tests for Rule #2\n\
         Test #2.1 is missing from tests.\n\
         \n"
    );
}

#[test]
fn empty_checklist_renders_header_only() {
    let out = report_for(&Checklist::default(), &line("ok", "foo__1_1"));
    assert_eq!(
        out,
        "# Test Report for JACK-Validator\nVersion: \nTested on:  \n\n\n"
    );
}

#[test]
fn sections_follow_checklist_order() {
    let checklist = Checklist::new([(7, vec![0]), (2, vec![3, 1])]);
    let out = report_for(&checklist, "");
    let seven = out.find("## Tests for Rule #7").expect("rule 7");
    let two = out.find("## Tests for Rule #2").expect("rule 2");
    assert!(seven < two);
    let three = out.find("Test #2.3").expect("2.3");
    let one = out.find("Test #2.1").expect("2.1");
    assert!(three < one);
}

// ── pass / fail resolution ─────────────────────────────────────────────────

#[test]
fn concrete_pass_and_missing_scenario() {
    let checklist = Checklist::new([(1, vec![1, 2])]);
    let out = report_for(&checklist, &line("ok", "foo__1_1"));
    assert!(out.contains("Rule #1.1 has passed."), "report: {out}");
    assert!(out.contains("Rule #1.2 is missing from tests."), "report: {out}");
}

#[test]
fn ok_then_fail_is_failed() {
    let checklist = Checklist::new([(1, vec![1])]);
    let content = format!("{}{}", line("ok", "a__1_1"), line("failed", "b__1_1"));
    let report = generate(&checklist, &content).expect("valid log");
    assert_eq!(status_of(&report, 1, 1), CaseStatus::Failed);
}

#[test]
fn fail_then_ok_is_failed() {
    let checklist = Checklist::new([(1, vec![1])]);
    let content = format!("{}{}", line("failed", "a__1_1"), line("ok", "b__1_1"));
    let report = generate(&checklist, &content).expect("valid log");
    assert_eq!(status_of(&report, 1, 1), CaseStatus::Failed);
}

#[test]
fn repeated_ok_runs_pass() {
    let checklist = Checklist::new([(1, vec![1])]);
    let content = format!("{}{}", line("ok", "a__1_1"), line("ok", "b__1_1"));
    let report = generate(&checklist, &content).expect("valid log");
    assert_eq!(status_of(&report, 1, 1), CaseStatus::Passed);
    assert_eq!(report.outcomes().next().map(|case| case.runs), Some(2));
}

#[test]
fn ignored_counts_as_failure() {
    let checklist = Checklist::new([(1, vec![1])]);
    let report = generate(&checklist, &line("ignored", "a__1_1")).expect("valid log");
    assert_eq!(status_of(&report, 1, 1), CaseStatus::Failed);
}

#[test]
fn started_only_case_is_missing() {
    let checklist = Checklist::new([(1, vec![1])]);
    let out = report_for(&checklist, &line("started", "foo__1_1"));
    assert!(out.contains("Test #1.1 is missing from tests."), "report: {out}");
}

#[test]
fn resolve_distinguishes_missing_wordings() {
    let mut results = ResultsTable::new();
    results.record(1, 1, CaseRecord::new("a", "ok"));
    assert_eq!(CaseStatus::resolve(&results, 1, 2), CaseStatus::CaseMissing);
    assert_eq!(CaseStatus::resolve(&results, 2, 1), CaseStatus::RuleMissing);
}

// ── ranges ─────────────────────────────────────────────────────────────────

#[test]
fn range_covers_rectangle() {
    let checklist = Checklist::new([(1, vec![1, 2]), (2, vec![1, 2])]);
    let report = generate(&checklist, &line("ok", "block__1_1_to_2_2")).expect("valid log");
    for (rule, subcase) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
        assert_eq!(status_of(&report, rule, subcase), CaseStatus::Passed);
    }
    assert_eq!(report.summary.passed, 4);
}

#[test]
fn failing_range_fails_every_case() {
    let checklist = Checklist::new([(3, vec![1, 2, 3])]);
    let content = format!(
        "{}{}",
        line("ok", "single__3_2"),
        line("failed", "block__3_1_to_3_3")
    );
    let report = generate(&checklist, &content).expect("valid log");
    for subcase in 1..=3 {
        assert_eq!(status_of(&report, 3, subcase), CaseStatus::Failed);
    }
}

#[test]
fn any_middle_token_spans_the_block() {
    let checklist = Checklist::new([(1, vec![1, 2]), (2, vec![1, 2])]);
    let report = generate(&checklist, &line("ok", "block__1_1_x_2_2")).expect("valid log");
    assert_eq!(report.summary.passed, 4);
}

#[test]
fn huge_range_resolves_without_expansion() {
    let checklist = Checklist::new([(1, vec![0, 1]), (2, vec![0])]);
    let report =
        generate(&checklist, &line("ok", "wide__1_0_to_1_4000000000")).expect("valid log");
    assert_eq!(status_of(&report, 1, 0), CaseStatus::Passed);
    assert_eq!(status_of(&report, 1, 1), CaseStatus::Passed);
    assert_eq!(status_of(&report, 2, 0), CaseStatus::RuleMissing);
}

#[test]
fn negative_numbers_match_checklist_entries() {
    let checklist = Checklist::new([(-1, vec![-2])]);
    let report = generate(&checklist, &line("ok", "neg__-1_-2")).expect("valid log");
    assert_eq!(status_of(&report, -1, -2), CaseStatus::Passed);
    assert!(report.to_markdown().contains("Rule #-1.-2 has passed."));
}

// ── summary and missing table ──────────────────────────────────────────────

#[test]
fn summary_counts_every_checklist_case_once() {
    let checklist = Checklist::jack_validator();
    let content = format!(
        "{}{}{}",
        line("ok", "a__1_1"),
        line("failed", "b__1_2"),
        line("ok", "c__99_1")
    );
    let report = generate(&checklist, &content).expect("valid log");
    assert_eq!(report.summary.passed, 1);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.total(), checklist.len());
    assert_eq!(report.outcomes().count(), checklist.len());
    assert_eq!(report.summary.to_string(), format!("1 passed, 1 failed, {} missing", checklist.len() - 2));
}

#[test]
fn missing_table_in_checklist_order() {
    let checklist = Checklist::new([(2, vec![3, 1, 2]), (1, vec![1]), (5, vec![0])]);
    let content = format!("{}{}", line("ok", "a__2_1"), line("ok", "b__1_1"));
    let report = generate(&checklist, &content).expect("valid log");
    assert_eq!(report.missing(), vec![(2, vec![3, 2]), (5, vec![0])]);
}

#[test]
fn cases_outside_checklist_are_not_reported() {
    let checklist = Checklist::new([(1, vec![1])]);
    let out = report_for(&checklist, &line("ok", "a__1_5"));
    assert!(!out.contains("1.5"), "report: {out}");
    assert!(out.contains("Rule #1.1 is missing from tests."), "report: {out}");
}

// ── determinism and errors ─────────────────────────────────────────────────

#[test]
fn same_log_renders_identically() {
    let checklist = Checklist::jack_validator();
    let content = format!(
        "{}{}{}",
        line("ok", "a__3_1_to_3_7"),
        line("failed", "b__9_2"),
        line("ok", "c__6_0")
    );
    assert_eq!(
        report_for(&checklist, &content),
        report_for(&checklist, &content)
    );
}

#[test]
fn malformed_name_fails_generation() {
    let checklist = Checklist::jack_validator();
    let err = generate(&checklist, &line("ok", "foo__1_2_3")).expect_err("should fail");
    assert!(matches!(err, LogError::Identifier { line: 1, .. }));
}

#[test]
fn blank_line_fails_generation() {
    let checklist = Checklist::jack_validator();
    let content = format!("{}\n{}", line("ok", "a__1_1"), line("ok", "b__1_2"));
    let err = generate(&checklist, &content).expect_err("should fail");
    assert!(matches!(err, LogError::InvalidJson { line: 2, .. }));
}

#[test]
fn json_serialization_uses_snake_case_statuses() {
    let checklist = Checklist::new([(1, vec![1, 2]), (2, vec![1])]);
    let report = generate(&checklist, &line("failed", "a__1_1")).expect("valid log");
    let value = serde_json::to_value(&report).expect("serialize");
    assert_eq!(value["sections"][0]["cases"][0]["status"], "failed");
    assert_eq!(value["sections"][0]["cases"][1]["status"], "case_missing");
    assert_eq!(value["sections"][1]["cases"][0]["status"], "rule_missing");
    assert_eq!(value["summary"]["missing"], 2);
    assert_eq!(value["title"], REPORT_TITLE);
}
