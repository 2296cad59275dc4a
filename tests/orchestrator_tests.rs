// SPDX-License-Identifier: PMPL-1.0-or-later

//! Orchestrator behavior against scripted tool output

use anyhow::Result;
use qa_report::config::QaConfig;
use qa_report::orchestrator::Orchestrator;
use qa_report::report::ReportOutputFormat;
use qa_report::tools::{CapturedOutput, ToolRunner};
use qa_report::types::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PERFECT_PYLINT: &str = "\n--------------------------------------------------------------------\n\
                              Your code has been rated at 10.00/10\n";

fn coverage_table(total: &str) -> String {
    format!(
        "Name            Stmts   Miss  Cover   Missing\n\
         ---------------------------------------------\n\
         src/hotel.py       50      5    {total}   10-14\n\
         ---------------------------------------------\n\
         TOTAL              50      5    {total}\n"
    )
}

/// Scripted stand-in for the three tools
#[derive(Default)]
struct FakeRunner {
    outputs: HashMap<String, String>,
    missing: Vec<String>,
    calls: RefCell<Vec<String>>,
}

impl FakeRunner {
    fn all_passing() -> Self {
        Self::default()
            .with_output("flake8", "")
            .with_output("pylint", PERFECT_PYLINT)
            .with_output("coverage report", &coverage_table("90%"))
    }

    fn with_output(mut self, key: &str, output: &str) -> Self {
        self.outputs.insert(key.to_string(), output.to_string());
        self
    }

    fn without(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ToolRunner for FakeRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        if self.missing.iter().any(|m| m == program) {
            None
        } else {
            Some(PathBuf::from("/fake/bin").join(program))
        }
    }

    fn run(&self, program: &str, args: &[OsString]) -> Result<CapturedOutput> {
        let rendered: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        self.calls
            .borrow_mut()
            .push(format!("{} {}", program, rendered.join(" ")));

        let key = if program == "coverage" {
            format!("coverage {}", rendered.first().cloned().unwrap_or_default())
        } else {
            program.to_string()
        };
        let stdout = self.outputs.get(&key).cloned().unwrap_or_default();
        // flake8 and coverage exit non-zero on findings; that must not abort
        let exit_code = if stdout.is_empty() { 0 } else { 1 };
        Ok(CapturedOutput {
            exit_code: Some(exit_code),
            stdout,
            stderr: String::new(),
        })
    }
}

fn config_in(dir: &Path) -> QaConfig {
    QaConfig {
        source_root: dir.join("src"),
        tests_dir: dir.join("tests"),
        reports_dir: dir.join("reports"),
        coverage_dir: dir.join("reports/coverage"),
        ..QaConfig::default()
    }
}

fn run_with(dir: &TempDir, runner: FakeRunner, target: Option<&Path>) -> (RunReport, String) {
    let config = config_in(dir.path());
    let summary_path = config.reports_dir.join("summary.txt");
    let report = Orchestrator::new(config, runner)
        .expect("orchestrator should build")
        .quiet(true)
        .run(target)
        .expect("run should succeed");
    let summary = fs::read_to_string(summary_path).expect("summary should exist");
    (report, summary)
}

fn tool_lines(summary: &str) -> Vec<&str> {
    summary.lines().skip(1).collect()
}

#[test]
fn test_all_checks_pass() {
    let dir = TempDir::new().unwrap();
    let (report, summary) = run_with(&dir, FakeRunner::all_passing(), None);

    assert!(report.overall_ok);
    assert_eq!(report.exit_code(), 0);
    assert_eq!(
        tool_lines(&summary),
        vec![
            "Flake8 : PASS — 0 issues",
            "Pylint : PASS — score 10.00/10",
            "Coverage : PASS — 90%",
        ]
    );
}

#[test]
fn test_directories_created_and_rerun_is_fine() {
    let dir = TempDir::new().unwrap();
    run_with(&dir, FakeRunner::all_passing(), None);
    let (report, summary) = run_with(&dir, FakeRunner::all_passing(), None);

    assert!(dir.path().join("reports").is_dir());
    assert!(dir.path().join("reports/coverage").is_dir());
    assert!(report.overall_ok);
    // Summary starts fresh each run
    assert_eq!(tool_lines(&summary).len(), 3);
}

#[test]
fn test_default_target_is_labelled_all() {
    let dir = TempDir::new().unwrap();
    let (report, _) = run_with(&dir, FakeRunner::all_passing(), None);

    assert_eq!(report.label, "all");
    assert_eq!(report.target, dir.path().join("src"));
    for token in ["flake8", "pylint", "coverage"] {
        let path = dir.path().join(format!("reports/all_{}.txt", token));
        assert!(path.is_file(), "missing {}", path.display());
    }
}

#[test]
fn test_file_target_is_labelled_by_stem() {
    let dir = TempDir::new().unwrap();
    let runner = FakeRunner::all_passing();
    let (report, _) = run_with(&dir, runner, Some(Path::new("src/hotel.py")));

    assert_eq!(report.label, "hotel");
    assert!(dir.path().join("reports/hotel_flake8.txt").is_file());
    assert!(dir.path().join("reports/hotel_pylint.txt").is_file());
    assert!(dir.path().join("reports/hotel_coverage.txt").is_file());
}

#[test]
fn test_style_issues_fail_with_line_count() {
    let dir = TempDir::new().unwrap();
    let flake8 = "src/hotel.py:1:1: F401 'os' imported but unused\n\
                  src/hotel.py:20:80: E501 line too long (91 > 79 characters)\n\
                  1     E501 line too long (91 > 79 characters)\n\
                  1     F401 'os' imported but unused\n\
                  2\n";
    let runner = FakeRunner::all_passing().with_output("flake8", flake8);
    let (report, summary) = run_with(&dir, runner, None);

    assert!(!report.overall_ok);
    assert_eq!(report.exit_code(), 1);
    assert_eq!(tool_lines(&summary)[0], "Flake8 : FAIL — 5 issues");

    let raw = fs::read_to_string(dir.path().join("reports/all_flake8.txt")).unwrap();
    assert_eq!(raw, flake8);
}

#[test]
fn test_low_coverage_fails_run() {
    let dir = TempDir::new().unwrap();
    let runner = FakeRunner::all_passing().with_output("coverage report", &coverage_table("80%"));
    let (report, summary) = run_with(&dir, runner, None);

    assert_eq!(tool_lines(&summary)[2], "Coverage : FAIL — 80%");
    assert!(!report.overall_ok);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn test_missing_coverage_total_is_informational() {
    let dir = TempDir::new().unwrap();
    let runner = FakeRunner::all_passing().with_output("coverage report", "No data to report.\n");
    let (report, summary) = run_with(&dir, runner, None);

    assert_eq!(tool_lines(&summary)[2], "Coverage : INFO — total unavailable");
    assert!(report.overall_ok);
}

#[test]
fn test_imperfect_analyzer_score_does_not_fail_run() {
    let dir = TempDir::new().unwrap();
    let runner = FakeRunner::all_passing().with_output(
        "pylint",
        "src/hotel.py:1:0: C0114: Missing module docstring (missing-module-docstring)\n\
         Your code has been rated at 7.41/10\n",
    );
    let (report, summary) = run_with(&dir, runner, None);

    assert_eq!(tool_lines(&summary)[1], "Pylint : INFO — score 7.41/10");
    assert!(report.overall_ok);
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_missing_tool_is_skipped() {
    let dir = TempDir::new().unwrap();
    let runner = FakeRunner::all_passing().without("coverage");
    let config = config_in(dir.path());
    let orchestrator = Orchestrator::new(config, runner)
        .unwrap()
        .quiet(true);
    let report = orchestrator.run(None).unwrap();

    let coverage = report.result_for(ToolKind::Coverage).unwrap();
    assert_eq!(coverage.verdict, Verdict::Skipped);
    assert_eq!(coverage.summary_line(), "Coverage : SKIPPED — not installed");
    assert!(report.overall_ok);
    assert!(!dir.path().join("reports/all_coverage.txt").exists());
}

#[test]
fn test_all_tools_missing_still_succeeds() {
    let dir = TempDir::new().unwrap();
    let runner = FakeRunner::default()
        .without("flake8")
        .without("pylint")
        .without("coverage");
    let (report, summary) = run_with(&dir, runner, None);

    assert!(report.overall_ok);
    assert!(tool_lines(&summary)
        .iter()
        .all(|line| line.contains("SKIPPED")));
}

#[test]
fn test_exit_code_tracks_fail_lines() {
    let cases = vec![
        FakeRunner::all_passing(),
        FakeRunner::all_passing().with_output("flake8", "E1\n"),
        FakeRunner::all_passing().with_output("coverage report", &coverage_table("84%")),
        FakeRunner::all_passing().without("flake8"),
    ];

    for runner in cases {
        let dir = TempDir::new().unwrap();
        let (report, summary) = run_with(&dir, runner, None);
        let any_fail = tool_lines(&summary).iter().any(|l| l.contains(": FAIL"));
        assert_eq!(report.exit_code() == 0, !any_fail, "summary:\n{}", summary);
    }
}

#[test]
fn test_tools_run_in_fixed_order() {
    let dir = TempDir::new().unwrap();
    let runner = FakeRunner::all_passing();
    let config = config_in(dir.path());
    let orchestrator = Orchestrator::new(config, &runner).unwrap().quiet(true);
    orchestrator.run(None).unwrap();

    let calls = runner.calls();
    let programs: Vec<&str> = calls
        .iter()
        .map(|c| {
            let mut parts = c.split_whitespace();
            match parts.next() {
                Some("coverage") => parts.next().unwrap_or("coverage"),
                Some(p) => p,
                None => "",
            }
        })
        .collect();
    assert_eq!(programs, vec!["flake8", "pylint", "run", "report", "html", "xml"]);
    assert!(calls[0].ends_with("--statistics --count"));
}

#[test]
fn test_json_export_written() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    Orchestrator::new(config, FakeRunner::all_passing())
        .unwrap()
        .quiet(true)
        .export_formats(vec![ReportOutputFormat::Json])
        .run(None)
        .unwrap();

    let json = fs::read_to_string(dir.path().join("reports/summary.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["overall_ok"], true);
    assert_eq!(parsed["tool_results"].as_array().map(|a| a.len()), Some(3));
}
