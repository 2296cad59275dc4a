// SPDX-License-Identifier: PMPL-1.0-or-later

//! `doctor`: checks the environment a run depends on

use crate::config::QaConfig;
use crate::tools::{self, ToolRunner};
use crate::types::ToolKind;
use anyhow::{anyhow, Result};
use colored::*;
use std::path::Path;

pub fn run_self_diagnostics<R: ToolRunner>(config: &QaConfig, runner: &R) -> Result<()> {
    println!("qa-report self-diagnostics");

    let checks = collect(config, runner);

    println!();
    for entry in &checks {
        entry.print();
    }

    if checks.iter().any(|entry| entry.level == Level::Error) {
        Err(anyhow!("self-diagnostics reported issues"))
    } else {
        Ok(())
    }
}

fn collect<R: ToolRunner>(config: &QaConfig, runner: &R) -> Vec<Diagnostic> {
    let mut checks = vec![Diagnostic::ok(
        "version",
        format!("qa-report {}", env!("CARGO_PKG_VERSION")),
    )];

    for tool in ToolKind::all() {
        checks.push(check_tool(tool, tools::program_for(config, tool), runner));
    }

    checks.push(check_directory("source root", &config.source_root, true));
    checks.push(check_directory("tests directory", &config.tests_dir, false));
    checks.push(check_directory("reports directory", &config.reports_dir, false));
    checks.push(check_directory("coverage directory", &config.coverage_dir, false));
    checks
}

#[derive(Debug, PartialEq, Eq)]
enum Level {
    Ok,
    Warn,
    Error,
}

#[derive(Debug)]
struct Diagnostic {
    label: String,
    level: Level,
    detail: String,
}

impl Diagnostic {
    fn new(label: impl Into<String>, level: Level, detail: String) -> Self {
        Self {
            label: label.into(),
            level,
            detail,
        }
    }

    fn ok(label: impl Into<String>, detail: String) -> Self {
        Self::new(label, Level::Ok, detail)
    }

    fn warning(label: impl Into<String>, detail: String) -> Self {
        Self::new(label, Level::Warn, detail)
    }

    fn error(label: impl Into<String>, detail: String) -> Self {
        Self::new(label, Level::Error, detail)
    }

    fn print(&self) {
        let tag = match self.level {
            Level::Ok => "OK".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERR".red(),
        };
        println!("  [{}] {:22} {}", tag, self.label, self.detail);
    }
}

fn check_tool<R: ToolRunner>(tool: ToolKind, program: &str, runner: &R) -> Diagnostic {
    let label = tool.display_name().to_lowercase();
    match runner.locate(program) {
        Some(path) => Diagnostic::ok(label, path.display().to_string()),
        None => Diagnostic::warning(
            label,
            format!("{} not on PATH (check will be SKIPPED)", program),
        ),
    }
}

fn check_directory(label: &'static str, path: &Path, required: bool) -> Diagnostic {
    if path.is_dir() {
        Diagnostic::ok(label, format!("{} exists", path.display()))
    } else if path.exists() {
        Diagnostic::error(
            label,
            format!("{} exists but is not a directory", path.display()),
        )
    } else if required {
        Diagnostic::error(label, format!("{} missing", path.display()))
    } else {
        Diagnostic::warning(label, format!("{} missing", path.display()))
    }
}
