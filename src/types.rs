// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for qa-report

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The three external checks, in the order they always run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Style,
    Analyzer,
    Coverage,
}

impl ToolKind {
    pub fn all() -> Vec<ToolKind> {
        vec![ToolKind::Style, ToolKind::Analyzer, ToolKind::Coverage]
    }

    /// Name shown in the summary file
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolKind::Style => "Flake8",
            ToolKind::Analyzer => "Pylint",
            ToolKind::Coverage => "Coverage",
        }
    }

    /// Token used in per-tool report file names
    pub fn file_token(&self) -> &'static str {
        match self {
            ToolKind::Style => "flake8",
            ToolKind::Analyzer => "pylint",
            ToolKind::Coverage => "coverage",
        }
    }

    /// Whether a FAIL from this tool flips the run's exit status.
    ///
    /// The analyzer score is informational only.
    pub fn affects_status(&self) -> bool {
        !matches!(self, ToolKind::Analyzer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
    Skipped,
    /// Recorded without a pass/fail judgment
    Info,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Skipped => "SKIPPED",
            Verdict::Info => "INFO",
        };
        f.write_str(tag)
    }
}

/// Value extracted from a tool's output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Metric {
    IssueCount(usize),
    /// Analyzer score token exactly as printed, e.g. "9.52"
    Score(String),
    Percentage(f64),
    Unavailable(String),
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::IssueCount(1) => write!(f, "1 issue"),
            Metric::IssueCount(n) => write!(f, "{} issues", n),
            Metric::Score(score) => write!(f, "score {}/10", score),
            Metric::Percentage(pct) => write!(f, "{}%", format_percentage(*pct)),
            Metric::Unavailable(reason) => f.write_str(reason),
        }
    }
}

fn format_percentage(pct: f64) -> String {
    if pct.fract() == 0.0 {
        format!("{:.0}", pct)
    } else {
        format!("{:.2}", pct)
    }
}

/// Outcome of one tool step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool: ToolKind,
    pub verdict: Verdict,
    pub metric: Metric,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
}

impl ToolResult {
    pub fn skipped(tool: ToolKind) -> Self {
        Self {
            tool,
            verdict: Verdict::Skipped,
            metric: Metric::Unavailable("not installed".to_string()),
            report_path: None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.verdict == Verdict::Fail && self.tool.affects_status()
    }

    /// One line of the summary file
    pub fn summary_line(&self) -> String {
        format!(
            "{} : {} — {}",
            self.tool.display_name(),
            self.verdict,
            self.metric
        )
    }
}

/// Accumulated results of one invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: String,
    pub target: PathBuf,
    pub label: String,
    pub tool_results: Vec<ToolResult>,
    pub overall_ok: bool,
}

impl RunReport {
    pub fn new(target: PathBuf, label: String) -> Self {
        Self {
            started_at: chrono::Utc::now().to_rfc3339(),
            target,
            label,
            tool_results: Vec::new(),
            overall_ok: true,
        }
    }

    /// Append a result; a failing verdict latches `overall_ok` to false.
    pub fn record(&mut self, result: ToolResult) {
        if result.is_failure() {
            self.overall_ok = false;
        }
        self.tool_results.push(result);
    }

    pub fn result_for(&self, tool: ToolKind) -> Option<&ToolResult> {
        self.tool_results.iter().find(|r| r.tool == tool)
    }

    pub fn exit_code(&self) -> u8 {
        if self.overall_ok {
            0
        } else {
            1
        }
    }
}
