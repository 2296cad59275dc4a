// SPDX-License-Identifier: PMPL-1.0-or-later

//! Mapping parsed tool outcomes to summary verdicts

use crate::tools::{CoverageOutcome, ScoreOutcome, StyleOutcome};
use crate::types::{Metric, ToolKind, ToolResult, Verdict};
use std::path::PathBuf;

pub fn style(outcome: StyleOutcome, report_path: PathBuf) -> ToolResult {
    let (verdict, count) = match outcome {
        StyleOutcome::Clean => (Verdict::Pass, 0),
        StyleOutcome::Issues(n) => (Verdict::Fail, n),
    };
    ToolResult {
        tool: ToolKind::Style,
        verdict,
        metric: Metric::IssueCount(count),
        report_path: Some(report_path),
    }
}

/// A perfect score passes; anything else is recorded as information only.
pub fn analyzer(outcome: ScoreOutcome, report_path: PathBuf) -> ToolResult {
    let perfect = outcome.is_perfect();
    let metric = match outcome {
        ScoreOutcome::Rated(token) => Metric::Score(token),
        ScoreOutcome::Unavailable => Metric::Unavailable("score unavailable".to_string()),
    };
    ToolResult {
        tool: ToolKind::Analyzer,
        verdict: if perfect { Verdict::Pass } else { Verdict::Info },
        metric,
        report_path: Some(report_path),
    }
}

pub fn coverage(outcome: CoverageOutcome, threshold: f64, report_path: PathBuf) -> ToolResult {
    let (verdict, metric) = match outcome {
        CoverageOutcome::Total(pct) if pct >= threshold => (Verdict::Pass, Metric::Percentage(pct)),
        CoverageOutcome::Total(pct) => (Verdict::Fail, Metric::Percentage(pct)),
        CoverageOutcome::Unavailable => (
            Verdict::Info,
            Metric::Unavailable("total unavailable".to_string()),
        ),
    };
    ToolResult {
        tool: ToolKind::Coverage,
        verdict,
        metric,
        report_path: Some(report_path),
    }
}
