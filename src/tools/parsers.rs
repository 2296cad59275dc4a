// SPDX-License-Identifier: PMPL-1.0-or-later

//! Verdict extraction from tool output
//!
//! Each tool's textual contract is isolated behind one parser returning a
//! typed outcome, so a format change touches only that function.

use anyhow::{Context, Result};
use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub enum StyleOutcome {
    Clean,
    Issues(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    /// Raw token as printed, e.g. "10.00" or "-2.50"
    Rated(String),
    Unavailable,
}

impl ScoreOutcome {
    pub fn is_perfect(&self) -> bool {
        matches!(self, ScoreOutcome::Rated(token) if token.starts_with("10"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoverageOutcome {
    Total(f64),
    Unavailable,
}

/// Compiled patterns shared by the per-tool parsers
pub struct OutputParsers {
    score: Regex,
    total: Regex,
}

impl OutputParsers {
    pub fn new() -> Result<Self> {
        Ok(Self {
            score: Regex::new(r"rated at (-?\d+(?:\.\d+)?)")
                .context("compiling analyzer score pattern")?,
            total: Regex::new(r"(?m)^TOTAL\b.*[ \t](\S+)%[ \t]*$")
                .context("compiling coverage total pattern")?,
        })
    }

    /// Whitespace-only output is clean, otherwise every non-empty line counts
    /// as one issue.
    pub fn style(&self, output: &str) -> StyleOutcome {
        let count = output.lines().filter(|line| !line.trim().is_empty()).count();
        if count == 0 {
            StyleOutcome::Clean
        } else {
            StyleOutcome::Issues(count)
        }
    }

    /// Score token following "rated at"; the last occurrence wins.
    pub fn analyzer_score(&self, output: &str) -> ScoreOutcome {
        self.score
            .captures_iter(output)
            .last()
            .and_then(|caps| caps.get(1))
            .map(|m| ScoreOutcome::Rated(m.as_str().to_string()))
            .unwrap_or(ScoreOutcome::Unavailable)
    }

    /// Trailing percentage of the TOTAL row.
    pub fn coverage_total(&self, output: &str) -> CoverageOutcome {
        self.total
            .captures_iter(output)
            .last()
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|pct| pct.is_finite())
            .map(CoverageOutcome::Total)
            .unwrap_or(CoverageOutcome::Unavailable)
    }
}
