// SPDX-License-Identifier: PMPL-1.0-or-later

//! On-disk layout of a run: report directory, coverage directory, per-tool
//! report files and the summary file

use crate::report::ReportOutputFormat;
use crate::target::FALLBACK_LABEL;
use crate::types::{RunReport, ToolKind};
use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

pub const SUMMARY_FILE: &str = "summary.txt";

#[derive(Debug, Clone)]
pub struct ReportLayout {
    pub reports_dir: PathBuf,
    pub coverage_dir: PathBuf,
    /// Appended to per-tool report names when set
    pub stamp: Option<String>,
}

impl ReportLayout {
    pub fn new(reports_dir: PathBuf, coverage_dir: PathBuf, timestamped: bool) -> Self {
        Self {
            reports_dir,
            coverage_dir,
            stamp: timestamped.then(|| Utc::now().format("%Y%m%d%H%M%S").to_string()),
        }
    }

    /// Create both directories; existing directories are left alone.
    pub fn prepare(&self) -> Result<()> {
        for dir in [&self.reports_dir, &self.coverage_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating directory {}", dir.display()))?;
            debug!("ensured directory {}", dir.display());
        }
        Ok(())
    }

    pub fn summary_path(&self) -> PathBuf {
        self.reports_dir.join(SUMMARY_FILE)
    }

    /// Always a direct child of the reports directory, whatever the label.
    pub fn tool_report_path(&self, label: &str, tool: ToolKind) -> PathBuf {
        let label = label.replace(['/', '\\'], "_");
        let label = match label.as_str() {
            "" | "." | ".." => FALLBACK_LABEL,
            other => other,
        };
        let file_name = match &self.stamp {
            Some(stamp) => format!("{}_{}_{}.txt", label, tool.file_token(), stamp),
            None => format!("{}_{}.txt", label, tool.file_token()),
        };
        self.reports_dir.join(file_name)
    }

    /// Truncate-write the raw output of one tool.
    pub fn write_tool_report(&self, label: &str, tool: ToolKind, content: &str) -> Result<PathBuf> {
        let path = self.tool_report_path(label, tool);
        fs::write(&path, content)
            .with_context(|| format!("writing report {}", path.display()))?;
        Ok(path)
    }

    /// Write the run report in each requested machine-readable format.
    pub fn export(&self, report: &RunReport, formats: &[ReportOutputFormat]) -> Result<Vec<PathBuf>> {
        let mut stored = Vec::new();
        for format in formats {
            let path = self
                .reports_dir
                .join(format!("summary.{}", format.extension()));
            let content = format.serialize(report)?;
            fs::write(&path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            stored.push(path);
        }
        Ok(stored)
    }
}

/// Append-only handle on `summary.txt`.
///
/// The file is reopened for each line so no handle outlives a step.
#[derive(Debug, Clone)]
pub struct SummaryFile {
    path: PathBuf,
}

impl SummaryFile {
    /// Start a fresh summary for this run with a header line.
    pub fn create(path: PathBuf, header: &str) -> Result<Self> {
        let mut file = File::create(&path)
            .with_context(|| format!("creating summary {}", path.display()))?;
        writeln!(file, "{}", header)
            .with_context(|| format!("writing summary {}", path.display()))?;
        Ok(Self { path })
    }

    pub fn append_line(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening summary {}", self.path.display()))?;
        writeln!(file, "{}", line)
            .with_context(|| format!("appending to summary {}", self.path.display()))?;
        Ok(())
    }

    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("reading summary {}", self.path.display()))
    }
}
