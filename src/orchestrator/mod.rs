// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report orchestrator
//!
//! Runs the style checker, the static analyzer and the coverage runner in
//! that order against one target. Each step follows the same policy:
//!
//! - tool not on the search path: recorded as SKIPPED, run continues
//! - tool reports issues: recorded as FAIL, run continues, exit status flips
//! - anything else (I/O, spawn failure): the run aborts with an error
//!
//! The analyzer's score never flips the exit status; below 10 it is
//! recorded as INFO.

pub mod verdicts;

use crate::config::QaConfig;
use crate::report::{ReportFormatter, ReportOutputFormat};
use crate::storage::{ReportLayout, SummaryFile};
use crate::target::Target;
use crate::tools::{self, CoverageStep, Invocation, OutputParsers, ToolRunner};
use crate::types::{RunReport, ToolKind, ToolResult};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct Orchestrator<R: ToolRunner> {
    config: QaConfig,
    runner: R,
    parsers: OutputParsers,
    formatter: ReportFormatter,
    layout: ReportLayout,
    export_formats: Vec<ReportOutputFormat>,
}

impl<R: ToolRunner> Orchestrator<R> {
    pub fn new(config: QaConfig, runner: R) -> Result<Self> {
        let layout = ReportLayout::new(
            config.reports_dir.clone(),
            config.coverage_dir.clone(),
            config.timestamped_reports,
        );
        Ok(Self {
            config,
            runner,
            parsers: OutputParsers::new()?,
            formatter: ReportFormatter::new(),
            layout,
            export_formats: Vec::new(),
        })
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.formatter = ReportFormatter::quiet(quiet);
        self
    }

    pub fn export_formats(mut self, formats: Vec<ReportOutputFormat>) -> Self {
        self.export_formats = formats;
        self
    }

    /// Analyze `target_arg`, or the configured source root when `None`.
    pub fn run(&self, target_arg: Option<&Path>) -> Result<RunReport> {
        let target = Target::resolve(
            target_arg,
            &self.config.source_root,
            &self.config.source_extension,
        );
        info!("target {} (label {})", target.path.display(), target.label);

        self.layout.prepare()?;

        let mut report = RunReport::new(target.path.clone(), target.label.clone());
        let header = format!(
            "QA summary for {} ({}) at {}",
            report.label,
            report.target.display(),
            report.started_at
        );
        let summary = SummaryFile::create(self.layout.summary_path(), &header)?;

        self.formatter.print_run_header(&report);

        for tool in ToolKind::all() {
            let result = self.run_tool(tool, &target)?;
            self.formatter.print_result(&result);
            summary.append_line(&result.summary_line())?;
            report.record(result);
        }

        let exported = self.layout.export(&report, &self.export_formats)?;
        for path in &exported {
            info!("summary exported to {}", path.display());
        }

        let summary_text = summary.read()?;
        self.formatter.print_summary(&summary_text, &report);
        debug!("overall_ok = {}", report.overall_ok);

        Ok(report)
    }

    fn run_tool(&self, tool: ToolKind, target: &Target) -> Result<ToolResult> {
        let program = tools::program_for(&self.config, tool);
        if self.runner.locate(program).is_none() {
            warn!("{} not found on PATH, skipping", program);
            self.formatter.print_tool_heading(tool, &format!("{} (not installed)", program));
            return Ok(ToolResult::skipped(tool));
        }

        match tool {
            ToolKind::Style => {
                let inv = tools::style_invocation(&self.config, target);
                let output = self.capture(tool, &inv)?;
                let path = self.layout.write_tool_report(&target.label, tool, &output)?;
                Ok(verdicts::style(self.parsers.style(&output), path))
            }
            ToolKind::Analyzer => {
                let inv = tools::analyzer_invocation(&self.config, target);
                let output = self.capture(tool, &inv)?;
                let path = self.layout.write_tool_report(&target.label, tool, &output)?;
                Ok(verdicts::analyzer(self.parsers.analyzer_score(&output), path))
            }
            ToolKind::Coverage => self.run_coverage(target),
        }
    }

    /// Run the coverage steps in order; the TOTAL row is read from the
    /// report step only, the report file holds every step's output.
    fn run_coverage(&self, target: &Target) -> Result<ToolResult> {
        let mut combined = String::new();
        let mut report_text = String::new();

        for (step, inv) in tools::coverage_invocations(&self.config, target) {
            let output = self.capture(ToolKind::Coverage, &inv)?;
            if step == CoverageStep::Report {
                report_text = output.clone();
            }
            combined.push_str(&output);
            if !output.is_empty() && !output.ends_with('\n') {
                combined.push('\n');
            }
        }

        let path: PathBuf = self
            .layout
            .write_tool_report(&target.label, ToolKind::Coverage, &combined)?;
        let outcome = self.parsers.coverage_total(&report_text);
        Ok(verdicts::coverage(
            outcome,
            self.config.coverage_threshold,
            path,
        ))
    }

    fn capture(&self, tool: ToolKind, inv: &Invocation) -> Result<String> {
        self.formatter.print_tool_heading(tool, &inv.display());
        let output = self.runner.run(&inv.program, &inv.args)?;
        if output.exit_code != Some(0) {
            debug!("{} exited with {:?}", inv.program, output.exit_code);
        }
        let text = output.combined();
        self.formatter.echo_output(&text);
        Ok(text)
    }
}
