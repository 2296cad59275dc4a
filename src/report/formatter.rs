// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console output for a run

use crate::types::*;
use colored::*;

pub struct ReportFormatter {
    quiet: bool,
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// Suppress echoing raw tool output; headings and verdicts still print.
    pub fn quiet(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn print_run_header(&self, report: &RunReport) {
        println!("\n{}", "=== QA REPORT ===".bold().cyan());
        println!("  Target: {}", report.target.display());
        println!("  Label: {}", report.label);
    }

    pub fn print_tool_heading(&self, tool: ToolKind, command: &str) {
        println!();
        println!("{} {}", "==>".bold().cyan(), tool.display_name().bold());
        println!("    {}", command.dimmed());
    }

    pub fn echo_output(&self, output: &str) {
        if self.quiet || output.is_empty() {
            return;
        }
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }

    pub fn print_result(&self, result: &ToolResult) {
        let verdict = colored_verdict(result.verdict);
        println!(
            "    {} : {} — {}",
            result.tool.display_name().bold(),
            verdict,
            result.metric
        );
    }

    /// Reprint the summary file and the overall banner.
    pub fn print_summary(&self, summary_text: &str, report: &RunReport) {
        println!();
        println!("{}", "SUMMARY".bold().yellow());
        for line in summary_text.lines() {
            println!("  {}", line);
        }
        println!();

        if report.overall_ok {
            println!("{}", "ALL CHECKS PASSED".green().bold());
        } else {
            println!("{}", "ISSUES FOUND".red().bold());
        }
    }
}

fn colored_verdict(verdict: Verdict) -> ColoredString {
    let tag = verdict.to_string();
    match verdict {
        Verdict::Pass => tag.green().bold(),
        Verdict::Fail => tag.red().bold(),
        Verdict::Skipped => tag.yellow(),
        Verdict::Info => tag.blue(),
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
