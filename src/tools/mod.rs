// SPDX-License-Identifier: PMPL-1.0-or-later

//! External tool invocation and output parsing

pub mod parsers;
pub mod runner;

use crate::config::QaConfig;
use crate::target::Target;
use crate::types::ToolKind;
use std::ffi::OsString;

pub use parsers::{CoverageOutcome, OutputParsers, ScoreOutcome, StyleOutcome};
pub use runner::{CapturedOutput, SystemRunner, ToolRunner};

/// Which coverage step an invocation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageStep {
    Run,
    Report,
    Html,
    Xml,
}

/// One program + argument list to execute
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl Invocation {
    fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
        }
    }

    fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Rendered for console headings and logs
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().to_string()));
        parts.join(" ")
    }
}

pub fn program_for(config: &QaConfig, tool: ToolKind) -> &str {
    match tool {
        ToolKind::Style => &config.tools.style,
        ToolKind::Analyzer => &config.tools.analyzer,
        ToolKind::Coverage => &config.tools.coverage,
    }
}

/// `flake8 <target> --statistics --count [extra...]`
pub fn style_invocation(config: &QaConfig, target: &Target) -> Invocation {
    Invocation::new(&config.tools.style)
        .arg(target.path.as_os_str())
        .arg("--statistics")
        .arg("--count")
        .args(config.style_args.iter())
}

/// `pylint <target> [extra...]`
pub fn analyzer_invocation(config: &QaConfig, target: &Target) -> Invocation {
    Invocation::new(&config.tools.analyzer)
        .arg(target.path.as_os_str())
        .args(config.analyzer_args.iter())
}

/// The four coverage commands, in execution order
pub fn coverage_invocations(config: &QaConfig, target: &Target) -> Vec<(CoverageStep, Invocation)> {
    let program = config.tools.coverage.as_str();

    let mut scope = OsString::from(if target.is_file() {
        "--include="
    } else {
        "--source="
    });
    scope.push(target.path.as_os_str());

    let run = Invocation::new(program)
        .arg("run")
        .arg(scope)
        .args(["-m", "unittest", "discover", "-s"])
        .arg(config.tests_dir.as_os_str())
        .args(["-t", "."]);

    let report = Invocation::new(program).args(["report", "-m"]);

    let html = Invocation::new(program)
        .args(["html", "-d"])
        .arg(config.coverage_dir.join("html").into_os_string());

    let xml = Invocation::new(program)
        .args(["xml", "-o"])
        .arg(config.coverage_dir.join("coverage.xml").into_os_string());

    vec![
        (CoverageStep::Run, run),
        (CoverageStep::Report, report),
        (CoverageStep::Html, html),
        (CoverageStep::Xml, xml),
    ]
}
