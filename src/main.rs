// SPDX-License-Identifier: PMPL-1.0-or-later

//! qa-report: run flake8, pylint and coverage and summarize the verdicts

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use qa_report::config::QaConfig;
use qa_report::diagnostics;
use qa_report::orchestrator::Orchestrator;
use qa_report::report::ReportOutputFormat;
use qa_report::tools::SystemRunner;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

/// Exit status when the run itself could not complete
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "qa-report")]
#[command(version)]
#[command(about = "Run flake8, pylint and coverage and write a pass/fail summary")]
#[command(
    long_about = "Run flake8, pylint and coverage and write a pass/fail summary.\n\n\
                  Exit status is 0 when every check passed or was skipped and 1 when \
                  flake8 found issues or coverage fell below the threshold. The pylint \
                  score is informational and never changes the exit status."
)]
struct Cli {
    /// Config file (defaults to ./qa-report.yaml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log debug detail to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the source root, or a single file or directory
    Run(RunArgs),

    /// Check that the tools and directories a run needs are present
    Doctor,
}

#[derive(Args)]
struct RunArgs {
    /// File or directory to analyze (default: the configured source root)
    #[arg(value_name = "PATH")]
    target: Option<PathBuf>,

    /// Directory for per-tool reports and summary.txt
    #[arg(long, value_name = "DIR")]
    reports_dir: Option<PathBuf>,

    /// Directory for the coverage HTML and XML exports
    #[arg(long, value_name = "DIR")]
    coverage_dir: Option<PathBuf>,

    /// Minimum total coverage percentage
    #[arg(long, value_name = "PERCENT")]
    threshold: Option<f64>,

    /// Add a timestamp to per-tool report file names
    #[arg(long)]
    timestamped: bool,

    /// Also export the summary in these formats
    #[arg(long, value_enum, value_delimiter = ',')]
    format: Vec<ReportOutputFormat>,

    /// Do not echo raw tool output
    #[arg(short, long)]
    quiet: bool,
}

impl RunArgs {
    fn apply(&self, config: &mut QaConfig) {
        if let Some(dir) = &self.reports_dir {
            config.reports_dir = dir.clone();
        }
        if let Some(dir) = &self.coverage_dir {
            config.coverage_dir = dir.clone();
        }
        if let Some(threshold) = self.threshold {
            config.coverage_threshold = threshold;
        }
        if self.timestamped {
            config.timestamped_reports = true;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:?}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let mut config = QaConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run(args) => {
            args.apply(&mut config);
            config.validate()?;

            let report = Orchestrator::new(config, SystemRunner::new())?
                .quiet(args.quiet)
                .export_formats(args.format.clone())
                .run(args.target.as_deref())?;
            Ok(report.exit_code())
        }
        Commands::Doctor => {
            diagnostics::run_self_diagnostics(&config, &SystemRunner::new())?;
            Ok(0)
        }
    }
}

fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();

    debug!("logging initialized at level {}", level);
}
