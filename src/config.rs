// SPDX-License-Identifier: PMPL-1.0-or-later

//! Run configuration
//!
//! Built-in defaults, optionally overlaid by a YAML file. CLI flags are
//! applied on top by the binary.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "qa-report.yaml";

pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 85.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolPrograms {
    pub style: String,
    pub analyzer: String,
    pub coverage: String,
}

impl Default for ToolPrograms {
    fn default() -> Self {
        Self {
            style: "flake8".to_string(),
            analyzer: "pylint".to_string(),
            coverage: "coverage".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QaConfig {
    /// Analyzed when no target is given
    pub source_root: PathBuf,
    /// Stripped from a file target when deriving its label
    pub source_extension: String,
    /// Start directory for unittest discovery
    pub tests_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub coverage_dir: PathBuf,
    pub coverage_threshold: f64,
    pub timestamped_reports: bool,
    pub tools: ToolPrograms,
    /// Appended after the fixed style-checker flags
    pub style_args: Vec<String>,
    /// Appended after the target for the analyzer
    pub analyzer_args: Vec<String>,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("src"),
            source_extension: ".py".to_string(),
            tests_dir: PathBuf::from("tests"),
            reports_dir: PathBuf::from("reports"),
            coverage_dir: PathBuf::from("reports/coverage"),
            coverage_threshold: DEFAULT_COVERAGE_THRESHOLD,
            timestamped_reports: false,
            tools: ToolPrograms::default(),
            style_args: Vec::new(),
            analyzer_args: Vec::new(),
        }
    }
}

impl QaConfig {
    /// Parse a YAML config file; missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let config: QaConfig = serde_yaml::from_str(&text)
            .with_context(|| format!("parse config '{}'", path.display()))?;
        debug!("loaded config from '{}'", path.display());
        Ok(config)
    }

    /// Resolve the effective config: an explicit path must exist, the
    /// implicit `qa-report.yaml` is used only when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    Self::from_file(implicit)?
                } else {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.coverage_threshold) {
            bail!(
                "coverage_threshold must be between 0 and 100, got {}",
                self.coverage_threshold
            );
        }
        for (key, program) in [
            ("tools.style", &self.tools.style),
            ("tools.analyzer", &self.tools.analyzer),
            ("tools.coverage", &self.tools.coverage),
        ] {
            if program.trim().is_empty() {
                bail!("{} must name a program", key);
            }
        }
        Ok(())
    }
}
