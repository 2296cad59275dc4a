// SPDX-License-Identifier: PMPL-1.0-or-later

//! Process execution for external tools

use anyhow::{Context, Result};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Output of one finished tool process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    /// Stdout followed by stderr
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&self.stderr);
        }
        text
    }
}

/// Seam between the orchestrator and the operating system
pub trait ToolRunner {
    /// Resolve `program` on the search path
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run to completion. A non-zero exit is returned as data; only a failure
    /// to start the process is an error.
    fn run(&self, program: &str, args: &[OsString]) -> Result<CapturedOutput>;
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        (**self).locate(program)
    }

    fn run(&self, program: &str, args: &[OsString]) -> Result<CapturedOutput> {
        (**self).run(program, args)
    }
}

/// Runs real processes, resolving programs against `PATH`
#[derive(Debug, Clone)]
pub struct SystemRunner {
    search_path: Option<OsString>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self {
            search_path: env::var_os("PATH"),
        }
    }

    pub fn with_search_path(search_path: OsString) -> Self {
        Self {
            search_path: Some(search_path),
        }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRunner for SystemRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        let candidate = Path::new(program);
        if candidate.components().count() > 1 {
            return is_executable(candidate).then(|| candidate.to_path_buf());
        }
        let search_path = self.search_path.as_ref()?;
        env::split_paths(search_path)
            .map(|dir| dir.join(program))
            .find(|path| is_executable(path))
    }

    fn run(&self, program: &str, args: &[OsString]) -> Result<CapturedOutput> {
        let resolved = self
            .locate(program)
            .unwrap_or_else(|| PathBuf::from(program));
        debug!("running {} {:?}", resolved.display(), args);

        let output = Command::new(&resolved)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("Failed to execute {}", resolved.display()))?;

        Ok(CapturedOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    if path.is_file() {
        return true;
    }
    ["exe", "bat", "cmd"]
        .iter()
        .any(|ext| path.with_extension(ext).is_file())
}
