// SPDX-License-Identifier: PMPL-1.0-or-later

//! Analysis target resolution

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Label used when the whole source root is analyzed
pub const ALL_LABEL: &str = "all";

/// Label used when a path has no usable final component, e.g. `/`
pub const FALLBACK_LABEL: &str = "target";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub path: PathBuf,
    pub label: String,
}

impl Target {
    /// No argument selects `source_root` labelled "all"; an explicit path is
    /// labelled by its file name minus `extension`. Existence is not checked.
    pub fn resolve(arg: Option<&Path>, source_root: &Path, extension: &str) -> Self {
        match arg {
            None => Target {
                path: source_root.to_path_buf(),
                label: ALL_LABEL.to_string(),
            },
            Some(path) => Target {
                path: path.to_path_buf(),
                label: derive_label(path, extension),
            },
        }
    }

    pub fn is_file(&self) -> bool {
        self.path.is_file()
    }
}

/// The label always becomes a single file-name component under the reports
/// directory: `..` and `/` fall back to the canonical name, separators are
/// replaced.
fn derive_label(path: &Path, extension: &str) -> String {
    let name = final_name(path).unwrap_or_else(|| FALLBACK_LABEL.to_string());

    let label = match name.strip_suffix(extension) {
        Some(stem) if !extension.is_empty() && !stem.is_empty() => stem.to_string(),
        _ => name,
    };
    let label = label.replace(['/', '\\'], "_");
    if label.is_empty() || label == "." || label == ".." {
        FALLBACK_LABEL.to_string()
    } else {
        label
    }
}

fn final_name(path: &Path) -> Option<String> {
    match path.file_name() {
        Some(name) => Some(name.to_string_lossy().to_string()),
        None => path
            .canonicalize()
            .ok()?
            .file_name()
            .map(|name| name.to_string_lossy().to_string()),
    }
}
