//! Input discovery: find the syslog export and the device inventory in a
//! working directory.
//!
//! The keyword fallback scans regular files sorted by name, so when several
//! files match the first one in sorted order wins.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ReconcileConfig;
use crate::error::{ReconcileError, Result};

/// Locate the syslog export.
///
/// Tries each configured candidate name in order, then falls back to the
/// first file whose name contains the syslog keyword. No match is fatal.
pub fn find_syslog(dir: &Path, config: &ReconcileConfig) -> Result<PathBuf> {
    for name in &config.syslog_candidates {
        let candidate = dir.join(name);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "Matched syslog candidate name");
            return Ok(candidate);
        }
    }

    find_by_keyword(dir, &config.syslog_keyword)?.ok_or_else(|| ReconcileError::MissingSyslog {
        dir: dir.to_path_buf(),
    })
}

/// Locate the device inventory, if there is one.
pub fn find_device_file(dir: &Path, config: &ReconcileConfig) -> Result<Option<PathBuf>> {
    find_by_keyword(dir, &config.device_keyword)
}

/// First regular file (in sorted name order) whose name contains `keyword`,
/// compared case-insensitively.
fn find_by_keyword(dir: &Path, keyword: &str) -> Result<Option<PathBuf>> {
    let keyword = keyword.to_lowercase();

    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    entries.sort();

    Ok(entries.into_iter().find(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy().to_lowercase().contains(&keyword))
            .unwrap_or(false)
    }))
}
