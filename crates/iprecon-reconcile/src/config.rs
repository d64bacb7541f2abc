//! Configuration for the reconciler.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{ReconcileError, Result};

/// Top-level reconcile configuration.
///
/// Loaded from `iprecon.toml` `[reconcile]` section or
/// `IPRECON__RECONCILE__` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconcileConfig {
    /// Exact syslog file names tried in order before falling back to a scan.
    #[serde(default = "default_syslog_candidates")]
    pub syslog_candidates: Vec<String>,

    /// Case-insensitive substring identifying a syslog file during the scan.
    #[serde(default = "default_syslog_keyword")]
    pub syslog_keyword: String,

    /// Case-insensitive substring identifying the device inventory.
    #[serde(default = "default_device_keyword")]
    pub device_keyword: String,

    /// Case-insensitive substrings marking a device column as the address column.
    #[serde(default = "default_address_keywords")]
    pub address_keywords: Vec<String>,

    #[serde(default = "default_extracted_file")]
    pub extracted_file: String,

    #[serde(default = "default_matched_file")]
    pub matched_file: String,

    #[serde(default = "default_unmatched_file")]
    pub unmatched_file: String,

    /// Directory for the output tables. Defaults to the working directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl ReconcileConfig {
    /// Resolve the output directory against the working directory.
    pub fn output_dir_for(&self, working_dir: &std::path::Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => working_dir.join(dir),
            None => working_dir.to_path_buf(),
        }
    }
}

/// Load the `[reconcile]` section from `<file_prefix>.toml` (optional) and
/// `IPRECON__`-prefixed environment variables, falling back to defaults when
/// the section is absent.
///
/// A relative `file_prefix` is resolved against `working_dir`.
pub fn load(working_dir: &std::path::Path, file_prefix: &str) -> Result<ReconcileConfig> {
    let prefix = working_dir.join(file_prefix);
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(&prefix.to_string_lossy()).required(false))
        .add_source(
            config::Environment::with_prefix("IPRECON")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| ReconcileError::Config(e.to_string()))?;

    match cfg.get::<ReconcileConfig>("reconcile") {
        Ok(c) => Ok(c),
        Err(config::ConfigError::NotFound(_)) => Ok(ReconcileConfig::default()),
        Err(e) => Err(ReconcileError::Config(e.to_string())),
    }
}

fn default_syslog_candidates() -> Vec<String> {
    vec!["syslog.1.csv".to_string(), "syslog.csv".to_string()]
}

fn default_syslog_keyword() -> String {
    "syslog".to_string()
}

fn default_device_keyword() -> String {
    "device".to_string()
}

fn default_address_keywords() -> Vec<String> {
    vec!["ip".to_string(), "address".to_string()]
}

fn default_extracted_file() -> String {
    "extracted_ips.csv".to_string()
}

fn default_matched_file() -> String {
    "matched_ips.csv".to_string()
}

fn default_unmatched_file() -> String {
    "unmatched_ips.csv".to_string()
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            syslog_candidates: default_syslog_candidates(),
            syslog_keyword: default_syslog_keyword(),
            device_keyword: default_device_keyword(),
            address_keywords: default_address_keywords(),
            extracted_file: default_extracted_file(),
            matched_file: default_matched_file(),
            unmatched_file: default_unmatched_file(),
            output_dir: None,
        }
    }
}
