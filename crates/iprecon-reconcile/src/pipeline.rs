//! A single reconciliation run: discover → load → extract → match → write.

use std::path::{Path, PathBuf};

use iprecon_core::Reconciliation;
use serde::Serialize;

use crate::config::ReconcileConfig;
use crate::error::{ReconcileError, Result};
use crate::matcher::{self, DeviceMatch};
use crate::output::{self, OutputPaths};
use crate::{discover, extract, table};

/// How the device inventory was used, in report form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeviceStatus {
    NoDeviceFile,
    NoAddressColumn { file: PathBuf },
    Matched { file: PathBuf, column: String },
}

impl From<&DeviceMatch> for DeviceStatus {
    fn from(dm: &DeviceMatch) -> Self {
        match dm {
            DeviceMatch::NoDeviceFile => Self::NoDeviceFile,
            DeviceMatch::NoAddressColumn { file } => Self::NoAddressColumn { file: file.clone() },
            DeviceMatch::Matched { file, column, .. } => Self::Matched {
                file: file.clone(),
                column: column.clone(),
            },
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub syslog_file: PathBuf,
    pub syslog_rows: usize,
    pub device: DeviceStatus,
    pub extracted_count: usize,
    pub matched_count: usize,
    pub unmatched_count: usize,
    pub reconciliation: Reconciliation,
    pub outputs: OutputPaths,
}

impl RunReport {
    /// Human-readable closing summary, one line per written table.
    pub fn summary_lines(&self) -> Vec<String> {
        let name = |path: &Path| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        };

        vec![
            format!("- {} : {} IPs", name(self.outputs.extracted.as_path()), self.extracted_count),
            format!("- {}   : {} IPs", name(self.outputs.matched.as_path()), self.matched_count),
            format!("- {} : {} IPs", name(self.outputs.unmatched.as_path()), self.unmatched_count),
        ]
    }
}

/// Execute one run against `working_dir`, writing outputs to `out_dir`.
///
/// The syslog file is loaded and scanned before anything is written, so a
/// missing or unreadable syslog leaves no outputs behind.
pub fn run(working_dir: &Path, out_dir: &Path, config: &ReconcileConfig) -> Result<RunReport> {
    let syslog_file = discover::find_syslog(working_dir, config)?;
    tracing::info!(path = %syslog_file.display(), "Using syslog file");

    let syslog = table::load_delimited(&syslog_file).map_err(|source| {
        ReconcileError::SyslogLoad {
            path: syslog_file.clone(),
            source,
        }
    })?;

    let extracted = extract::extract_from_table(&syslog);
    tracing::info!(unique_ips = extracted.len(), "Extracted unique IPs");

    let device_file = discover::find_device_file(working_dir, config)?;
    match &device_file {
        Some(path) => tracing::info!(path = %path.display(), "Using device inventory file"),
        None => tracing::warn!("No device inventory file found; all IPs marked as unmatched"),
    }

    let device = matcher::load_device_match(device_file.as_deref(), &config.address_keywords)?;
    if let DeviceMatch::NoAddressColumn { file } = &device {
        tracing::warn!(path = %file.display(), "No IP column found in device inventory");
    }

    let reconciliation = device.reconcile(extracted);
    let outputs = output::write_reconciliation(out_dir, config, &reconciliation)?;

    let report = RunReport {
        syslog_file,
        syslog_rows: syslog.len(),
        device: DeviceStatus::from(&device),
        extracted_count: reconciliation.extracted.len(),
        matched_count: reconciliation.matched.len(),
        unmatched_count: reconciliation.unmatched.len(),
        reconciliation,
        outputs,
    };

    tracing::info!(
        extracted = report.extracted_count,
        matched = report.matched_count,
        unmatched = report.unmatched_count,
        "Reconciliation complete"
    );

    Ok(report)
}
