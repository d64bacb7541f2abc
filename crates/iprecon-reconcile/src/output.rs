//! Output tables: one `ip` column, one address per row, existing files
//! overwritten in place.

use std::fs;
use std::path::{Path, PathBuf};

use iprecon_core::{IpSet, Reconciliation};
use serde::Serialize;

use crate::config::ReconcileConfig;
use crate::error::{ReconcileError, Result};

pub const IP_HEADER: &str = "ip";

/// Where the three tables of a run were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub extracted: PathBuf,
    pub matched: PathBuf,
    pub unmatched: PathBuf,
}

/// Write `ips` as a single-column table with an `ip` header.
pub fn write_ip_table(path: &Path, ips: &IpSet) -> Result<()> {
    let output_err = |source: csv::Error| ReconcileError::Output {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(output_err)?;

    writer.write_record([IP_HEADER]).map_err(output_err)?;
    for ip in ips.iter() {
        writer.write_record([ip]).map_err(output_err)?;
    }
    writer.flush().map_err(|e| output_err(e.into()))?;

    tracing::debug!(path = %path.display(), rows = ips.len(), "Wrote IP table");
    Ok(())
}

/// Write the extracted, matched and unmatched tables into `out_dir`.
pub fn write_reconciliation(
    out_dir: &Path,
    config: &ReconcileConfig,
    reconciliation: &Reconciliation,
) -> Result<OutputPaths> {
    fs::create_dir_all(out_dir)?;

    let paths = OutputPaths {
        extracted: out_dir.join(&config.extracted_file),
        matched: out_dir.join(&config.matched_file),
        unmatched: out_dir.join(&config.unmatched_file),
    };

    write_ip_table(&paths.extracted, &reconciliation.extracted)?;
    write_ip_table(&paths.matched, &reconciliation.matched)?;
    write_ip_table(&paths.unmatched, &reconciliation.unmatched)?;

    Ok(paths)
}
