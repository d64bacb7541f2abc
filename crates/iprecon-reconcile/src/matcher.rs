//! Device matching: pick the inventory's address column and partition the
//! extracted addresses into known and unknown.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use iprecon_core::{IpSet, Reconciliation, Table};

use crate::error::Result;
use crate::table::{self, TableSource};

/// What the device inventory contributed to a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceMatch {
    /// No inventory file was discovered.
    NoDeviceFile,
    /// The inventory loaded but has no address-like column.
    NoAddressColumn { file: PathBuf },
    /// Addresses taken from `column`, trimmed.
    Matched {
        file: PathBuf,
        column: String,
        known: HashSet<String>,
    },
}

impl DeviceMatch {
    /// Partition `extracted`. Only `Matched` can produce a non-empty matched set.
    pub fn reconcile(&self, extracted: IpSet) -> Reconciliation {
        match self {
            Self::Matched { known, .. } => Reconciliation::against(extracted, known),
            Self::NoDeviceFile | Self::NoAddressColumn { .. } => {
                Reconciliation::unmatched_only(extracted)
            }
        }
    }
}

/// First column (in column order) whose name contains any keyword,
/// compared case-insensitively.
pub fn address_column(table: &Table, keywords: &[String]) -> Option<usize> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    table.find_column(|name| {
        let name = name.to_lowercase();
        keywords.iter().any(|k| name.contains(k.as_str()))
    })
}

/// Trimmed values of the address column.
pub fn known_addresses(table: &Table, column: usize) -> Result<HashSet<String>> {
    Ok(table
        .column(column)?
        .map(|v| v.trim().to_string())
        .collect())
}

/// Build a `DeviceMatch` from an already-loaded inventory table.
pub fn match_table(file: &Path, table: &Table, keywords: &[String]) -> Result<DeviceMatch> {
    let Some(idx) = address_column(table, keywords) else {
        return Ok(DeviceMatch::NoAddressColumn {
            file: file.to_path_buf(),
        });
    };

    Ok(DeviceMatch::Matched {
        file: file.to_path_buf(),
        column: table.headers()[idx].clone(),
        known: known_addresses(table, idx)?,
    })
}

/// Load the inventory at `file` (if any) and derive the known address set.
pub fn load_device_match(file: Option<&Path>, keywords: &[String]) -> Result<DeviceMatch> {
    let Some(file) = file else {
        return Ok(DeviceMatch::NoDeviceFile);
    };

    let (inventory, source): (Table, TableSource) = table::load_inventory(file)?;
    tracing::info!(
        path = %file.display(),
        format = %source,
        rows = inventory.len(),
        "Loaded device inventory"
    );

    match_table(file, &inventory, keywords)
}
