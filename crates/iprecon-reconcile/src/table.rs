//! All-text table loading from delimited text and spreadsheet files.
//!
//! Every cell comes back as a string. Empty cells stay empty strings; there
//! is no null marker and no numeric or date inference.

use std::fs;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use iprecon_core::{CoreError, Table};
use thiserror::Error;

use crate::error::{ReconcileError, Result};

const UTF8_BOM: &str = "\u{feff}";

/// Structural failures while turning a file into a `Table`.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File is not valid UTF-8 text: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Line {line}: {source}")]
    Shape {
        line: u64,
        #[source]
        source: CoreError,
    },

    #[error("No header row: the file has no columns to parse")]
    NoHeader,

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Spreadsheet {} contains no worksheets", .0.display())]
    NoWorksheet(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which reader produced a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    DelimitedText,
    Spreadsheet,
}

impl std::fmt::Display for TableSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DelimitedText => write!(f, "delimited text"),
            Self::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}

/// Load a comma-delimited file with a header row.
///
/// Short rows are padded; a row with more cells than the header, or a file
/// with no header row at all, is a structural error.
pub fn load_delimited(path: &Path) -> std::result::Result<Table, TableError> {
    let bytes = fs::read(path)?;
    let content = String::from_utf8(bytes)?;
    parse_delimited(&content)
}

fn parse_delimited(content: &str) -> std::result::Result<Table, TableError> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.is_empty() {
        return Err(TableError::NoHeader);
    }
    let mut table = Table::new(headers);

    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: Vec<String> = record.iter().map(|c| c.to_string()).collect();
        table
            .push_row(row)
            .map_err(|source| TableError::Shape { line, source })?;
    }

    Ok(table)
}

/// Load the first worksheet of a spreadsheet (xlsx, xls, xlsb, ods).
///
/// The first row is the header row.
pub fn load_spreadsheet(path: &Path) -> std::result::Result<Table, TableError> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TableError::NoWorksheet(path.to_path_buf()))??;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_text).collect(),
        None => return Ok(Table::default()),
    };
    let mut table = Table::new(headers);

    for (i, row) in rows.enumerate() {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        table.push_row(cells).map_err(|source| TableError::Shape {
            line: i as u64 + 2,
            source,
        })?;
    }

    Ok(table)
}

/// Render a spreadsheet cell as the text a user would read in the sheet.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

/// Load the device inventory, trying delimited text first and a spreadsheet
/// second. Both failing is fatal.
pub fn load_inventory(path: &Path) -> Result<(Table, TableSource)> {
    let text_err = match load_delimited(path) {
        Ok(table) => return Ok((table, TableSource::DelimitedText)),
        Err(e) => e,
    };

    tracing::debug!(
        path = %path.display(),
        error = %text_err,
        "Device file is not delimited text, trying spreadsheet"
    );

    match load_spreadsheet(path) {
        Ok(table) => Ok((table, TableSource::Spreadsheet)),
        Err(spreadsheet) => Err(ReconcileError::DeviceLoad {
            path: path.to_path_buf(),
            text: text_err,
            spreadsheet,
        }),
    }
}
