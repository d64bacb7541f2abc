//! Core domain types for IP reconciliation.
//!
//! Tables are loaded with every cell as text; nothing in here infers numbers
//! or dates.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::error::CoreError;

// ── Table ─────────────────────────────────────────────────────────

/// An all-text table: a header row plus zero or more data rows.
///
/// Every row holds exactly `headers.len()` cells. Loaders pad short rows
/// before pushing them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding it with empty cells up to the header width.
    pub fn push_row(&mut self, mut row: Vec<String>) -> Result<(), CoreError> {
        let expected = self.headers.len();
        if row.len() > expected {
            return Err(CoreError::RaggedRow {
                row: self.rows.len(),
                expected,
                found: row.len(),
            });
        }
        row.resize(expected, String::new());
        self.rows.push(row);
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Indices of the columns holding free text.
    ///
    /// Every cell is loaded as text, so this is every column.
    pub fn text_columns(&self) -> Vec<usize> {
        (0..self.headers.len()).collect()
    }

    /// Index of the first column (in column order) whose header satisfies `pred`.
    pub fn find_column<F>(&self, mut pred: F) -> Option<usize>
    where
        F: FnMut(&str) -> bool,
    {
        self.headers.iter().position(|h| pred(h.as_str()))
    }

    /// All values in the given column, top to bottom.
    pub fn column(&self, index: usize) -> Result<impl Iterator<Item = &str>, CoreError> {
        if index >= self.headers.len() {
            return Err(CoreError::ColumnOutOfRange {
                index,
                columns: self.headers.len(),
            });
        }
        Ok(self.rows.iter().map(move |r| r[index].as_str()))
    }
}

// ── IP sets ───────────────────────────────────────────────────────

/// Deduplicated address tokens, iterated in plain lexicographic string order.
///
/// Ordering is by string, not by numeric octet value: `"10.0.0.5"` sorts
/// before `"2.2.2.2"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IpSet(BTreeSet<String>);

impl IpSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the token was not already present.
    pub fn insert(&mut self, ip: impl Into<String>) -> bool {
        self.0.insert(ip.into())
    }

    pub fn contains(&self, ip: &str) -> bool {
        self.0.contains(ip)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_disjoint(&self, other: &IpSet) -> bool {
        self.0.is_disjoint(&other.0)
    }

    /// Split into (present in `known`, absent from `known`).
    pub fn partition(&self, known: &HashSet<String>) -> (IpSet, IpSet) {
        let (matched, unmatched): (BTreeSet<String>, BTreeSet<String>) =
            self.0.iter().cloned().partition(|ip| known.contains(ip));
        (IpSet(matched), IpSet(unmatched))
    }
}

impl<S: Into<String>> FromIterator<S> for IpSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for IpSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

// ── Reconciliation ────────────────────────────────────────────────

/// The extracted address set and its partition into known and unknown.
///
/// `matched ∪ unmatched == extracted` and `matched ∩ unmatched == ∅`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub extracted: IpSet,
    pub matched: IpSet,
    pub unmatched: IpSet,
}

impl Reconciliation {
    /// Every extracted address is unknown. Used when there is no inventory
    /// to compare against.
    pub fn unmatched_only(extracted: IpSet) -> Self {
        Self {
            unmatched: extracted.clone(),
            matched: IpSet::new(),
            extracted,
        }
    }

    /// Partition `extracted` by membership in `known`.
    pub fn against(extracted: IpSet, known: &HashSet<String>) -> Self {
        let (matched, unmatched) = extracted.partition(known);
        Self {
            extracted,
            matched,
            unmatched,
        }
    }
}
