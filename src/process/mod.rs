// src/process/mod.rs
pub mod coerce;
pub mod discover;
pub mod harmonize;
pub mod load;
pub mod merge;
pub mod normalize;
pub mod utils;

use crate::schema::{Cell, FieldKind};
use serde::Serialize;
use std::sync::Arc;

pub use coerce::{coerce_table, drop_rows_missing, normalize_missing, CanonicalTable};
pub use discover::discover_inputs;
pub use harmonize::harmonize;
pub use load::{load_event_log, LoadOptions};
pub use merge::merge_tables;
pub use normalize::normalize_columns;

/// One source datasheet as read, before any cross-file alignment.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// File name the rows came from.
    pub source: Arc<str>,
    /// Column names from the header row of this file.
    pub headers: Vec<String>,
    /// One row per data line, always `headers.len()` wide.
    pub rows: Vec<Vec<Cell>>,
    /// 1-based line number of each row in the source file.
    pub lines: Vec<u64>,
}

/// Where a merged row came from. Never exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowOrigin {
    pub file: Arc<str>,
    pub line: u64,
}

/// The merged table: ordered columns, rows of cells and their origins.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub origins: Vec<RowOrigin>,
}

impl Table {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` in column `name`; missing if the column does not exist.
    pub fn cell(&self, row: usize, name: &str) -> &Cell {
        static MISSING: Cell = Cell::Missing;
        match self.column_index(name) {
            Some(idx) => &self.rows[row][idx],
            None => &MISSING,
        }
    }

    /// Remove column `idx` from the header and every row.
    pub fn remove_column(&mut self, idx: usize) {
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
    }

    /// Keep only the rows for which `keep` returns true; origins follow.
    pub fn retain_rows<F: FnMut(&[Cell]) -> bool>(&mut self, mut keep: F) -> usize {
        let before = self.rows.len();
        let mut origins = std::mem::take(&mut self.origins).into_iter();
        let rows = std::mem::take(&mut self.rows);
        for row in rows {
            let origin = origins.next();
            if keep(&row) {
                self.rows.push(row);
                if let Some(o) = origin {
                    self.origins.push(o);
                }
            }
        }
        before - self.rows.len()
    }

    /// `(name, kind)` pairs, using the canonical kind for each column.
    pub fn field_kinds(&self) -> Vec<(String, FieldKind)> {
        self.columns
            .iter()
            .map(|c| (c.clone(), crate::schema::field_kind(c)))
            .collect()
    }
}
