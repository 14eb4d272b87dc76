// src/process/merge.rs

use std::collections::HashMap;
use tracing::{debug, warn};

use super::{RawTable, RowOrigin, Table};
use crate::schema::Cell;

/// Concatenate per-file tables into one, unioning their columns.
///
/// Columns keep first-seen order across files; a column a file lacks is
/// missing for all of that file's rows. Rows keep file order, then in-file
/// order. Nothing is sorted or deduplicated.
pub fn merge_tables(tables: Vec<RawTable>) -> Table {
    let mut columns: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut total_rows = 0usize;

    // 1) Union of all column names, first-seen order
    for t in &tables {
        total_rows += t.rows.len();
        for h in &t.headers {
            if !index.contains_key(h) {
                index.insert(h.clone(), columns.len());
                columns.push(h.clone());
            }
        }
    }

    // 2) Scatter each file's cells into the union layout
    let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(total_rows);
    let mut origins: Vec<RowOrigin> = Vec::with_capacity(total_rows);
    for t in tables {
        let mut seen = vec![false; columns.len()];
        let mut targets: Vec<Option<usize>> = Vec::with_capacity(t.headers.len());
        for h in &t.headers {
            let target = index[h];
            if seen[target] {
                warn!(file = %t.source, column = %h, "duplicate column header; keeping the first");
                targets.push(None);
            } else {
                seen[target] = true;
                targets.push(Some(target));
            }
        }

        debug!(file = %t.source, rows = t.rows.len(), "merging");
        for (row, line) in t.rows.into_iter().zip(t.lines) {
            let mut out = vec![Cell::Missing; columns.len()];
            for (cell, target) in row.into_iter().zip(&targets) {
                if let Some(i) = target {
                    out[*i] = cell;
                }
            }
            rows.push(out);
            origins.push(RowOrigin {
                file: t.source.clone(),
                line,
            });
        }
    }

    Table {
        columns,
        rows,
        origins,
    }
}
