// src/process/normalize.rs

use tracing::debug;

use super::RawTable;
use crate::schema::{Cell, ColumnKind};

/// Settle every column of one file on a single representation.
///
/// A column holding both numbers and text is flattened to text so the coercer
/// can re-parse it uniformly after the merge. Clean numeric and clean text
/// columns are left as they are. Returns the kind each column resolved to.
pub fn normalize_columns(table: &mut RawTable) -> Vec<ColumnKind> {
    let mut kinds = Vec::with_capacity(table.headers.len());

    for (col, name) in table.headers.iter().enumerate() {
        let mut numbers = 0usize;
        let mut texts = 0usize;
        for row in &table.rows {
            match &row[col] {
                Cell::Number(_) => numbers += 1,
                Cell::Text(_) => texts += 1,
                Cell::Missing => {}
            }
        }

        let kind = match (numbers, texts) {
            (0, 0) => ColumnKind::Empty,
            (_, 0) => ColumnKind::Numeric,
            (0, _) => ColumnKind::Text,
            _ => {
                debug!(
                    file = %table.source,
                    column = %name,
                    numbers,
                    texts,
                    "mixed column flattened to text"
                );
                for row in &mut table.rows {
                    let cell = std::mem::take(&mut row[col]);
                    row[col] = cell.into_text();
                }
                ColumnKind::Text
            }
        };
        kinds.push(kind);
    }

    kinds
}
