// src/process/coerce.rs

use tracing::{debug, info, warn};

use super::utils::{clean_str, parse_number};
use super::Table;
use crate::schema::{field_kind, Cell, FieldKind};

/// The merged table after coercion: every column has one declared kind and
/// every cell agrees with it (numbers in Numeric columns, text elsewhere).
#[derive(Debug, Clone, Default)]
pub struct CanonicalTable {
    pub table: Table,
    pub kinds: Vec<FieldKind>,
}

impl CanonicalTable {
    pub fn num_rows(&self) -> usize {
        self.table.num_rows()
    }

    pub fn columns(&self) -> &[String] {
        &self.table.columns
    }

    pub fn field_kinds(&self) -> Vec<(String, FieldKind)> {
        self.table
            .columns
            .iter()
            .cloned()
            .zip(self.kinds.iter().copied())
            .collect()
    }

    pub fn number(&self, row: usize, name: &str) -> Option<f64> {
        self.table.cell(row, name).as_number()
    }

    pub fn text(&self, row: usize, name: &str) -> Option<&str> {
        self.table.cell(row, name).as_text()
    }
}

/// Replace text cells equal to any of `tokens` (e.g. "NA", "") with missing.
pub fn normalize_missing(table: &mut Table, tokens: &[String]) -> usize {
    let mut replaced = 0usize;
    for row in &mut table.rows {
        for cell in row.iter_mut() {
            if let Cell::Text(s) = cell {
                if tokens.iter().any(|t| t == s) {
                    *cell = Cell::Missing;
                    replaced += 1;
                }
            }
        }
    }
    debug!(replaced, "missing-value tokens normalized");
    replaced
}

/// Drop rows whose `column` cell is missing. A table without that column
/// loses every row.
pub fn drop_rows_missing(table: &mut Table, column: &str) -> usize {
    let dropped = match table.column_index(column) {
        Some(idx) => table.retain_rows(|row| !row[idx].is_missing()),
        None => {
            warn!(column, "column absent from every input; dropping all rows");
            table.retain_rows(|_| false)
        }
    };
    if dropped > 0 {
        info!(column, dropped, "dropped rows without a value");
    }
    dropped
}

/// Normalize a time-of-day value to `HH:MM:SS`.
///
/// `HH:MM` gains `:00`, `HH:MM:SS` passes through, any other length is
/// treated as malformed and becomes `None`.
pub fn normalize_time(raw: &str) -> Option<String> {
    let s = clean_str(raw);
    match s.chars().count() {
        5 => Some(format!("{}:00", s)),
        8 => Some(s),
        _ => None,
    }
}

fn coerce_cell(cell: Cell, kind: FieldKind) -> Cell {
    match (kind, cell) {
        (_, Cell::Missing) => Cell::Missing,
        (FieldKind::Numeric, Cell::Number(v)) => Cell::Number(v),
        (FieldKind::Numeric, Cell::Text(s)) => parse_number(&s).map_or(Cell::Missing, Cell::Number),
        (FieldKind::TimeOfDay, other) => other
            .render()
            .and_then(|s| normalize_time(&s))
            .map_or(Cell::Missing, Cell::Text),
        (FieldKind::Text, other) => other.into_text(),
    }
}

/// Convert every column to its canonical kind. Values that cannot be
/// represented in the target kind become missing; nothing here fails.
pub fn coerce_table(mut table: Table) -> CanonicalTable {
    let kinds: Vec<FieldKind> = table.columns.iter().map(|c| field_kind(c)).collect();

    let mut lost = vec![0usize; kinds.len()];
    for row in &mut table.rows {
        for (i, (cell, kind)) in row.iter_mut().zip(&kinds).enumerate() {
            let was_present = !cell.is_missing();
            let coerced = coerce_cell(std::mem::take(cell), *kind);
            if was_present && coerced.is_missing() {
                lost[i] += 1;
            }
            *cell = coerced;
        }
    }

    for (name, n) in table.columns.iter().zip(&lost) {
        if *n > 0 {
            warn!(column = %name, values = *n, "unparseable values set to missing");
        }
    }

    CanonicalTable { table, kinds }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::RowOrigin;
    use std::sync::Arc;

    fn table(columns: &[&str], rows: Vec<Vec<Cell>>) -> Table {
        let file: Arc<str> = Arc::from("t.csv");
        let origins = (0..rows.len() as u64)
            .map(|i| RowOrigin {
                file: file.clone(),
                line: i + 2,
            })
            .collect();
        Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
            origins,
        }
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_normalize_time() {
        assert_eq!(normalize_time("08:5"), None);
        assert_eq!(normalize_time("08:05").as_deref(), Some("08:05:00"));
        assert_eq!(normalize_time("08:05:30").as_deref(), Some("08:05:30"));
        assert_eq!(normalize_time("invalid"), None);
        assert_eq!(normalize_time(""), None);
    }

    #[test]
    fn test_missing_tokens() {
        let mut t = table(
            &["cast", "lat"],
            vec![vec![text("NA"), text("")], vec![text("1"), text("NAN")]],
        );
        let n = normalize_missing(&mut t, &["NA".to_string(), "".to_string()]);
        assert_eq!(n, 2);
        assert!(t.rows[0].iter().all(Cell::is_missing));
        assert_eq!(t.rows[1][1], text("NAN"));
    }

    #[test]
    fn test_drop_rows_missing_cast() {
        let mut t = table(
            &["cast"],
            vec![vec![text("1")], vec![Cell::Missing], vec![text("2")]],
        );
        assert_eq!(drop_rows_missing(&mut t, "cast"), 1);
        assert_eq!(t.num_rows(), 2);

        let mut no_cast = table(&["lat"], vec![vec![Cell::Number(1.0)]]);
        assert_eq!(drop_rows_missing(&mut no_cast, "cast"), 1);
        assert_eq!(no_cast.num_rows(), 0);
    }

    #[test]
    fn test_coerce_table_per_kind() {
        let t = table(
            &["lat", "depth_TDR", "Time_start_UTC", "Time_end_UTC", "cast", "FlowMeterSerial_150"],
            vec![
                vec![
                    text("41.5"),
                    text("n/a-ish-text"),
                    text("08:05"),
                    text("08:05:30"),
                    Cell::Number(3.0),
                    Cell::Number(1234.0),
                ],
                vec![
                    Cell::Number(41.6),
                    Cell::Missing,
                    text("invalid"),
                    text("8:5"),
                    text("4"),
                    text("A-77"),
                ],
            ],
        );

        let out = coerce_table(t);
        assert_eq!(
            out.kinds,
            vec![
                FieldKind::Numeric,
                FieldKind::Numeric,
                FieldKind::TimeOfDay,
                FieldKind::TimeOfDay,
                FieldKind::Text,
                FieldKind::Text
            ]
        );
        assert_eq!(out.number(0, "lat"), Some(41.5));
        assert_eq!(out.number(1, "lat"), Some(41.6));
        assert_eq!(out.number(0, "depth_TDR"), None);
        assert_eq!(out.text(0, "Time_start_UTC"), Some("08:05:00"));
        assert_eq!(out.text(0, "Time_end_UTC"), Some("08:05:30"));
        assert_eq!(out.text(1, "Time_start_UTC"), None);
        assert_eq!(out.text(1, "Time_end_UTC"), None);
        assert_eq!(out.text(0, "cast"), Some("3"));
        assert_eq!(out.text(0, "FlowMeterSerial_150"), Some("1234"));
        assert_eq!(out.text(1, "FlowMeterSerial_150"), Some("A-77"));
    }
}
