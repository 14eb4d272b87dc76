// src/qa/summary.rs

use serde::Serialize;

use crate::process::{CanonicalTable, RowOrigin};
use crate::schema::FieldKind;

/// Min/max of one numeric field over the whole merged table.
///
/// Values are reported as they are, including ones outside any plausible
/// range: the summary is how bad values reach a human.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub field: String,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_origin: Option<RowOrigin>,
    pub max_origin: Option<RowOrigin>,
}

/// One summary per numeric column, in column order.
pub fn summarize(table: &CanonicalTable) -> Vec<FieldSummary> {
    table
        .field_kinds()
        .into_iter()
        .enumerate()
        .filter(|(_, (_, kind))| *kind == FieldKind::Numeric)
        .map(|(idx, (field, _))| {
            let mut s = FieldSummary {
                field,
                count: 0,
                missing: 0,
                min: None,
                max: None,
                min_origin: None,
                max_origin: None,
            };
            for (row, origin) in table.table.rows.iter().zip(&table.table.origins) {
                let Some(v) = row[idx].as_number() else {
                    s.missing += 1;
                    continue;
                };
                s.count += 1;
                if s.min.map_or(true, |m| v < m) {
                    s.min = Some(v);
                    s.min_origin = Some(origin.clone());
                }
                if s.max.map_or(true, |m| v > m) {
                    s.max = Some(v);
                    s.max_origin = Some(origin.clone());
                }
            }
            s
        })
        .collect()
}
