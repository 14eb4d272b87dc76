// src/process/harmonize.rs

use tracing::{debug, warn};

use super::Table;
use crate::schema::{canonical_name, net_size_family};

/// Rename source columns to their canonical names.
///
/// Columns not in the rename table pass through. When the canonical target is
/// already present (a file set using both `long` and `lon`), the source column
/// only fills the target's missing cells and is then dropped.
pub fn harmonize(mut table: Table) -> Table {
    let mut idx = 0;
    while idx < table.columns.len() {
        let source = table.columns[idx].clone();
        let Some(target) = canonical_name(&source) else {
            if let Some((size, rest)) = net_size_family(&source) {
                warn!(
                    column = %source,
                    net = size.as_str(),
                    field = %rest,
                    "net-size column has no canonical name; passing through"
                );
            }
            idx += 1;
            continue;
        };

        match table.column_index(target) {
            None => {
                debug!(from = %source, to = target, "renamed");
                table.columns[idx] = target.to_string();
                idx += 1;
            }
            Some(existing) => {
                let mut filled = 0usize;
                for row in &mut table.rows {
                    if row[existing].is_missing() && !row[idx].is_missing() {
                        row[existing] = std::mem::take(&mut row[idx]);
                        filled += 1;
                    }
                }
                warn!(
                    from = %source,
                    to = target,
                    filled,
                    "canonical column already present; coalesced"
                );
                table.remove_column(idx);
            }
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::RowOrigin;
    use crate::schema::{Cell, RENAMES};
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

    #[test]
    fn test_every_mapped_name_is_renamed() {
        let sources: Vec<&str> = RENAMES.iter().map(|(s, _)| *s).collect();
        let row = vec![Cell::Missing; sources.len()];
        let out = harmonize(table(&sources, vec![row]));

        for (source, target) in RENAMES {
            assert!(!out.columns.iter().any(|c| c == source), "{} survived", source);
            assert!(out.columns.iter().any(|c| c == target), "{} missing", target);
        }
        assert_eq!(out.columns.len(), RENAMES.len());
    }

    #[test]
    fn test_unmapped_columns_pass_through_in_place() {
        let out = harmonize(table(
            &["cruise", "long", "150_Notes", "lat"],
            vec![vec![Cell::Missing; 4]],
        ));
        assert_eq!(out.columns, vec!["cruise", "lon", "150_Notes", "lat"]);
    }

    #[test]
    fn test_existing_target_is_coalesced() {
        let out = harmonize(table(
            &["lon", "cast", "long"],
            vec![
                vec![Cell::Number(-70.0), Cell::Text("1".into()), Cell::Number(-71.0)],
                vec![Cell::Missing, Cell::Text("2".into()), Cell::Number(-72.0)],
            ],
        ));
        assert_eq!(out.columns, vec!["lon", "cast"]);
        assert_eq!(out.rows[0][0], Cell::Number(-70.0));
        assert_eq!(out.rows[1][0], Cell::Number(-72.0));
    }
}
