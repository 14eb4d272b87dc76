// src/pipeline.rs

use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::process::{
    coerce_table, discover_inputs, drop_rows_missing, harmonize, load_event_log, merge_tables,
    normalize_columns, normalize_missing, CanonicalTable, LoadOptions, RawTable, Table,
};
use crate::schema::canonical::CAST;

/// Result of one merge run.
#[derive(Debug)]
pub struct MergeRun {
    pub inputs: Vec<PathBuf>,
    pub table: CanonicalTable,
    /// Rows discarded for lacking a cast.
    pub dropped_rows: usize,
}

/// Load and normalize every file in parallel. Results come back in `paths`
/// order; the first failing file aborts the run.
pub fn load_all(paths: &[PathBuf], opts: &LoadOptions) -> Result<Vec<RawTable>> {
    paths
        .par_iter()
        .map(|path| -> Result<RawTable> {
            let mut raw = load_event_log(path, opts)?;
            let kinds = normalize_columns(&mut raw);
            debug!(file = %raw.source, ?kinds, "normalized");
            Ok(raw)
        })
        .collect()
}

/// Everything after the merge: rename, missing-value passes, cast row drop,
/// and the typed parse.
pub fn canonicalize(merged: Table, cfg: &Config) -> (CanonicalTable, usize) {
    let mut table = harmonize(merged);
    normalize_missing(&mut table, &cfg.missing_tokens);
    let dropped = drop_rows_missing(&mut table, CAST);
    (coerce_table(table), dropped)
}

/// Run the whole pipeline over an explicit list of files.
#[instrument(level = "info", skip_all, fields(files = paths.len()))]
pub fn merge_files(paths: &[PathBuf], cfg: &Config) -> Result<MergeRun> {
    let start = Instant::now();
    let opts = LoadOptions::from(cfg);

    let raw = load_all(paths, &opts)?;
    let merged = merge_tables(raw);
    info!(rows = merged.num_rows(), columns = merged.columns.len(), "merged");

    let (table, dropped_rows) = canonicalize(merged, cfg);
    info!(
        rows = table.num_rows(),
        dropped_rows,
        elapsed = ?start.elapsed(),
        "canonical table ready"
    );

    Ok(MergeRun {
        inputs: paths.to_vec(),
        table,
        dropped_rows,
    })
}

/// Discover the datasheets under `dir` and merge them.
pub fn merge_directory<P: AsRef<Path>>(dir: P, cfg: &Config) -> Result<MergeRun> {
    let paths = discover_inputs(dir, &cfg.pattern)?;
    merge_files(&paths, cfg)
}
