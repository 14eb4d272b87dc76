// src/process/discover.rs

use anyhow::{bail, Context, Result};
use glob::glob;
use std::path::{Path, PathBuf};
use tracing::info;

/// List the datasheets in `dir` matching `pattern`, sorted by file name so
/// the merged row order is reproducible.
pub fn discover_inputs<P: AsRef<Path>>(dir: P, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        bail!("input directory {:?} does not exist", dir);
    }
    let full = dir.join(pattern).to_string_lossy().into_owned();

    let mut paths: Vec<PathBuf> = glob(&full)
        .with_context(|| format!("invalid glob pattern {}", full))?
        .filter_map(|p| p.ok())
        .filter(|p| p.is_file())
        .collect();
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));

    if paths.is_empty() {
        bail!("no input files match {}", full);
    }
    info!(count = paths.len(), pattern = %full, "discovered datasheets");
    Ok(paths)
}
