// src/export.rs

use anyhow::{bail, Context, Result};
use arrow::{
    array::{ArrayRef, Float64Builder, StringBuilder},
    record_batch::RecordBatch,
};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::info;

use crate::process::CanonicalTable;
use crate::schema::{build_arrow_schema, FieldKind};

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the canonical table as CSV: header of canonical names, missing
/// cells as empty fields. Written to `<path>.tmp` first, then renamed.
pub fn write_csv<P: AsRef<Path>>(table: &CanonicalTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let tmp = tmp_path(path);
    {
        let file = File::create(&tmp).with_context(|| format!("creating {:?}", tmp))?;
        let mut wtr = csv::Writer::from_writer(BufWriter::new(file));
        wtr.write_record(table.columns())
            .with_context(|| format!("writing header to {:?}", tmp))?;
        for row in &table.table.rows {
            wtr.write_record(row.iter().map(|c| c.render().unwrap_or_default()))
                .with_context(|| format!("writing row to {:?}", tmp))?;
        }
        wtr.flush().with_context(|| format!("flushing {:?}", tmp))?;
    }
    fs::rename(&tmp, path).with_context(|| format!("renaming {:?} -> {:?}", tmp, path))?;

    info!(path = %path.display(), rows = table.num_rows(), "wrote csv");
    Ok(())
}

/// Build one Arrow RecordBatch from the canonical table.
pub fn to_record_batch(table: &CanonicalTable) -> Result<RecordBatch> {
    let kinds = table.field_kinds();
    if kinds.is_empty() {
        bail!("canonical table has no columns");
    }
    let schema = build_arrow_schema(&kinds);

    let mut out: Vec<ArrayRef> = Vec::with_capacity(kinds.len());
    for (idx, (_, kind)) in kinds.iter().enumerate() {
        let cells = table.table.rows.iter().map(|row| &row[idx]);
        match kind {
            FieldKind::Numeric => {
                let mut b = Float64Builder::with_capacity(table.num_rows());
                for cell in cells {
                    b.append_option(cell.as_number());
                }
                out.push(Arc::new(b.finish()) as ArrayRef);
            }
            FieldKind::TimeOfDay | FieldKind::Text => {
                let mut b = StringBuilder::new();
                for cell in cells {
                    b.append_option(cell.render());
                }
                out.push(Arc::new(b.finish()) as ArrayRef);
            }
        }
    }

    RecordBatch::try_new(schema, out).context("building canonical record batch")
}

/// Write the canonical table as a single Parquet file (SNAPPY).
pub fn write_parquet<P: AsRef<Path>>(table: &CanonicalTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let batch = to_record_batch(table)?;
    let tmp = tmp_path(path);

    let file = File::create(&tmp).with_context(|| format!("creating {:?}", tmp))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .context("creating Arrow writer")?;
    writer.write(&batch).context("writing canonical batch")?;
    writer.close().context("closing parquet writer")?;
    fs::rename(&tmp, path).with_context(|| format!("renaming {:?} -> {:?}", tmp, path))?;

    info!(path = %path.display(), rows = batch.num_rows(), "wrote parquet");
    Ok(())
}
