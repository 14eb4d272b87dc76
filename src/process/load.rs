// src/process/load.rs

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::{collections::HashSet, fs::File, io::BufReader, path::Path, sync::Arc};
use tracing::{debug, warn};

use super::utils::infer_cell;
use super::RawTable;
use crate::config::Config;
use crate::schema::Cell;

/// Read-time settings for the per-file loader.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field texts that mean "no value" while reading (e.g. "-").
    pub read_sentinels: Vec<String>,
    /// Columns whose values are never parsed as numbers at read time.
    pub string_columns: HashSet<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions::from(&Config::default())
    }
}

impl From<&Config> for LoadOptions {
    fn from(cfg: &Config) -> Self {
        LoadOptions {
            read_sentinels: cfg.read_sentinels.clone(),
            string_columns: cfg.string_columns.iter().cloned().collect(),
        }
    }
}

/// Read one event-log datasheet into a [`RawTable`].
///
/// Every field goes through a first-pass typing (see [`infer_cell`]). Rows
/// shorter than the header are padded with missing cells, longer ones are cut.
/// An unreadable file or one without a header row is an error.
#[tracing::instrument(level = "debug", skip(path, opts), fields(path = %path.as_ref().display()))]
pub fn load_event_log<P: AsRef<Path>>(path: P, opts: &LoadOptions) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let source: Arc<str> = Arc::from(
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
    );

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = rdr
        .byte_headers()
        .with_context(|| format!("Failed to read header row of {:?}", path))?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        bail!("{:?} has no header row", path);
    }

    let forced: Vec<bool> = headers
        .iter()
        .map(|h| opts.string_columns.contains(h))
        .collect();

    let mut rows = Vec::new();
    let mut lines = Vec::new();
    let mut ragged = 0usize;
    for (idx, result) in rdr.byte_records().enumerate() {
        let record = result
            .with_context(|| format!("CSV parse error in {:?} at record {}", path, idx))?;
        if record.len() != headers.len() {
            ragged += 1;
        }

        let mut row: Vec<Cell> = Vec::with_capacity(headers.len());
        for (col, force_text) in forced.iter().enumerate() {
            let cell = match record.get(col) {
                Some(raw) => infer_cell(&String::from_utf8_lossy(raw), &opts.read_sentinels, *force_text),
                None => Cell::Missing,
            };
            row.push(cell);
        }
        rows.push(row);
        lines.push(record.position().map(|p| p.line()).unwrap_or(idx as u64 + 2));
    }

    if ragged > 0 {
        warn!(file = %source, ragged, "rows with a field count different from the header");
    }
    debug!(file = %source, columns = headers.len(), rows = rows.len(), "loaded");

    Ok(RawTable {
        source,
        headers,
        rows,
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,towmerge::process=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn write_csv(content: &str) -> Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(content.as_bytes())?;
        Ok(tmp)
    }

    #[test]
    fn test_load_event_log_types_and_sentinels() -> Result<()> {
        init_test_logging();
        let tmp = write_csv(
            "cruise,cast,DateUTC,lat,long,TimeInWaterUTC,avg_angle\n\
             EN655,1,20210722,41.5,-70.9,08:05,-\n\
             EN655,2,20210723,41.6,-70.8,13:40,45\n",
        )?;

        let table = load_event_log(tmp.path(), &LoadOptions::default())?;
        assert_eq!(
            table.headers,
            vec!["cruise", "cast", "DateUTC", "lat", "long", "TimeInWaterUTC", "avg_angle"]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.lines, vec![2, 3]);

        let first = &table.rows[0];
        assert_eq!(first[0], Cell::Text("EN655".into()));
        // string-forced columns stay text even though they look numeric
        assert_eq!(first[1], Cell::Text("1".into()));
        assert_eq!(first[2], Cell::Text("20210722".into()));
        assert_eq!(first[3], Cell::Number(41.5));
        assert_eq!(first[4], Cell::Number(-70.9));
        assert_eq!(first[5], Cell::Text("08:05".into()));
        assert_eq!(first[6], Cell::Missing);
        assert_eq!(table.rows[1][6], Cell::Number(45.0));
        Ok(())
    }

    #[test]
    fn test_ragged_rows_are_padded_and_cut() -> Result<()> {
        init_test_logging();
        let tmp = write_csv("cruise,cast,lat\nEN655,1\nEN655,2,41.0,extra\n")?;

        let table = load_event_log(tmp.path(), &LoadOptions::default())?;
        assert!(table.rows.iter().all(|r| r.len() == 3));
        assert_eq!(table.rows[0][2], Cell::Missing);
        assert_eq!(table.rows[1][2], Cell::Number(41.0));
        Ok(())
    }

    #[test]
    fn test_empty_file_is_fatal() -> Result<()> {
        let tmp = write_csv("")?;
        assert!(load_event_log(tmp.path(), &LoadOptions::default()).is_err());
        Ok(())
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load_event_log("/no/such/EN000.csv", &LoadOptions::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("EN000.csv"));
    }
}
