// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

/// Inclusive expected bounds for one numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// A value that is outside its expected range but has been checked by hand.
///
/// Matches on cruise + cast, and on `field` when given (otherwise any field of
/// that event).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedOutlier {
    pub cruise: String,
    pub cast: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub note: String,
}

impl AcceptedOutlier {
    pub fn matches(&self, cruise: Option<&str>, cast: Option<&str>, field: &str) -> bool {
        cruise.map(str::trim) == Some(self.cruise.trim())
            && cast.map(str::trim) == Some(self.cast.trim())
            && self.field.as_deref().map_or(true, |f| f == field)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the per-cruise datasheets.
    pub input_dir: PathBuf,
    /// Glob pattern (relative to `input_dir`) selecting the datasheets.
    pub pattern: String,
    pub output_csv: PathBuf,
    pub output_parquet: Option<PathBuf>,
    pub report_json: Option<PathBuf>,

    /// Cell texts treated as missing while reading.
    pub read_sentinels: Vec<String>,
    /// Cell texts treated as missing after harmonization.
    pub missing_tokens: Vec<String>,
    /// Source columns always read as text, however numeric they look.
    pub string_columns: Vec<String>,

    /// Expected bounds per canonical numeric field.
    pub ranges: BTreeMap<String, Range>,
    pub accepted_outliers: Vec<AcceptedOutlier>,
}

impl Default for Config {
    fn default() -> Self {
        let mut ranges = BTreeMap::new();
        ranges.insert("lat".into(), Range { min: -90.0, max: 90.0 });
        ranges.insert("lon".into(), Range { min: -180.0, max: 180.0 });
        for depth in ["depth_bottom", "depth_target", "depth_TDR"] {
            ranges.insert(depth.into(), Range { min: 0.0, max: 11_000.0 });
        }
        ranges.insert("avg_angle".into(), Range { min: 0.0, max: 90.0 });

        Config {
            input_dir: PathBuf::from("data"),
            pattern: "*.csv".into(),
            output_csv: PathBuf::from("merged_event_log.csv"),
            output_parquet: None,
            report_json: None,
            read_sentinels: vec!["-".into()],
            missing_tokens: vec!["NA".into(), "".into()],
            string_columns: vec!["cast".into(), "DateUTC".into(), "TimeInWaterUTC".into()],
            ranges,
            accepted_outliers: Vec::new(),
        }
    }
}

impl Config {
    /// Load a YAML config; fields not present keep their defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_yaml_keeps_defaults() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(
            tmp,
            r#"
input_dir: /data/eventlogs
accepted_outliers:
  - cruise: EN668
    cast: "12"
    field: depth_TDR
    note: seems off but double checked
"#
        )?;

        let cfg = Config::from_yaml_file(tmp.path())?;
        assert_eq!(cfg.input_dir, PathBuf::from("/data/eventlogs"));
        assert_eq!(cfg.pattern, "*.csv");
        assert_eq!(cfg.read_sentinels, vec!["-".to_string()]);
        assert_eq!(cfg.ranges["lat"], Range { min: -90.0, max: 90.0 });
        assert_eq!(cfg.accepted_outliers.len(), 1);
        assert_eq!(cfg.accepted_outliers[0].field.as_deref(), Some("depth_TDR"));
        Ok(())
    }

    #[test]
    fn test_accepted_outlier_matching() {
        let any_field = AcceptedOutlier {
            cruise: "EN655".into(),
            cast: "4".into(),
            field: None,
            note: String::new(),
        };
        assert!(any_field.matches(Some("EN655"), Some(" 4"), "lat"));
        assert!(!any_field.matches(Some("EN655"), Some("5"), "lat"));
        assert!(!any_field.matches(None, Some("4"), "lat"));

        let one_field = AcceptedOutlier {
            field: Some("avg_angle".into()),
            ..any_field
        };
        assert!(one_field.matches(Some("EN655"), Some("4"), "avg_angle"));
        assert!(!one_field.matches(Some("EN655"), Some("4"), "lat"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(Config::from_yaml_file("/definitely/not/here.yaml").is_err());
    }
}
