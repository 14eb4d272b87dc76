// src/schema/canonical.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use super::types::{FieldKind, NetSize};

/// Source column name → canonical field name.
///
/// Source-only names that already match their canonical name (cruise, station,
/// cast, sample_name, lat, DateUTC) are not listed and pass through unchanged.
pub const RENAMES: &[(&str, &str)] = &[
    ("TimeInWaterUTC", "Time_start_UTC"),
    ("TimeOutWaterUTC", "Time_end_UTC"),
    ("long", "lon"),
    ("bot_depth", "depth_bottom"),
    ("target_depth", "depth_target"),
    ("TDRdepth", "depth_TDR"),
    ("335FlowMeterNum", "FlowMeterSerial_335"),
    ("335FlowStart", "FlowStart_335"),
    ("335FlowEnd", "FlowEnd_335"),
    ("335TotFlow", "TotFlow_335"),
    ("335Volume_filteredm3", "Vol_Filtered_m3_335"),
    ("335_NOAA", "NOAA_335"),
    ("335_DNA", "DNA_335"),
    ("150FlowMeterNum", "FlowMeterSerial_150"),
    ("150FlowStart", "FlowStart_150"),
    ("150FlowEnd", "FlowEnd_150"),
    ("150TotFlow", "TotFlow_150"),
    ("150Volume_filteredm3", "Vol_Filtered_m3_150"),
    ("150_MorphID", "MorphID_150"),
    ("150_DNA", "DNA_150"),
    ("150_SizeFract", "SizeFract_150"),
    ("150_TaxaPicking", "TaxaPick_150"),
];

pub const TIME_START: &str = "Time_start_UTC";
pub const TIME_END: &str = "Time_end_UTC";
pub const TIME_FIELDS: &[&str] = &[TIME_START, TIME_END];

pub const CRUISE: &str = "cruise";
pub const STATION: &str = "station";
pub const CAST: &str = "cast";
pub const SAMPLE_NAME: &str = "sample_name";
pub const LAT: &str = "lat";
pub const LON: &str = "lon";
pub const DATE: &str = "DateUTC";

/// Canonical fields parsed as `f64` by the coercer.
pub const NUMERIC_FIELDS: &[&str] = &[
    DATE,
    LAT,
    LON,
    "depth_bottom",
    "depth_target",
    "avg_angle",
    "depth_TDR",
    "FlowStart_335",
    "FlowEnd_335",
    "TotFlow_335",
    "Vol_Filtered_m3_335",
    "FlowStart_150",
    "FlowEnd_150",
    "TotFlow_150",
    "Vol_Filtered_m3_150",
];

static RENAME_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| RENAMES.iter().copied().collect());

// "150FlowStart", "335_DNA", "150 SizeFract" ...
static FAMILY_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(150|335)[_ ]?([A-Za-z].*)$").expect("static regex"));

/// Canonical name for a source column, if it is one of the mapped names.
pub fn canonical_name(source: &str) -> Option<&'static str> {
    RENAME_LOOKUP.get(source).copied()
}

/// Target type of a canonical field.
pub fn field_kind(name: &str) -> FieldKind {
    if TIME_FIELDS.contains(&name) {
        FieldKind::TimeOfDay
    } else if NUMERIC_FIELDS.contains(&name) {
        FieldKind::Numeric
    } else {
        FieldKind::Text
    }
}

/// If `source` is named like a net-size family column (`335TotFlow`,
/// `150_DNA`), return the size and the remainder of the name.
pub fn net_size_family(source: &str) -> Option<(NetSize, String)> {
    let caps = FAMILY_PREFIX.captures(source)?;
    let size = NetSize::from_str(caps.get(1)?.as_str())?;
    Some((size, caps.get(2)?.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rename_table_is_injective() {
        let sources: HashSet<_> = RENAMES.iter().map(|(s, _)| *s).collect();
        let targets: HashSet<_> = RENAMES.iter().map(|(_, t)| *t).collect();
        assert_eq!(sources.len(), RENAMES.len());
        assert_eq!(targets.len(), RENAMES.len());
        // no canonical name is itself a source name
        assert!(sources.is_disjoint(&targets));
    }

    #[test]
    fn test_family_names_carry_size_suffix() {
        for (source, target) in RENAMES {
            if let Some((size, _)) = net_size_family(source) {
                assert!(
                    target.ends_with(&format!("_{}", size.as_str())),
                    "{} -> {} lost its size tag",
                    source,
                    target
                );
            }
        }
    }

    #[test]
    fn test_field_kinds() {
        assert_eq!(field_kind("lat"), FieldKind::Numeric);
        assert_eq!(field_kind("Vol_Filtered_m3_150"), FieldKind::Numeric);
        assert_eq!(field_kind("Time_end_UTC"), FieldKind::TimeOfDay);
        assert_eq!(field_kind("FlowMeterSerial_335"), FieldKind::Text);
        assert_eq!(field_kind("cast"), FieldKind::Text);
    }

    #[test]
    fn test_net_size_family_detection() {
        assert_eq!(
            net_size_family("335TotFlow"),
            Some((NetSize::Mesh335, "TotFlow".to_string()))
        );
        assert_eq!(
            net_size_family("150_Notes"),
            Some((NetSize::Mesh150, "Notes".to_string()))
        );
        assert_eq!(net_size_family("lat"), None);
        assert_eq!(net_size_family("1500"), None);
    }
}
