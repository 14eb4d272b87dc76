// src/qa/checks.rs

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::config::{AcceptedOutlier, Range};
use crate::process::{CanonicalTable, RowOrigin};
use crate::schema::canonical::{CAST, CRUISE, LAT, LON, SAMPLE_NAME, STATION};

/// Identity of one sampling event plus where it was read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRef {
    pub cruise: Option<String>,
    pub station: Option<String>,
    pub cast: Option<String>,
    pub sample_name: Option<String>,
    pub origin: RowOrigin,
}

impl EventRef {
    pub fn at(table: &CanonicalTable, row: usize) -> Self {
        let text = |name: &str| table.text(row, name).map(str::to_string);
        EventRef {
            cruise: text(CRUISE),
            station: text(STATION),
            cast: text(CAST),
            sample_name: text(SAMPLE_NAME),
            origin: table.table.origins[row].clone(),
        }
    }
}

/// A numeric value outside its expected range.
#[derive(Debug, Clone, Serialize)]
pub struct RangeFinding {
    pub field: String,
    pub value: f64,
    pub expected: Range,
    pub event: EventRef,
    /// True when an allow-list entry vouches for this value.
    pub accepted: bool,
    pub note: Option<String>,
}

/// Check every configured range. Values are never altered; accepted outliers
/// are still reported, only flagged.
pub fn range_findings(
    table: &CanonicalTable,
    ranges: &BTreeMap<String, Range>,
    accepted: &[AcceptedOutlier],
) -> Vec<RangeFinding> {
    let mut findings = Vec::new();
    for row in 0..table.num_rows() {
        for (field, range) in ranges {
            let Some(value) = table.number(row, field) else {
                continue;
            };
            if range.contains(value) {
                continue;
            }
            let event = EventRef::at(table, row);
            let allow = accepted
                .iter()
                .find(|a| a.matches(event.cruise.as_deref(), event.cast.as_deref(), field));
            findings.push(RangeFinding {
                field: field.clone(),
                value,
                expected: *range,
                accepted: allow.is_some(),
                note: allow.map(|a| a.note.clone()),
                event,
            });
        }
    }
    findings
}

/// Events that cannot be placed on a map: `lat` or `lon` missing.
pub fn missing_coordinates(table: &CanonicalTable) -> Vec<EventRef> {
    (0..table.num_rows())
        .filter(|&row| table.number(row, LAT).is_none() || table.number(row, LON).is_none())
        .map(|row| EventRef::at(table, row))
        .collect()
}

/// An event key (cruise, station, cast, sample_name) seen more than once.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateEvent {
    pub key: [Option<String>; 4],
    pub origins: Vec<RowOrigin>,
}

/// Report repeated event keys in first-seen order. Nothing is removed.
pub fn duplicate_events(table: &CanonicalTable) -> Vec<DuplicateEvent> {
    let mut order: Vec<[Option<String>; 4]> = Vec::new();
    let mut seen: HashMap<[Option<String>; 4], Vec<RowOrigin>> = HashMap::new();

    for row in 0..table.num_rows() {
        let e = EventRef::at(table, row);
        let key = [e.cruise, e.station, e.cast, e.sample_name];
        let origins = seen.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Vec::new()
        });
        origins.push(e.origin);
    }

    order
        .into_iter()
        .filter_map(|key| {
            let origins = seen.remove(&key)?;
            (origins.len() > 1).then_some(DuplicateEvent { key, origins })
        })
        .collect()
}
