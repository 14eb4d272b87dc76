use chrono::NaiveDate;
use serde::Serialize;

use crate::process::CanonicalTable;
use crate::schema::canonical::DATE;

/// Earliest/latest sampling date, read from the numeric `DateUTC` field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DateSummary {
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
    pub missing: usize,
    /// Present but not a real `YYYYMMDD` calendar date.
    pub invalid: usize,
}

/// `20210722.0` → 2021-07-22. Anything fractional or out of calendar → `None`.
pub fn parse_yyyymmdd(v: f64) -> Option<NaiveDate> {
    if v.fract() != 0.0 || !(10_000_101.0..=99_991_231.0).contains(&v) {
        return None;
    }
    let n = v as u32;
    NaiveDate::from_ymd_opt((n / 10_000) as i32, (n / 100) % 100, n % 100)
}

pub fn summarize_dates(table: &CanonicalTable) -> DateSummary {
    let mut s = DateSummary::default();
    for row in 0..table.num_rows() {
        match table.number(row, DATE) {
            None => s.missing += 1,
            Some(v) => match parse_yyyymmdd(v) {
                None => s.invalid += 1,
                Some(d) => {
                    s.earliest = Some(s.earliest.map_or(d, |e| e.min(d)));
                    s.latest = Some(s.latest.map_or(d, |l| l.max(d)));
                }
            },
        }
    }
    s
}
