// src/qa/display.rs

use prettytable::{format, Cell, Row, Table};

use super::QaReport;

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}

/// Range summary as a printable table, one row per numeric field.
pub fn summary_table(report: &QaReport) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    table.add_row(Row::new(vec![
        Cell::new("Field").style_spec("bFg"),
        Cell::new("Count").style_spec("bFg"),
        Cell::new("Missing").style_spec("bFg"),
        Cell::new("Min").style_spec("bFg"),
        Cell::new("Max").style_spec("bFg"),
        Cell::new("Max at").style_spec("bFg"),
    ]));

    for s in &report.summary {
        let max_at = s
            .max_origin
            .as_ref()
            .map(|o| format!("{}:{}", o.file, o.line))
            .unwrap_or_default();
        table.add_row(Row::new(vec![
            Cell::new(&s.field),
            Cell::new(&s.count.to_string()).style_spec("r"),
            Cell::new(&s.missing.to_string()).style_spec("r"),
            Cell::new(&fmt_opt(s.min)).style_spec("r"),
            Cell::new(&fmt_opt(s.max)).style_spec("r"),
            Cell::new(&max_at),
        ]));
    }
    table
}

/// Out-of-range values, accepted ones marked as such.
pub fn findings_table(report: &QaReport) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    table.add_row(Row::new(vec![
        Cell::new("Field").style_spec("bFr"),
        Cell::new("Value").style_spec("bFr"),
        Cell::new("Expected").style_spec("bFr"),
        Cell::new("Cruise").style_spec("bFr"),
        Cell::new("Cast").style_spec("bFr"),
        Cell::new("Source").style_spec("bFr"),
        Cell::new("Status").style_spec("bFr"),
    ]));

    for f in &report.range_findings {
        let status = if f.accepted {
            format!("accepted: {}", f.note.as_deref().unwrap_or(""))
        } else {
            "CHECK".to_string()
        };
        table.add_row(Row::new(vec![
            Cell::new(&f.field),
            Cell::new(&f.value.to_string()).style_spec("r"),
            Cell::new(&format!("[{}, {}]", f.expected.min, f.expected.max)),
            Cell::new(f.event.cruise.as_deref().unwrap_or("")),
            Cell::new(f.event.cast.as_deref().unwrap_or("")),
            Cell::new(&format!("{}:{}", f.event.origin.file, f.event.origin.line)),
            Cell::new(&status),
        ]));
    }
    table
}

/// Print the summary (and findings, if any) to stdout.
pub fn print_report(report: &QaReport) {
    println!("\n--- Range Summary ({} events) ---", report.rows);
    summary_table(report).printstd();

    if let (Some(first), Some(last)) = (report.dates.earliest, report.dates.latest) {
        println!(
            "Dates: {} .. {} ({} missing, {} invalid)",
            first, last, report.dates.missing, report.dates.invalid
        );
    }
    if !report.range_findings.is_empty() {
        println!("\n--- Out-of-range values ---");
        findings_table(report).printstd();
    }
    if !report.missing_coordinates.is_empty() {
        println!(
            "{} events without lat/lon (cannot be mapped)",
            report.missing_coordinates.len()
        );
    }
    if !report.duplicates.is_empty() {
        println!("{} event keys occur more than once", report.duplicates.len());
    }
}
