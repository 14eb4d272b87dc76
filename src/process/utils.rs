use crate::schema::Cell;

/// 1) Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// 2) Parse a cleaned string as a float. NaN counts as "no number".
pub fn parse_number(s: &str) -> Option<f64> {
    clean_str(s).parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// 3) First-pass typing of one raw CSV field.
///
/// Empty fields and read sentinels are missing; anything numeric-looking is a
/// number unless the column is string-forced.
pub fn infer_cell(raw: &str, sentinels: &[String], force_text: bool) -> Cell {
    if raw.is_empty() || sentinels.iter().any(|s| s == raw) {
        return Cell::Missing;
    }
    if !force_text {
        if let Some(v) = parse_number(raw) {
            return Cell::Number(v);
        }
    }
    Cell::Text(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dash() -> Vec<String> {
        vec!["-".to_string()]
    }

    #[test]
    fn test_clean_str() {
        assert_eq!(clean_str("  \"41.5\" "), "41.5");
        assert_eq!(clean_str("\""), "\"");
        assert_eq!(clean_str(" EN655 "), "EN655");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("41.5"), Some(41.5));
        assert_eq!(parse_number(" -70.25 "), Some(-70.25));
        assert_eq!(parse_number("n/a-ish-text"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_infer_cell() {
        assert_eq!(infer_cell("-", &dash(), false), Cell::Missing);
        assert_eq!(infer_cell("", &dash(), false), Cell::Missing);
        assert_eq!(infer_cell("12", &dash(), false), Cell::Number(12.0));
        assert_eq!(infer_cell("20230512", &dash(), true), Cell::Text("20230512".into()));
        assert_eq!(infer_cell("NA", &dash(), false), Cell::Text("NA".into()));
        // "-5" is a number, not the sentinel
        assert_eq!(infer_cell("-5", &dash(), false), Cell::Number(-5.0));
    }
}
