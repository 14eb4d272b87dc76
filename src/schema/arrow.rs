// src/schema/arrow.rs

use arrow::datatypes::{DataType, Field as ArrowField, Schema as ArrowSchema};
use std::sync::Arc;

use super::types::FieldKind;

/// Map a canonical field kind into an Arrow DataType.
///
/// - Numeric   → Float64
/// - TimeOfDay → Utf8 (`HH:MM:SS` text, kept as text for CSV parity)
/// - Text      → Utf8
pub fn map_to_arrow_type(kind: FieldKind) -> DataType {
    match kind {
        FieldKind::Numeric => DataType::Float64,
        FieldKind::TimeOfDay | FieldKind::Text => DataType::Utf8,
    }
}

/// Build an ArrowSchema (inside an Arc) from `(name, kind)` pairs.
/// Every field is nullable; missing cells become nulls.
pub fn build_arrow_schema(cols: &[(String, FieldKind)]) -> Arc<ArrowSchema> {
    let fields: Vec<ArrowField> = cols
        .iter()
        .map(|(name, kind)| ArrowField::new(name, map_to_arrow_type(*kind), true))
        .collect();

    Arc::new(ArrowSchema::new(fields))
}
