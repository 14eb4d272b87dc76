// src/schema/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single loosely-typed cell value.
///
/// Phase 1 of the pipeline (load + per-file normalization) produces these with
/// whatever representation the source file suggested; phase 2 (coercion) then
/// settles each canonical column on one representation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Missing,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the cell as text, `None` for missing.
    /// Numbers use the shortest round-trip form, so `3.0` renders as `3`.
    pub fn render(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(v) => Some(v.to_string()),
        }
    }

    /// Convert a number into its text form, leaving text and missing alone.
    pub fn into_text(self) -> Cell {
        match self {
            Cell::Number(v) => Cell::Text(v.to_string()),
            other => other,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(v) => write!(f, "{}", v),
        }
    }
}

/// Representation a column settled on within one source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnKind {
    /// Every non-missing cell is a number.
    Numeric,
    /// At least one cell is text; any numbers were flattened to text.
    Text,
    /// No non-missing cells at all.
    Empty,
}

/// Target semantic type of a canonical field after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Numeric,
    TimeOfDay,
    Text,
}

/// Mesh designation of the two parallel net families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NetSize {
    Mesh150,
    Mesh335,
}

impl NetSize {
    pub fn as_str(&self) -> &str {
        match self {
            NetSize::Mesh150 => "150",
            NetSize::Mesh335 => "335",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "150" => Some(NetSize::Mesh150),
            "335" => Some(NetSize::Mesh335),
            _ => None,
        }
    }
}
