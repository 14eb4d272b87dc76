pub mod arrow;
pub mod canonical;
pub mod types;

pub use arrow::{build_arrow_schema, map_to_arrow_type};
pub use canonical::{canonical_name, field_kind, net_size_family, RENAMES};
pub use types::{Cell, ColumnKind, FieldKind, NetSize};
