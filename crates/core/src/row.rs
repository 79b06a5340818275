//! Table rows.

use serde_json::{Map, Value};

/// A table row, treated as an opaque ordered document.
pub type Row = Map<String, Value>;

/// Source-assigned identity column. The target assigns its own.
pub const IDENTITY_FIELD: &str = "id";

/// Remove the identity field, keeping every other field verbatim and in order.
pub fn strip_identity(mut row: Row) -> Row {
    row.shift_remove(IDENTITY_FIELD);
    row
}
