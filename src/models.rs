//! Domain types passed between the store, the session layer, and the TUI.
//! These stay light-weight data holders so the other layers can focus on
//! persistence and presentation logic.

use std::collections::HashMap;

/// Header name of the required unique identifier column.
pub const ID_COLUMN: &str = "Case ID";
/// Header name of the optional free-text notes column.
pub const NOTES_COLUMN: &str = "Notes";
/// Header name of the optional completion-flag column.
pub const DONE_COLUMN: &str = "Case Done";

/// Columns with dedicated meaning. Every other header cell names a boolean
/// attribute using the `1` / empty-cell convention.
pub const RESERVED_COLUMNS: &[&str] = &[ID_COLUMN, NOTES_COLUMN, DONE_COLUMN];

/// One row of the reviewed table. Ids are kept as strings because the source
/// sheets mix numeric case numbers with filename-derived identifiers; the id
/// is never mutated after load.
#[derive(Debug, Clone)]
pub struct Record {
    /// Stable unique identifier from the `Case ID` column.
    pub id: String,
    /// Boolean attribute flags, keyed by column name. The key set is fixed at
    /// table-load time and identical for every record in a table.
    pub fields: HashMap<String, bool>,
    /// Free-form reviewer notes, possibly empty.
    pub notes: String,
    /// Whether the reviewer marked this case done.
    pub done: bool,
}

impl Record {
    /// Look up an attribute flag, treating unknown names as unset. Unknown
    /// names cannot occur for records built by the loader, but the rendering
    /// code prefers a total function here.
    pub fn flag(&self, name: &str) -> bool {
        self.fields.get(name).copied().unwrap_or(false)
    }
}

/// Immutable snapshot of a record's editable values, produced by the edit
/// buffer and consumed by `RecordStore::apply`. The id is deliberately absent:
/// a patch addresses a record, it never renames one.
#[derive(Debug, Clone)]
pub struct Patch {
    pub fields: HashMap<String, bool>,
    pub notes: String,
    pub done: bool,
}
