//! In-memory table of records with positional and id-based addressing. The
//! table is the single authoritative copy of the data between loads; nothing
//! here performs I/O.

use std::collections::HashMap;

use crate::errors::{ReviewError, Result};
use crate::models::{Patch, Record, RESERVED_COLUMNS};

/// The full ordered sequence of records as loaded from the backing file,
/// indexed by position and by id. Mutated in place only through
/// [`RecordTable::apply`]; rewritten to disk only by a whole-file persist.
#[derive(Debug)]
pub struct RecordTable {
    /// Every column of the backing file, in file order. Preserved verbatim so
    /// a persist reproduces the original layout, including where the reserved
    /// columns happen to sit.
    header: Vec<String>,
    /// The non-reserved subset of `header`, cached because the session and UI
    /// layers iterate it constantly.
    attributes: Vec<String>,
    records: Vec<Record>,
    index_by_id: HashMap<String, usize>,
}

impl RecordTable {
    /// Assemble a table from a header and its rows, building the id index.
    /// Rejects duplicate ids: the whole design assumes exactly one record per
    /// id, and silently keeping either row would corrupt someone's review.
    pub(crate) fn new(header: Vec<String>, records: Vec<Record>) -> Result<Self> {
        let attributes = header
            .iter()
            .filter(|name| !RESERVED_COLUMNS.contains(&name.as_str()))
            .cloned()
            .collect();

        let mut index_by_id = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index_by_id.insert(record.id.clone(), position).is_some() {
                return Err(ReviewError::Schema(format!(
                    "duplicate id {:?} in backing table",
                    record.id
                )));
            }
        }

        Ok(Self {
            header,
            attributes,
            records,
            index_by_id,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Full column list in file order, reserved columns included.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Attribute columns in file order. This is the checkbox schema for every
    /// record of the session.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Resolve an id to its table position.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Overwrite the addressed record's mutable fields with the patch values.
    /// Pure in-memory mutation; the id itself is never touched.
    pub fn apply(&mut self, id: &str, patch: &Patch) -> Result<()> {
        let position = self
            .index_of(id)
            .ok_or_else(|| ReviewError::RecordNotFound(id.to_string()))?;
        let record = &mut self.records[position];
        record.fields = patch.fields.clone();
        record.notes = patch.notes.clone();
        record.done = patch.done;
        Ok(())
    }

    /// How many records carry the done flag. Drives the progress bar.
    pub fn done_count(&self) -> usize {
        self.records.iter().filter(|record| record.done).count()
    }
}
