//! Persistence module split across logical submodules: the in-memory table
//! and the CSV file round-trip, tied together by [`RecordStore`].

mod file;
mod table;

use std::path::PathBuf;

use crate::errors::Result;
use crate::models::Patch;

pub use file::read_header;
pub use table::RecordTable;

/// Owner of the authoritative table plus the path it round-trips through.
/// All mutation goes through [`RecordStore::apply`]; all durability goes
/// through [`RecordStore::persist`], which rewrites the whole file.
#[derive(Debug)]
pub struct RecordStore {
    table: RecordTable,
    path: PathBuf,
}

impl RecordStore {
    /// Load the backing table and remember where it came from. Schema
    /// problems here are fatal to the session; the caller reports and exits.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let table = file::load(&path)?;
        Ok(Self { table, path })
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    /// Apply a patch to the record with the given id. In-memory only; call
    /// [`RecordStore::persist`] afterwards to make it durable.
    pub fn apply(&mut self, id: &str, patch: &Patch) -> Result<()> {
        self.table.apply(id, patch)
    }

    /// Write the entire table back to the backing file. On failure the
    /// in-memory table and the previous on-disk contents both survive, so the
    /// user can fix the environment and retry.
    pub fn persist(&self) -> Result<()> {
        file::persist(&self.table, &self.path)
    }
}
