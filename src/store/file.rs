//! Whole-file CSV load and persist for the backing table. Writes go through a
//! temp file in the destination directory followed by an atomic rename, so a
//! crash or full disk mid-write leaves the previous table intact.

use std::fs::File;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::errors::{ReviewError, Result};
use crate::models::{Record, DONE_COLUMN, ID_COLUMN, NOTES_COLUMN};

use super::table::RecordTable;

/// A cell is truthy only when it holds the literal `1`; anything else,
/// including whitespace and absent cells, reads as false.
fn truthy(cell: &str) -> bool {
    cell.trim() == "1"
}

/// Flag value written back for boolean columns. Empty rather than `0` so the
/// sheets stay readable when opened in a spreadsheet program.
fn flag_cell(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        ""
    }
}

/// Translate a csv crate failure: underlying I/O problems mean the storage is
/// unavailable, everything else means the table itself is malformed.
fn csv_error(path: &Path, err: csv::Error) -> ReviewError {
    match err.into_kind() {
        csv::ErrorKind::Io(source) => ReviewError::StorageUnavailable {
            path: path.to_path_buf(),
            source,
        },
        other => ReviewError::Schema(format!("{other:?}")),
    }
}

/// Read the full table from `path`. Fails with `StorageUnavailable` when the
/// file cannot be opened and `Schema` when the id column is missing. Older
/// sheets without `Notes` / `Case Done` columns are upgraded in memory by
/// appending both columns empty; the next persist writes them out.
pub fn load(path: &Path) -> Result<RecordTable> {
    let file = File::open(path).map_err(|source| ReviewError::StorageUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let raw_header: Vec<String> = reader
        .headers()
        .map_err(|err| csv_error(path, err))?
        .iter()
        .map(str::to_string)
        .collect();

    let id_position = raw_header
        .iter()
        .position(|name| name == ID_COLUMN)
        .ok_or_else(|| {
            ReviewError::Schema(format!("required column {ID_COLUMN:?} is missing"))
        })?;

    let mut header = raw_header.clone();
    for optional in [NOTES_COLUMN, DONE_COLUMN] {
        if !header.iter().any(|name| name == optional) {
            header.push(optional.to_string());
        }
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|err| csv_error(path, err))?;
        let cell = |position: usize| row.get(position).unwrap_or("");

        let mut record = Record {
            id: cell(id_position).trim().to_string(),
            fields: Default::default(),
            notes: String::new(),
            done: false,
        };
        for (position, name) in raw_header.iter().enumerate() {
            match name.as_str() {
                ID_COLUMN => {}
                NOTES_COLUMN => record.notes = cell(position).to_string(),
                DONE_COLUMN => record.done = truthy(cell(position)),
                _ => {
                    record.fields.insert(name.clone(), truthy(cell(position)));
                }
            }
        }
        // Older sheets may lack some attribute cells entirely; the loop above
        // already defaulted those to false via `cell`.
        records.push(record);
    }

    RecordTable::new(header, records)
}

/// Serialize the entire table to `path`, replacing the previous file on
/// success. On failure nothing on disk changes and the caller's in-memory
/// table is untouched, so the operation can simply be retried.
pub fn persist(table: &RecordTable, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp =
        NamedTempFile::new_in(dir).map_err(|source| ReviewError::StorageUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

    {
        let mut writer = csv::Writer::from_writer(temp.as_file_mut());
        writer
            .write_record(table.header())
            .map_err(|err| csv_error(path, err))?;

        for record in table.records() {
            let row: Vec<&str> = table
                .header()
                .iter()
                .map(|name| match name.as_str() {
                    ID_COLUMN => record.id.as_str(),
                    NOTES_COLUMN => record.notes.as_str(),
                    DONE_COLUMN => flag_cell(record.done),
                    attribute => flag_cell(record.flag(attribute)),
                })
                .collect();
            writer.write_record(&row).map_err(|err| csv_error(path, err))?;
        }
        writer.flush().map_err(|source| ReviewError::StorageUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
    }

    temp.persist(path)
        .map_err(|err| ReviewError::StorageUnavailable {
            path: path.to_path_buf(),
            source: err.error,
        })?;
    Ok(())
}

/// Read only the header row of a table. Used by the sheet generator to clone
/// a template's column layout.
pub fn read_header(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|source| ReviewError::StorageUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);
    let header = reader
        .headers()
        .map_err(|err| csv_error(path, err))?
        .iter()
        .map(str::to_string)
        .collect();
    Ok(header)
}
