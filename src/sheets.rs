//! Batch generation of fresh review tables. Given a folder of case documents
//! and a template table, this produces several near-equal table slices with
//! one empty row per document, ready to hand out to reviewers. A one-off
//! utility, not part of the interactive session.

use std::fs;
use std::path::Path;

use crate::errors::{ReviewError, Result};
use crate::models::ID_COLUMN;

/// File stems of all `.pdf` documents in `folder`, sorted so the generated
/// sheets are deterministic.
pub fn document_stems(folder: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(folder).map_err(|source| ReviewError::StorageUnavailable {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut stems = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ReviewError::StorageUnavailable {
            path: folder.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                stems.push(stem.to_string());
            }
        }
    }
    stems.sort();
    Ok(stems)
}

/// Split `items` into `parts` near-equal slices, earlier slices taking the
/// remainder. Order is preserved; slice lengths differ by at most one.
pub fn split_even<T: Clone>(items: &[T], parts: usize) -> Vec<Vec<T>> {
    if parts == 0 {
        return Vec::new();
    }
    let base = items.len() / parts;
    let remainder = items.len() % parts;

    let mut out = Vec::with_capacity(parts);
    let mut start = 0;
    for part in 0..parts {
        let len = base + usize::from(part < remainder);
        out.push(items[start..start + len].to_vec());
        start += len;
    }
    out
}

/// Write a fresh sheet carrying the template's column layout, one row per id
/// with every other cell empty. Fails with `Schema` when the template has no
/// id column, since the resulting sheet could never be reviewed.
pub fn write_sheet(header: &[String], ids: &[String], out_path: &Path) -> Result<()> {
    let id_position = header
        .iter()
        .position(|name| name == ID_COLUMN)
        .ok_or_else(|| {
            ReviewError::Schema(format!("template has no {ID_COLUMN:?} column"))
        })?;

    let map_err = |err: csv::Error| match err.into_kind() {
        csv::ErrorKind::Io(source) => ReviewError::StorageUnavailable {
            path: out_path.to_path_buf(),
            source,
        },
        other => ReviewError::Schema(format!("{other:?}")),
    };

    let mut writer = csv::Writer::from_path(out_path).map_err(map_err)?;
    writer.write_record(header).map_err(map_err)?;
    for id in ids {
        let mut row = vec![""; header.len()];
        row[id_position] = id.as_str();
        writer.write_record(&row).map_err(map_err)?;
    }
    writer.flush().map_err(|source| ReviewError::StorageUnavailable {
        path: out_path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{read_header, RecordStore};
    use tempfile::tempdir;

    #[test]
    fn split_even_matches_divmod_distribution() {
        let items: Vec<u32> = (0..10).collect();
        let parts = split_even(&items, 3);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], vec![0, 1, 2, 3]);
        assert_eq!(parts[1], vec![4, 5, 6]);
        assert_eq!(parts[2], vec![7, 8, 9]);
    }

    #[test]
    fn split_even_handles_more_parts_than_items() {
        let items = vec!["a", "b"];
        let parts = split_even(&items, 4);
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], vec!["a"]);
        assert_eq!(parts[1], vec!["b"]);
        assert!(parts[2].is_empty());
        assert!(parts[3].is_empty());
    }

    #[test]
    fn generated_sheet_is_loadable_and_carries_the_ids() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("template.csv");
        std::fs::write(&template, "Case ID,Reviewed,Notes,Case Done\n").unwrap();

        let header = read_header(&template).unwrap();
        let ids = vec!["case-a".to_string(), "case-b".to_string()];
        let out = dir.path().join("part1.csv");
        write_sheet(&header, &ids, &out).unwrap();

        let store = RecordStore::open(&out).unwrap();
        let table = store.table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0).unwrap().id, "case-a");
        assert!(!table.get(0).unwrap().flag("Reviewed"));
        assert!(table.index_of("case-b").is_some());
    }

    #[test]
    fn document_stems_picks_pdfs_only() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("case_2.pdf"), b"").unwrap();
        std::fs::write(dir.path().join("case_1.PDF"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let stems = document_stems(dir.path()).unwrap();
        assert_eq!(stems, vec!["case_1", "case_2"]);
    }
}
