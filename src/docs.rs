//! Lookup of the external documents associated with a case. The core only
//! resolves paths; opening them (and complaining when they are missing) is
//! the UI's job.

use std::path::{Path, PathBuf};

/// The two document kinds kept alongside each case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Pdf,
    Txt,
}

impl DocKind {
    pub fn extension(self) -> &'static str {
        match self {
            DocKind::Pdf => "pdf",
            DocKind::Txt => "txt",
        }
    }

    /// Short label used in "file missing" messages.
    pub fn label(self) -> &'static str {
        match self {
            DocKind::Pdf => "PDF",
            DocKind::Txt => "TXT",
        }
    }
}

/// Read-only resolver from case id to on-disk document path. Documents follow
/// the `case_{id}.{ext}` naming convention inside a per-kind folder.
#[derive(Debug, Clone)]
pub struct DocumentIndex {
    pdf_dir: PathBuf,
    txt_dir: PathBuf,
}

impl DocumentIndex {
    pub fn new(pdf_dir: impl Into<PathBuf>, txt_dir: impl Into<PathBuf>) -> Self {
        Self {
            pdf_dir: pdf_dir.into(),
            txt_dir: txt_dir.into(),
        }
    }

    /// Path of the document for `id`, or `None` when no such file exists.
    pub fn locate(&self, id: &str, kind: DocKind) -> Option<PathBuf> {
        let dir: &Path = match kind {
            DocKind::Pdf => &self.pdf_dir,
            DocKind::Txt => &self.txt_dir,
        };
        let path = dir.join(format!("case_{}.{}", id, kind.extension()));
        path.is_file().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn locate_finds_only_existing_documents() {
        let dir = tempdir().unwrap();
        let pdfs = dir.path().join("pdfs");
        let txts = dir.path().join("txts");
        fs::create_dir_all(&pdfs).unwrap();
        fs::create_dir_all(&txts).unwrap();
        fs::write(pdfs.join("case_101.pdf"), b"%PDF").unwrap();

        let index = DocumentIndex::new(&pdfs, &txts);
        assert!(index.locate("101", DocKind::Pdf).is_some());
        assert!(index.locate("101", DocKind::Txt).is_none());
        assert!(index.locate("102", DocKind::Pdf).is_none());
    }
}
