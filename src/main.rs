//! Binary entry point that glues the CSV-backed record store to the TUI. The
//! bootstrapping pipeline is short: read the settings, load the backing
//! table, build the session, and drive the Ratatui event loop until the user
//! exits. A malformed table (missing id column, duplicate ids) aborts here
//! with a readable message; everything after startup is reported inside the
//! UI instead.

use anyhow::{Context, Result};

use case_reviewer::config;
use case_reviewer::docs::DocumentIndex;
use case_reviewer::{run_app, App, NavigationPolicy, RecordStore, SessionController};

fn main() -> Result<()> {
    let settings = config::load()?;

    let store = RecordStore::open(&settings.table_path).with_context(|| {
        format!(
            "failed to load backing table {}",
            settings.table_path.display()
        )
    })?;
    let session = SessionController::new(
        store,
        NavigationPolicy {
            warn_unsaved: settings.warn_unsaved,
        },
    );
    let docs = DocumentIndex::new(&settings.pdf_dir, &settings.txt_dir);

    let mut app = App::new(session, docs, settings);
    run_app(&mut app)
}
