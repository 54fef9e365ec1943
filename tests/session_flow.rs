//! End-to-end exercises of the review loop against real files: load a table,
//! edit through the session controller, persist, and check what actually
//! landed on disk.

use std::fs;
use std::path::PathBuf;

use tempfile::{tempdir, TempDir};

use case_reviewer::errors::ReviewError;
use case_reviewer::session::{NavOutcome, PromptChoice, PromptResolution, SessionState};
use case_reviewer::sheets::{split_even, write_sheet};
use case_reviewer::store::read_header;
use case_reviewer::{NavigationPolicy, RecordStore, SessionController};

const TABLE: &str = "Case ID,Reviewed,Escalated,Notes,Case Done\n\
                     101,,,,\n\
                     102,1,,second case,\n\
                     103,,1,,\n";

fn session_over(contents: &str, warn: bool) -> (SessionController, TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cases.csv");
    fs::write(&path, contents).unwrap();
    let store = RecordStore::open(&path).unwrap();
    let session = SessionController::new(store, NavigationPolicy { warn_unsaved: warn });
    (session, dir, path)
}

#[test]
fn marking_a_case_done_persists_only_that_case() {
    let (mut session, _dir, path) = session_over(TABLE, true);

    assert!(session.display(0));
    assert_eq!(session.current_record().unwrap().id, "101");
    session.set_done(true);
    assert!(session.is_dirty());

    session.commit().unwrap();
    assert!(!session.is_dirty());

    let reloaded = RecordStore::open(&path).unwrap();
    let table = reloaded.table();
    assert!(table.get(0).unwrap().done);
    assert!(!table.get(1).unwrap().done);
    assert!(!table.get(2).unwrap().done);
    // The neighbours kept their other values too.
    assert!(table.get(1).unwrap().flag("Reviewed"));
    assert_eq!(table.get(1).unwrap().notes, "second case");
    assert!(table.get(2).unwrap().flag("Escalated"));
}

#[test]
fn jump_to_unknown_id_reports_and_stays_on_current_case() {
    let (mut session, _dir, _path) = session_over(TABLE, true);
    session.display(0);

    let err = session.jump_to("999").unwrap_err();
    assert!(matches!(err, ReviewError::RecordNotFound(_)));
    assert_eq!(session.current_record().unwrap().id, "101");
}

#[test]
fn unsaved_edits_survive_every_prompt_outcome_except_discard() {
    let (mut session, _dir, path) = session_over(TABLE, true);
    session.display(0);
    session.set_notes("draft notes".to_string());

    // Cancel: still on 101, edits intact, nothing persisted.
    assert_eq!(session.next(), NavOutcome::PromptRequired);
    assert_eq!(
        session.resolve_prompt(PromptChoice::Cancel).unwrap(),
        PromptResolution::Retained
    );
    assert_eq!(session.buffer().notes(), "draft notes");
    assert!(RecordStore::open(&path)
        .unwrap()
        .table()
        .get(0)
        .unwrap()
        .notes
        .is_empty());

    // Save: edits persisted, then the move happens.
    assert_eq!(session.next(), NavOutcome::PromptRequired);
    assert_eq!(
        session.resolve_prompt(PromptChoice::Save).unwrap(),
        PromptResolution::Navigated
    );
    assert_eq!(session.current_record().unwrap().id, "102");
    assert_eq!(
        RecordStore::open(&path).unwrap().table().get(0).unwrap().notes,
        "draft notes"
    );

    // Discard: the edit is dropped, memory and disk agree.
    session.set_done(true);
    assert_eq!(session.previous(), NavOutcome::PromptRequired);
    assert_eq!(
        session.resolve_prompt(PromptChoice::Discard).unwrap(),
        PromptResolution::Navigated
    );
    session.jump_to("102").unwrap();
    assert!(!session.buffer().done());
    assert!(!RecordStore::open(&path).unwrap().table().get(1).unwrap().done);
}

#[test]
fn closing_with_a_dirty_buffer_saves_on_request() {
    let (mut session, _dir, path) = session_over(TABLE, true);
    session.display(2);
    session.set_field("Reviewed", true).unwrap();

    session.request_close();
    assert_eq!(
        session.resolve_prompt(PromptChoice::Save).unwrap(),
        PromptResolution::Closed
    );
    assert_eq!(session.state(), SessionState::Closed);

    let reloaded = RecordStore::open(&path).unwrap();
    assert!(reloaded.table().get(2).unwrap().flag("Reviewed"));
}

#[test]
fn whole_table_overwrite_preserves_column_layout() {
    let (mut session, _dir, path) = session_over(TABLE, true);
    session.display(1);
    session.set_notes("updated".to_string());
    session.commit().unwrap();

    let header = read_header(&path).unwrap();
    assert_eq!(
        header,
        vec!["Case ID", "Reviewed", "Escalated", "Notes", "Case Done"]
    );
}

#[test]
fn generated_sheets_feed_straight_into_a_review_session() {
    let dir = tempdir().unwrap();
    let template = dir.path().join("template.csv");
    fs::write(&template, "Case ID,Reviewed,Notes,Case Done\n").unwrap();
    let header = read_header(&template).unwrap();

    let ids: Vec<String> = (1..=5).map(|n| format!("case_{n}")).collect();
    let slices = split_even(&ids, 2);
    assert_eq!(slices[0].len(), 3);
    assert_eq!(slices[1].len(), 2);

    let sheet = dir.path().join("part1.csv");
    write_sheet(&header, &slices[0], &sheet).unwrap();

    let store = RecordStore::open(&sheet).unwrap();
    let mut session = SessionController::new(store, NavigationPolicy { warn_unsaved: true });
    session.display(0);
    session.set_done(true);
    session.commit().unwrap();

    let reloaded = RecordStore::open(&sheet).unwrap();
    assert!(reloaded.table().get(0).unwrap().done);
    assert_eq!(reloaded.table().done_count(), 1);
}
