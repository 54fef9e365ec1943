//! The session state machine. All navigation, commit, and shutdown requests
//! flow through [`SessionController`], which owns the store and the edit
//! buffer and enforces the unsaved-changes policy before any move. The
//! rendering layer holds no record state of its own; it only calls the
//! operations here and draws whatever the controller exposes.

use crate::errors::{ReviewError, Result};
use crate::models::Record;
use crate::session::buffer::EditBuffer;
use crate::store::{RecordStore, RecordTable};

/// Process-wide navigation configuration. Only affects whether a dirty buffer
/// blocks navigation behind a prompt; persistence correctness never depends
/// on it.
#[derive(Debug, Clone, Copy)]
pub struct NavigationPolicy {
    pub warn_unsaved: bool,
}

/// Where the session currently is. `Prompting` blocks every operation except
/// [`SessionController::resolve_prompt`]; `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Viewing,
    Prompting,
    Closed,
}

/// The action parked while an unsaved-changes prompt is on screen.
#[derive(Debug, Clone, Copy)]
enum PendingAction {
    Navigate(usize),
    Close,
}

/// What a navigation request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The target record is now displayed.
    Moved,
    /// Out-of-range target or wrong state; nothing changed. Matching the
    /// prev/next buttons, this is a silent no-op rather than an error.
    Ignored,
    /// Unsaved edits exist and the policy warns: the caller must surface the
    /// three-way prompt and come back through `resolve_prompt`.
    PromptRequired,
}

/// What a close request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    PromptRequired,
}

/// The three exhaustive answers to the unsaved-changes prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    /// Commit the buffer, then perform the parked action.
    Save,
    /// Perform the parked action, dropping the buffered edits.
    Discard,
    /// Stay on the current record; the parked action is forgotten.
    Cancel,
}

/// How a prompt resolution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptResolution {
    Navigated,
    Closed,
    /// The session stayed on the current record (cancel, or no prompt was
    /// actually in progress).
    Retained,
}

/// Orchestrates the record store and the edit buffer for one review session.
#[derive(Debug)]
pub struct SessionController {
    store: RecordStore,
    buffer: EditBuffer,
    policy: NavigationPolicy,
    state: SessionState,
    current: Option<usize>,
    pending: Option<PendingAction>,
}

impl SessionController {
    pub fn new(store: RecordStore, policy: NavigationPolicy) -> Self {
        Self {
            store,
            buffer: EditBuffer::new(),
            policy,
            state: SessionState::Idle,
            current: None,
            pending: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn table(&self) -> &RecordTable {
        self.store.table()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_record(&self) -> Option<&Record> {
        self.current.and_then(|index| self.store.table().get(index))
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// `(done, total)` counts for the progress display.
    pub fn done_progress(&self) -> (usize, usize) {
        (self.store.table().done_count(), self.store.table().len())
    }

    /// Load the record at `index` into the buffer and show it. An
    /// out-of-range index is silently ignored, mirroring how the prev/next
    /// controls behave past either end of the table. Returns whether a record
    /// was actually loaded.
    pub fn display(&mut self, index: usize) -> bool {
        if !matches!(self.state, SessionState::Idle | SessionState::Viewing) {
            return false;
        }
        let Some(record) = self.store.table().get(index) else {
            return false;
        };
        self.buffer.seed(record);
        self.current = Some(index);
        self.state = SessionState::Viewing;
        true
    }

    /// Ask to move to `index`, honoring the unsaved-changes policy. Bounds
    /// are checked before the dirty check so that walking past the end of the
    /// table never raises a prompt.
    pub fn request_navigate(&mut self, index: usize) -> NavOutcome {
        match self.state {
            SessionState::Idle => {
                if self.display(index) {
                    NavOutcome::Moved
                } else {
                    NavOutcome::Ignored
                }
            }
            SessionState::Viewing => {
                if index >= self.store.table().len() {
                    return NavOutcome::Ignored;
                }
                if self.buffer.is_dirty() && self.policy.warn_unsaved {
                    self.pending = Some(PendingAction::Navigate(index));
                    self.state = SessionState::Prompting;
                    NavOutcome::PromptRequired
                } else if self.display(index) {
                    NavOutcome::Moved
                } else {
                    NavOutcome::Ignored
                }
            }
            SessionState::Prompting | SessionState::Closed => NavOutcome::Ignored,
        }
    }

    /// Move forward one position. No wraparound; past the last record this is
    /// a silent no-op.
    pub fn next(&mut self) -> NavOutcome {
        match self.current {
            Some(current) if current + 1 < self.store.table().len() => {
                self.request_navigate(current + 1)
            }
            _ => NavOutcome::Ignored,
        }
    }

    /// Move back one position. Silent no-op at the first record.
    pub fn previous(&mut self) -> NavOutcome {
        match self.current {
            Some(current) if current > 0 => self.request_navigate(current - 1),
            _ => NavOutcome::Ignored,
        }
    }

    /// Navigate to the record with the given id. An unknown id is reported to
    /// the caller and leaves the session exactly where it was.
    pub fn jump_to(&mut self, id: &str) -> Result<NavOutcome> {
        let index = self
            .store
            .table()
            .index_of(id)
            .ok_or_else(|| ReviewError::RecordNotFound(id.to_string()))?;
        Ok(self.request_navigate(index))
    }

    /// Write the buffer into the store and persist the whole table.
    /// Committing a clean buffer is a harmless no-op edit that still
    /// re-persists, consistent with whole-table overwrite semantics. On a
    /// persist failure the buffer stays dirty and the session stays in
    /// `Viewing`, so the user can fix the environment and save again.
    pub fn commit(&mut self) -> Result<()> {
        if self.state != SessionState::Viewing {
            return Ok(());
        }
        let Some(id) = self.buffer.record_id().map(str::to_string) else {
            return Ok(());
        };
        let patch = self.buffer.to_patch();
        self.store.apply(&id, &patch)?;
        self.store.persist()?;
        self.buffer.mark_clean();
        Ok(())
    }

    /// Ask to end the session, honoring the same unsaved-changes policy as
    /// navigation.
    pub fn request_close(&mut self) -> CloseOutcome {
        match self.state {
            SessionState::Viewing if self.buffer.is_dirty() && self.policy.warn_unsaved => {
                self.pending = Some(PendingAction::Close);
                self.state = SessionState::Prompting;
                CloseOutcome::PromptRequired
            }
            SessionState::Prompting => CloseOutcome::PromptRequired,
            _ => {
                self.state = SessionState::Closed;
                CloseOutcome::Closed
            }
        }
    }

    /// Answer the unsaved-changes prompt. A failed save leaves the session in
    /// `Viewing` with the edits (and dirty flag) intact; the parked action is
    /// dropped and the user decides afresh after a retry.
    pub fn resolve_prompt(&mut self, choice: PromptChoice) -> Result<PromptResolution> {
        if self.state != SessionState::Prompting {
            return Ok(PromptResolution::Retained);
        }
        let pending = self.pending.take();
        self.state = SessionState::Viewing;

        match choice {
            PromptChoice::Cancel => Ok(PromptResolution::Retained),
            PromptChoice::Save => {
                self.commit()?;
                Ok(self.finish_pending(pending))
            }
            PromptChoice::Discard => Ok(self.finish_pending(pending)),
        }
    }

    fn finish_pending(&mut self, pending: Option<PendingAction>) -> PromptResolution {
        match pending {
            Some(PendingAction::Navigate(index)) => {
                self.display(index);
                PromptResolution::Navigated
            }
            Some(PendingAction::Close) => {
                self.state = SessionState::Closed;
                PromptResolution::Closed
            }
            None => PromptResolution::Retained,
        }
    }

    /// Toggle one attribute in the buffer. Only meaningful while viewing.
    pub fn set_field(&mut self, name: &str, value: bool) -> Result<()> {
        if self.state != SessionState::Viewing {
            return Ok(());
        }
        self.buffer.set_field(name, value)
    }

    pub fn set_notes(&mut self, text: String) {
        if self.state == SessionState::Viewing {
            self.buffer.set_notes(text);
        }
    }

    pub fn set_done(&mut self, flag: bool) {
        if self.state == SessionState::Viewing {
            self.buffer.set_done(flag);
        }
    }
}
