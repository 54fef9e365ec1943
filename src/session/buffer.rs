//! Staging area for edits to exactly one record. The buffer never touches the
//! store; the controller decides when its contents become a patch.

use std::collections::HashMap;

use crate::errors::{ReviewError, Result};
use crate::models::{Patch, Record};

/// Whether mutations are coming from programmatic population or from the
/// user. Seeding exists as a first-class state so that anything replaying
/// values into the buffer while a record loads cannot flip the dirty flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BufferMode {
    Seeding,
    Editing,
}

/// Mutable copies of one record's editable values plus a dirty flag. Owned
/// exclusively by the session controller; one instance per session.
#[derive(Debug)]
pub struct EditBuffer {
    record_id: Option<String>,
    fields: HashMap<String, bool>,
    notes: String,
    done: bool,
    dirty: bool,
    mode: BufferMode,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self {
            record_id: None,
            fields: HashMap::new(),
            notes: String::new(),
            done: false,
            dirty: false,
            mode: BufferMode::Editing,
        }
    }
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy a record's editable values into the buffer and reset the dirty
    /// flag. Population happens in `Seeding` mode, so the setters below stay
    /// safe to call from load paths without marking anything dirty.
    pub fn seed(&mut self, record: &Record) {
        self.mode = BufferMode::Seeding;
        self.record_id = Some(record.id.clone());
        self.fields = record.fields.clone();
        self.set_notes(record.notes.clone());
        self.set_done(record.done);
        self.dirty = false;
        self.mode = BufferMode::Editing;
    }

    /// Id of the record currently staged, if any.
    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    /// Toggleable attribute value; total over names so rendering code does
    /// not have to special-case a missing key.
    pub fn field(&self, name: &str) -> bool {
        self.fields.get(name).copied().unwrap_or(false)
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Set one attribute flag. The attribute set is fixed at seed time, so a
    /// name outside it is a caller bug and reported as `UnknownField` rather
    /// than silently inserting a column the table does not have.
    pub fn set_field(&mut self, name: &str, value: bool) -> Result<()> {
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value;
                self.mark_mutated();
                Ok(())
            }
            None => Err(ReviewError::UnknownField(name.to_string())),
        }
    }

    pub fn set_notes(&mut self, text: String) {
        self.notes = text;
        self.mark_mutated();
    }

    pub fn set_done(&mut self, flag: bool) {
        self.done = flag;
        self.mark_mutated();
    }

    /// Snapshot the current values into an immutable patch for the store.
    pub fn to_patch(&self) -> Patch {
        Patch {
            fields: self.fields.clone(),
            notes: self.notes.clone(),
            done: self.done,
        }
    }

    /// Called by the controller once a commit has fully persisted.
    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_mutated(&mut self) {
        if self.mode == BufferMode::Editing {
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        let mut fields = HashMap::new();
        fields.insert("Reviewed".to_string(), true);
        fields.insert("Escalated".to_string(), false);
        Record {
            id: "101".to_string(),
            fields,
            notes: "initial".to_string(),
            done: false,
        }
    }

    #[test]
    fn seeding_never_marks_dirty() {
        let mut buffer = EditBuffer::new();
        buffer.seed(&sample_record());
        assert!(!buffer.is_dirty());
        assert_eq!(buffer.record_id(), Some("101"));
        assert!(buffer.field("Reviewed"));
        assert_eq!(buffer.notes(), "initial");
    }

    #[test]
    fn first_mutation_after_seed_marks_dirty() {
        let mut buffer = EditBuffer::new();
        buffer.seed(&sample_record());

        buffer.set_done(true);
        assert!(buffer.is_dirty());

        // Stays dirty across further edits.
        buffer.set_notes("more".to_string());
        buffer.set_field("Escalated", true).unwrap();
        assert!(buffer.is_dirty());
    }

    #[test]
    fn reseeding_clears_dirty() {
        let mut buffer = EditBuffer::new();
        buffer.seed(&sample_record());
        buffer.set_notes("edited".to_string());
        assert!(buffer.is_dirty());

        buffer.seed(&sample_record());
        assert!(!buffer.is_dirty());
        assert_eq!(buffer.notes(), "initial");
    }

    #[test]
    fn unknown_field_is_rejected_and_stays_clean() {
        let mut buffer = EditBuffer::new();
        buffer.seed(&sample_record());
        assert!(matches!(
            buffer.set_field("Imaginary", true),
            Err(ReviewError::UnknownField(_))
        ));
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn patch_snapshots_current_values() {
        let mut buffer = EditBuffer::new();
        buffer.seed(&sample_record());
        buffer.set_field("Escalated", true).unwrap();
        buffer.set_done(true);

        let patch = buffer.to_patch();
        assert!(patch.fields["Escalated"]);
        assert!(patch.done);

        // Later edits must not leak into the snapshot.
        buffer.set_notes("changed afterwards".to_string());
        assert_eq!(patch.notes, "initial");
    }
}
