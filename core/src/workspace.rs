use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::labels::{collect_note_label_names, merge_labels};
use crate::models::{Label, Note, View, ViewFilter};
use crate::normalize::{normalize_note, RawNote};
use crate::reorder::apply_reorder;

/// Whether local state is ahead of the last server snapshot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SyncPhase {
    /// An optimistic local change has not been reconciled yet
    Pending,
    #[default]
    Confirmed,
}

/// The authoritative in-memory client state.
///
/// Owns the note array, the server label list, and the active view and
/// filter. Mutating entry points are explicit: optimistic mutators move
/// the workspace to `Pending`, and `reconcile_*` with fresh server data
/// moves it back to `Confirmed`. Optimistic changes are a latency
/// mitigation only; the reconcile pass is the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Workspace {
    pub notes: Vec<Note>,
    /// Persisted labels, in server order
    pub db_labels: Vec<Label>,
    pub view: View,
    pub filter: ViewFilter,
    pub phase: SyncPhase,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace::default()
    }

    /// Server labels plus ephemeral names discovered on non-trashed
    /// notes, recomputed from current state on every call
    pub fn merged_labels(&self) -> Vec<Label> {
        let note_names = collect_note_label_names(&self.notes);
        merge_labels(&self.db_labels, &note_names)
    }

    /// Replace the note array with a fresh server listing. Any manual
    /// order is discarded in favor of server order.
    pub fn reconcile_notes(&mut self, raw: &[RawNote], now: DateTime<Utc>) {
        self.notes = raw.iter().map(|r| normalize_note(r, now)).collect();
        self.phase = SyncPhase::Confirmed;
    }

    pub fn reconcile_labels(&mut self, labels: Vec<Label>) {
        self.db_labels = labels;
        self.phase = SyncPhase::Confirmed;
    }

    /// Merge an edited note into the array immediately, ahead of the
    /// server round-trip
    pub fn optimistic_update(&mut self, note: &Note) {
        if let Some(existing) = self.notes.iter_mut().find(|n| n.id == note.id) {
            *existing = note.clone();
            self.phase = SyncPhase::Pending;
        }
    }

    /// Insert a brand-new note at the top or bottom of the array,
    /// according to the add-at-bottom setting
    pub fn optimistic_insert(&mut self, note: Note, at_bottom: bool) {
        if at_bottom {
            self.notes.push(note);
        } else {
            self.notes.insert(0, note);
        }
        self.phase = SyncPhase::Pending;
    }

    /// Remove a label name from the label list and from every note
    pub fn strip_label(&mut self, name: &str) {
        self.db_labels.retain(|l| l.name() != name);
        for note in &mut self.notes {
            note.labels.retain(|l| l != name);
        }
        self.phase = SyncPhase::Pending;
    }

    /// Apply a manual drag-reorder; forces custom sort on success
    pub fn reorder(&mut self, source_id: &str, dest_id: &str) -> bool {
        apply_reorder(&mut self.notes, &mut self.filter, source_id, dest_id)
    }

    pub fn select_label(&mut self, name: &str) {
        self.view = View::Label(name.to_string());
    }

    /// Drop back to the default notes view if the named label is the
    /// active view
    pub fn deselect_label_if_active(&mut self, name: &str) {
        if self.view == View::Label(name.to_string()) {
            self.view = View::Notes;
        }
    }
}
