use crate::models::{Label, Note};

/// True for a 24-character hexadecimal server id
pub fn is_object_id(id: &str) -> bool {
    id.len() == 24 && id.chars().all(|c| c.is_ascii_hexdigit())
}

/// Unique label names appearing across all non-trashed notes, in
/// first-seen order
pub fn collect_note_label_names(notes: &[Note]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for note in notes.iter().filter(|n| !n.is_trashed) {
        for name in &note.labels {
            if !names.iter().any(|existing| existing == name) {
                names.push(name.clone());
            }
        }
    }
    names
}

/// Merge server labels with names discovered on notes.
///
/// Persisted labels come first in server order; note-derived names not
/// already present follow as ephemeral entries. On a name collision the
/// persisted record wins, keeping its id. Idempotent for unchanged
/// inputs.
pub fn merge_labels(persisted: &[Label], note_names: &[String]) -> Vec<Label> {
    let mut merged: Vec<Label> = persisted.to_vec();

    for name in note_names {
        if !merged.iter().any(|l| l.name() == name) {
            merged.push(Label::Ephemeral { name: name.clone() });
        }
    }

    merged
}

/// Resolve a label name to its persisted id, if the merged list has one
pub fn resolve_label_id<'a>(labels: &'a [Label], name: &str) -> Option<&'a str> {
    labels
        .iter()
        .find(|l| l.name() == name)
        .and_then(|l| l.id())
}
