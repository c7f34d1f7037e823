use crate::models::{Note, SortOrder, ViewFilter};

/// Apply a completed drag-reorder to the authoritative note array.
///
/// Removes the dragged note and reinserts it at the destination note's
/// index, then forces `SortOrder::Custom` so automatic date sorting
/// stays suspended. No-op when source and destination are the same or
/// either id is unknown. Local-only; the server never learns about the
/// new order and a refetch reverts it.
pub fn apply_reorder(
    notes: &mut Vec<Note>,
    filter: &mut ViewFilter,
    source_id: &str,
    dest_id: &str,
) -> bool {
    if source_id == dest_id {
        return false;
    }

    let Some(old_index) = notes.iter().position(|n| n.id == source_id) else {
        return false;
    };
    let Some(new_index) = notes.iter().position(|n| n.id == dest_id) else {
        return false;
    };

    let moved = notes.remove(old_index);
    notes.insert(new_index, moved);
    filter.sort_order = SortOrder::Custom;
    true
}
