use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Note, NoteStatus, SortOrder, StatusFilter, View, ViewFilter};

/// Derive the visible, filtered, sorted subset of notes for a view.
///
/// Stages run in order: view partition, status filter, inclusive
/// calendar-day date range, free-text search, then sort. With
/// `SortOrder::Custom` the input order is preserved untouched.
pub fn visible_notes<'a>(notes: &'a [Note], view: &View, filter: &ViewFilter) -> Vec<&'a Note> {
    let mut visible: Vec<&Note> = notes
        .iter()
        .filter(|n| in_view(n, view))
        .filter(|n| matches_status(n, filter.status))
        .filter(|n| matches_date(n, filter.date_start, filter.date_end))
        .filter(|n| matches_search(n, &filter.search_query))
        .collect();

    match filter.sort_order {
        SortOrder::Asc => visible.sort_by_key(|n| n.created_at),
        SortOrder::Desc => visible.sort_by_key(|n| std::cmp::Reverse(n.created_at)),
        SortOrder::Custom => {}
    }

    visible
}

/// Trashed notes only ever show in the trash view, regardless of their
/// archive flag
fn in_view(note: &Note, view: &View) -> bool {
    match view {
        View::Notes => !note.is_archived && !note.is_trashed,
        View::Archive => note.is_archived && !note.is_trashed,
        View::Trash => note.is_trashed,
        View::Label(name) => !note.is_trashed && note.labels.iter().any(|l| l == name),
    }
}

fn matches_status(note: &Note, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::InProgress => note.status == NoteStatus::InProgress,
        StatusFilter::Completed => note.status == NoteStatus::Completed,
    }
}

/// Inclusive on calendar-day boundaries; a missing end date means the
/// start day alone
fn matches_date(note: &Note, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    let Some(start) = start else {
        return true;
    };
    match day_bounds(start, end.unwrap_or(start)) {
        Some((lo, hi)) => note.created_at >= lo && note.created_at <= hi,
        None => true,
    }
}

fn day_bounds(start: NaiveDate, end: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let lo = start.and_hms_milli_opt(0, 0, 0, 0)?.and_utc();
    let hi = end.and_hms_milli_opt(23, 59, 59, 999)?.and_utc();
    Some((lo, hi))
}

fn matches_search(note: &Note, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    note.title.to_lowercase().contains(&query) || note.content.to_lowercase().contains(&query)
}

/// Partition into (pinned, others), preserving relative order
pub fn split_pinned<'a>(notes: &[&'a Note]) -> (Vec<&'a Note>, Vec<&'a Note>) {
    notes.iter().partition(|n| n.is_pinned)
}

/// Round-robin distribution into `columns` display columns
pub fn masonry_columns<'a>(notes: &[&'a Note], columns: usize) -> Vec<Vec<&'a Note>> {
    let columns = columns.max(1);
    let mut out: Vec<Vec<&Note>> = vec![Vec::new(); columns];
    for (index, note) in notes.iter().enumerate() {
        out[index % columns].push(note);
    }
    out
}
