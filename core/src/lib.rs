#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

pub mod filter;
pub mod labels;
pub mod models;
pub mod normalize;
pub mod reorder;
pub mod workspace;

// Re-export commonly used types
pub use filter::{masonry_columns, split_pinned, visible_notes};
pub use labels::{collect_note_label_names, is_object_id, merge_labels, resolve_label_id};
pub use models::{
    Attachment, Label, Note, NoteStatus, SortOrder, StatusFilter, View, ViewFilter,
};
pub use normalize::{normalize_note, RawLabel, RawNote};
pub use reorder::apply_reorder;
pub use workspace::{SyncPhase, Workspace};
