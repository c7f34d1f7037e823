use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A note as the client reasons about it, after normalization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    /// Server-issued ObjectId string once persisted; a millisecond
    /// timestamp string before the first save
    pub id: String,
    pub title: String,
    /// Lines joined with '\n'; the wire carries them as an array
    pub content: String,
    pub is_pinned: bool,
    pub is_archived: bool,
    /// Derived from the server status value "bin"
    pub is_trashed: bool,
    pub status: NoteStatus,
    /// Label names, deduplicated, in first-seen order
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Note {
    /// A blank unsaved note with a client-generated temp id
    pub fn draft(now: DateTime<Utc>) -> Self {
        Note {
            id: now.timestamp_millis().to_string(),
            title: String::new(),
            content: String::new(),
            is_pinned: false,
            is_archived: false,
            is_trashed: false,
            status: NoteStatus::Open,
            labels: vec![],
            created_at: now,
            attachments: vec![],
        }
    }
}

/// Attachment metadata as stored server-side
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Attachment {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum NoteStatus {
    #[default]
    Open,
    InProgress,
    Completed,
}

impl NoteStatus {
    /// Server string for this status. Trashed notes override this with
    /// "bin" at the wire boundary.
    pub fn as_wire(&self) -> &'static str {
        match self {
            NoteStatus::Open => "open",
            NoteStatus::InProgress => "in-progress",
            NoteStatus::Completed => "completed",
        }
    }

    /// Unrecognized values degrade to Open
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "in-progress" => NoteStatus::InProgress,
            "completed" => NoteStatus::Completed,
            _ => NoteStatus::Open,
        }
    }
}

/// A label is either a persisted server record or a name discovered on
/// a note with no matching record yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Label {
    Persisted { id: String, name: String },
    Ephemeral { name: String },
}

impl Label {
    pub fn name(&self) -> &str {
        match self {
            Label::Persisted { name, .. } => name,
            Label::Ephemeral { name } => name,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Label::Persisted { id, .. } => Some(id),
            Label::Ephemeral { .. } => None,
        }
    }
}

/// Which slice of the note set a command is looking at
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Notes,
    Archive,
    Trash,
    /// Non-trashed notes carrying the named label
    Label(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
    /// Set by a manual reorder; the engine leaves the array untouched
    Custom,
}

/// Transient per-view filter state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ViewFilter {
    pub search_query: String,
    pub status: StatusFilter,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub sort_order: SortOrder,
}
