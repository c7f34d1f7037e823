use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Attachment, Note, NoteStatus};

/// A note record as the backend returns it from `GET /todo/list`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawNote {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Content lines; joined with '\n' on the client
    #[serde(default)]
    pub description: Option<Vec<String>>,
    #[serde(rename = "isPinned", default)]
    pub is_pinned: Option<bool>,
    #[serde(rename = "isArchived", default)]
    pub is_archived: Option<bool>,
    /// "open" | "in-progress" | "completed" | "bin"
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub labels: Option<Vec<RawLabel>>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attachments: Option<Vec<Attachment>>,
}

/// Labels arrive either as populated records or as bare name strings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLabel {
    Record {
        #[serde(rename = "_id", default)]
        id: Option<String>,
        #[serde(default)]
        name: String,
    },
    Name(String),
}

impl RawLabel {
    pub fn name(&self) -> &str {
        match self {
            RawLabel::Record { name, .. } => name,
            RawLabel::Name(name) => name,
        }
    }
}

/// Map a raw server record into the canonical note shape.
///
/// Total by contract: missing or malformed fields degrade to safe
/// defaults instead of failing.
pub fn normalize_note(raw: &RawNote, now: DateTime<Utc>) -> Note {
    let status_str = raw.status.as_deref().unwrap_or("open");

    let mut labels: Vec<String> = Vec::new();
    if let Some(raw_labels) = &raw.labels {
        for label in raw_labels {
            let name = label.name();
            if !name.is_empty() && !labels.iter().any(|l| l == name) {
                labels.push(name.to_string());
            }
        }
    }

    Note {
        id: raw.id.clone(),
        title: raw.title.clone(),
        content: raw
            .description
            .as_ref()
            .map(|lines| lines.join("\n"))
            .unwrap_or_default(),
        is_pinned: raw.is_pinned.unwrap_or(false),
        is_archived: raw.is_archived.unwrap_or(false),
        is_trashed: status_str == "bin",
        status: NoteStatus::from_wire(status_str),
        labels,
        created_at: raw.created_at.unwrap_or(now),
        attachments: raw.attachments.clone().unwrap_or_default(),
    }
}
