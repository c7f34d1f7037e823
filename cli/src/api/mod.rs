use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use slate_core::{Note, RawNote};
use thiserror::Error;

pub mod http;

pub use http::HttpApi;

#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401; the stored token is missing, expired, or revoked
    #[error("authentication required; run `slate login`")]
    Unauthorized,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with success=false or a non-2xx status
    #[error("server rejected the request: {0}")]
    Rejected(String),
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// A persisted label record as the backend returns it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// The `bin` / `restore` / `permanent` switch on the delete endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAction {
    Bin,
    Restore,
    Permanent,
}

impl DeleteAction {
    pub fn as_query(&self) -> &'static str {
        match self {
            DeleteAction::Bin => "bin",
            DeleteAction::Restore => "restore",
            DeleteAction::Permanent => "permanent",
        }
    }
}

/// A pending file upload attached to a create or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Outgoing note body for create and update calls.
///
/// Carries upload and attachment-deletion intent alongside the fields;
/// either of those forces the multipart encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct NotePayload {
    pub title: String,
    /// Content lines; the canonical string is split on '\n' at this
    /// boundary
    pub description: Vec<String>,
    /// Wire status, "bin" when the note is trashed
    pub status: String,
    pub is_pinned: bool,
    pub is_archived: bool,
    /// Persisted label ids only; unresolved names are already dropped
    pub label_ids: Vec<String>,
    pub files: Vec<FileUpload>,
    pub deleted_attachment_filenames: Vec<String>,
}

impl NotePayload {
    pub fn from_note(note: &Note, label_ids: Vec<String>) -> Self {
        NotePayload {
            title: if note.title.is_empty() {
                "Untitled".to_string()
            } else {
                note.title.clone()
            },
            description: if note.content.is_empty() {
                vec![]
            } else {
                note.content.split('\n').map(str::to_string).collect()
            },
            status: if note.is_trashed {
                "bin".to_string()
            } else {
                note.status.as_wire().to_string()
            },
            is_pinned: note.is_pinned,
            is_archived: note.is_archived,
            label_ids,
            files: vec![],
            deleted_attachment_filenames: vec![],
        }
    }

    pub fn wants_multipart(&self) -> bool {
        !self.files.is_empty() || !self.deleted_attachment_filenames.is_empty()
    }
}

/// Single-field partial update used by archive and pin
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct NotePatch {
    #[serde(rename = "isPinned", skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
    #[serde(rename = "isArchived", skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AdminStats {
    #[serde(rename = "totalUsers", default)]
    pub total_users: u64,
    #[serde(rename = "totalTodos", default)]
    pub total_todos: u64,
    #[serde(rename = "completedTodos", default)]
    pub completed_todos: u64,
    #[serde(rename = "pendingTodos", default)]
    pub pending_todos: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminUser {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
}

/// The backend contract the client consumes. One implementation talks
/// HTTP; tests substitute an in-memory one.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginData, ApiError>;
    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<(), ApiError>;

    async fn list_notes(&self) -> Result<Vec<RawNote>, ApiError>;
    async fn create_note(&self, payload: NotePayload) -> Result<(), ApiError>;
    async fn update_note(&self, id: &str, payload: NotePayload) -> Result<(), ApiError>;
    async fn patch_note(&self, id: &str, patch: NotePatch) -> Result<(), ApiError>;
    async fn delete_note(&self, id: &str, action: DeleteAction) -> Result<(), ApiError>;

    async fn list_labels(&self) -> Result<Vec<LabelRecord>, ApiError>;
    async fn create_label(&self, name: &str) -> Result<LabelRecord, ApiError>;
    async fn update_label(&self, id: &str, name: &str) -> Result<(), ApiError>;
    async fn delete_label(&self, id: &str) -> Result<(), ApiError>;

    async fn me(&self) -> Result<UserProfile, ApiError>;
    async fn update_user(&self, name: &str) -> Result<(), ApiError>;

    async fn admin_stats(&self) -> Result<AdminStats, ApiError>;
    async fn admin_users(&self) -> Result<Vec<AdminUser>, ApiError>;
    async fn admin_todos(&self) -> Result<Vec<RawNote>, ApiError>;
    async fn admin_toggle_user_status(&self, id: &str) -> Result<(), ApiError>;
    async fn admin_toggle_user_role(&self, id: &str) -> Result<(), ApiError>;
    async fn admin_delete_user(&self, id: &str) -> Result<(), ApiError>;
    async fn admin_delete_todo(&self, id: &str) -> Result<(), ApiError>;
}
