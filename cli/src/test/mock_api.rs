use std::sync::Mutex;

use async_trait::async_trait;
use slate_core::{Attachment, RawLabel, RawNote};

use crate::api::{
    AdminStats, AdminUser, ApiClient, ApiError, DeleteAction, LabelRecord, LoginData, NotePatch,
    NotePayload, UserProfile,
};

/// A server-side note record as the mock backend stores it
#[derive(Debug, Clone, Default)]
pub struct StoredNote {
    pub id: String,
    pub title: String,
    pub description: Vec<String>,
    pub status: String,
    pub is_pinned: bool,
    pub is_archived: bool,
    /// References into the label collection
    pub label_ids: Vec<String>,
    /// Bare name strings, as legacy data carries them
    pub legacy_labels: Vec<String>,
    pub attachments: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub notes: Vec<StoredNote>,
    pub labels: Vec<LabelRecord>,
    next_id: u32,
    /// Operation names that arrived with upload or deletion intent
    pub multipart_calls: Vec<&'static str>,
    /// Operation names that arrived as plain JSON
    pub json_calls: Vec<&'static str>,
}

impl MockState {
    fn mint_id(&mut self) -> String {
        self.next_id += 1;
        format!("{:024x}", 0xa000 + self.next_id)
    }
}

/// In-memory stand-in for the HTTP gateway
pub struct MockApi {
    pub state: Mutex<MockState>,
}

impl MockApi {
    pub fn new() -> Self {
        MockApi {
            state: Mutex::new(MockState::default()),
        }
    }

    pub fn seed_label(&self, name: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.mint_id();
        state.labels.push(LabelRecord {
            id: id.clone(),
            name: name.to_string(),
        });
        id
    }

    pub fn seed_note(&self, note: StoredNote) -> String {
        let mut state = self.state.lock().unwrap();
        let mut note = note;
        if note.id.is_empty() {
            note.id = state.mint_id();
        }
        if note.status.is_empty() {
            note.status = "open".to_string();
        }
        let id = note.id.clone();
        state.notes.push(note);
        id
    }

    fn to_raw(state: &MockState, note: &StoredNote) -> RawNote {
        let mut labels: Vec<RawLabel> = note
            .label_ids
            .iter()
            .filter_map(|id| state.labels.iter().find(|l| &l.id == id))
            .map(|record| RawLabel::Record {
                id: Some(record.id.clone()),
                name: record.name.clone(),
            })
            .collect();
        labels.extend(note.legacy_labels.iter().cloned().map(RawLabel::Name));

        RawNote {
            id: note.id.clone(),
            title: note.title.clone(),
            description: Some(note.description.clone()),
            is_pinned: Some(note.is_pinned),
            is_archived: Some(note.is_archived),
            status: Some(note.status.clone()),
            labels: Some(labels),
            created_at: None,
            attachments: Some(
                note.attachments
                    .iter()
                    .map(|filename| Attachment {
                        filename: filename.clone(),
                        url: None,
                    })
                    .collect(),
            ),
        }
    }

    fn record_encoding(state: &mut MockState, operation: &'static str, payload: &NotePayload) {
        if payload.wants_multipart() {
            state.multipart_calls.push(operation);
        } else {
            state.json_calls.push(operation);
        }
    }
}

#[async_trait]
impl ApiClient for MockApi {
    async fn login(&self, email: &str, _password: &str) -> Result<LoginData, ApiError> {
        Ok(LoginData {
            token: format!("tok-{}", uuid::Uuid::new_v4()),
            name: "Mock User".to_string(),
            email: email.to_string(),
            id: "665a1b2c3d4e5f6a7b8c9d00".to_string(),
            role: Some("user".to_string()),
        })
    }

    async fn signup(&self, _name: &str, _email: &str, _password: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn list_notes(&self) -> Result<Vec<RawNote>, ApiError> {
        let state = self.state.lock().unwrap();
        Ok(state.notes.iter().map(|n| Self::to_raw(&state, n)).collect())
    }

    async fn create_note(&self, payload: NotePayload) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::record_encoding(&mut state, "create", &payload);
        let id = state.mint_id();
        state.notes.push(StoredNote {
            id,
            title: payload.title,
            description: payload.description,
            status: payload.status,
            is_pinned: payload.is_pinned,
            is_archived: payload.is_archived,
            label_ids: payload.label_ids,
            legacy_labels: vec![],
            attachments: payload.files.into_iter().map(|f| f.filename).collect(),
        });
        Ok(())
    }

    async fn update_note(&self, id: &str, payload: NotePayload) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::record_encoding(&mut state, "update", &payload);
        let Some(index) = state.notes.iter().position(|n| n.id == id) else {
            return Err(ApiError::Rejected(format!("note {} not found", id)));
        };
        let note = &mut state.notes[index];
        note.title = payload.title;
        note.description = payload.description;
        note.status = payload.status;
        note.is_pinned = payload.is_pinned;
        note.is_archived = payload.is_archived;
        note.label_ids = payload.label_ids;
        note.legacy_labels.clear();
        note.attachments
            .retain(|name| !payload.deleted_attachment_filenames.contains(name));
        note.attachments
            .extend(payload.files.into_iter().map(|f| f.filename));
        Ok(())
    }

    async fn patch_note(&self, id: &str, patch: NotePatch) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        let Some(note) = state.notes.iter_mut().find(|n| n.id == id) else {
            return Err(ApiError::Rejected(format!("note {} not found", id)));
        };
        if let Some(pinned) = patch.is_pinned {
            note.is_pinned = pinned;
        }
        if let Some(archived) = patch.is_archived {
            note.is_archived = archived;
        }
        Ok(())
    }

    async fn delete_note(&self, id: &str, action: DeleteAction) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        match action {
            DeleteAction::Permanent => {
                state.notes.retain(|n| n.id != id);
            }
            _ => {
                let Some(note) = state.notes.iter_mut().find(|n| n.id == id) else {
                    return Err(ApiError::Rejected(format!("note {} not found", id)));
                };
                note.status = match action {
                    DeleteAction::Bin => "bin".to_string(),
                    _ => "open".to_string(),
                };
            }
        }
        Ok(())
    }

    async fn list_labels(&self) -> Result<Vec<LabelRecord>, ApiError> {
        Ok(self.state.lock().unwrap().labels.clone())
    }

    async fn create_label(&self, name: &str) -> Result<LabelRecord, ApiError> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.labels.iter().find(|l| l.name == name) {
            return Ok(existing.clone());
        }
        let record = LabelRecord {
            id: state.mint_id(),
            name: name.to_string(),
        };
        state.labels.push(record.clone());
        Ok(record)
    }

    async fn update_label(&self, id: &str, name: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        let Some(label) = state.labels.iter_mut().find(|l| l.id == id) else {
            return Err(ApiError::Rejected(format!("label {} not found", id)));
        };
        label.name = name.to_string();
        Ok(())
    }

    async fn delete_label(&self, id: &str) -> Result<(), ApiError> {
        self.state.lock().unwrap().labels.retain(|l| l.id != id);
        Ok(())
    }

    async fn me(&self) -> Result<UserProfile, ApiError> {
        Ok(UserProfile {
            name: "Mock User".to_string(),
            email: "mock@example.com".to_string(),
            id: "665a1b2c3d4e5f6a7b8c9d00".to_string(),
            role: Some("user".to_string()),
        })
    }

    async fn update_user(&self, _name: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        let state = self.state.lock().unwrap();
        let completed = state
            .notes
            .iter()
            .filter(|n| n.status == "completed")
            .count() as u64;
        let total = state.notes.len() as u64;
        Ok(AdminStats {
            total_users: 1,
            total_todos: total,
            completed_todos: completed,
            pending_todos: total - completed,
        })
    }

    async fn admin_users(&self) -> Result<Vec<AdminUser>, ApiError> {
        Ok(vec![])
    }

    async fn admin_todos(&self) -> Result<Vec<RawNote>, ApiError> {
        self.list_notes().await
    }

    async fn admin_toggle_user_status(&self, _id: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn admin_toggle_user_role(&self, _id: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn admin_delete_user(&self, _id: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn admin_delete_todo(&self, id: &str) -> Result<(), ApiError> {
        self.state.lock().unwrap().notes.retain(|n| n.id != id);
        Ok(())
    }
}
