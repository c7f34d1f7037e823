use chrono::Utc;
use futures::future::join_all;
use slate_core::{resolve_label_id, Label, Note, Workspace};
use tracing::{debug, error};

use crate::api::{ApiClient, ApiError, DeleteAction, FileUpload, NotePatch, NotePayload};

/// Orchestrates note and label mutations against the backend.
///
/// Every mutation applies an optimistic local change first, sends the
/// request, and then pulls fresh server state to reconcile. Mutation
/// failures are logged and swallowed; the next successful reconcile is
/// the recovery mechanism. Fetch failures on the explicit `pull_*`
/// entry points do propagate, so commands can tell the user to log in
/// again on a 401.
pub struct Coordinator<'a> {
    api: &'a dyn ApiClient,
    pub workspace: &'a mut Workspace,
    add_new_at_bottom: bool,
}

impl<'a> Coordinator<'a> {
    pub fn new(
        api: &'a dyn ApiClient,
        workspace: &'a mut Workspace,
        add_new_at_bottom: bool,
    ) -> Self {
        Coordinator {
            api,
            workspace,
            add_new_at_bottom,
        }
    }

    pub async fn pull_notes(&mut self) -> Result<(), ApiError> {
        let raw = self.api.list_notes().await?;
        self.workspace.reconcile_notes(&raw, Utc::now());
        debug!(count = self.workspace.notes.len(), "reconciled notes");
        Ok(())
    }

    pub async fn pull_labels(&mut self) -> Result<(), ApiError> {
        let records = self.api.list_labels().await?;
        let labels = records
            .into_iter()
            .map(|r| Label::Persisted {
                id: r.id,
                name: r.name,
            })
            .collect();
        self.workspace.reconcile_labels(labels);
        Ok(())
    }

    pub async fn pull_all(&mut self) -> Result<(), ApiError> {
        self.pull_notes().await?;
        self.pull_labels().await?;
        Ok(())
    }

    async fn reconcile_notes_quietly(&mut self) {
        if let Err(err) = self.pull_notes().await {
            error!(error = %err, "failed to refetch notes");
        }
    }

    async fn reconcile_labels_quietly(&mut self) {
        if let Err(err) = self.pull_labels().await {
            error!(error = %err, "failed to refetch labels");
        }
    }

    /// Resolve label names to persisted ids, minting labels for names
    /// the merged list does not know. All resolutions run before the
    /// caller sends its mutation, so a single update is atomic with
    /// respect to its own label set. Unresolvable names are dropped.
    async fn resolve_label_ids(&mut self, names: &[String]) -> Vec<String> {
        let merged = self.workspace.merged_labels();
        let api = self.api;

        let resolutions = join_all(names.iter().map(|name| {
            let merged = &merged;
            async move {
                if let Some(id) = resolve_label_id(merged, name) {
                    return (Some(id.to_string()), None);
                }
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return (None, None);
                }
                match api.create_label(trimmed).await {
                    Ok(record) => (Some(record.id.clone()), Some(record)),
                    Err(err) => {
                        error!(label = %name, error = %err, "failed to create label");
                        (None, None)
                    }
                }
            }
        }))
        .await;

        let mut ids = Vec::new();
        let mut minted_any = false;
        for (id, minted) in resolutions {
            if let Some(id) = id {
                ids.push(id);
            }
            if let Some(record) = minted {
                self.workspace.db_labels.push(Label::Persisted {
                    id: record.id,
                    name: record.name,
                });
                minted_any = true;
            }
        }

        if minted_any {
            self.reconcile_labels_quietly().await;
        }

        ids
    }

    pub async fn create(&mut self, note: Note, files: Vec<FileUpload>, deleted: Vec<String>) {
        self.workspace
            .optimistic_insert(note.clone(), self.add_new_at_bottom);

        let label_ids = self.resolve_label_ids(&note.labels).await;
        let mut payload = NotePayload::from_note(&note, label_ids);
        payload.files = files;
        payload.deleted_attachment_filenames = deleted;

        if let Err(err) = self.api.create_note(payload).await {
            error!(error = %err, "failed to create note");
        }

        self.reconcile_notes_quietly().await;
    }

    pub async fn update(
        &mut self,
        note: Note,
        skip_refetch: bool,
        files: Vec<FileUpload>,
        deleted: Vec<String>,
    ) {
        self.workspace.optimistic_update(&note);

        let label_ids = self.resolve_label_ids(&note.labels).await;
        let mut payload = NotePayload::from_note(&note, label_ids);
        payload.files = files;
        payload.deleted_attachment_filenames = deleted;

        if let Err(err) = self.api.update_note(&note.id, payload).await {
            error!(note = %note.id, error = %err, "failed to update note");
        }

        if !skip_refetch {
            self.reconcile_notes_quietly().await;
        }
    }

    pub async fn delete(&mut self, id: &str, action: DeleteAction) {
        if let Err(err) = self.api.delete_note(id, action).await {
            error!(note = %id, error = %err, "failed to delete note");
        }
        self.reconcile_notes_quietly().await;
    }

    pub async fn archive(&mut self, id: &str, flag: bool) {
        let patch = NotePatch {
            is_archived: Some(flag),
            ..Default::default()
        };
        if let Err(err) = self.api.patch_note(id, patch).await {
            error!(note = %id, error = %err, "failed to archive note");
        }
        self.reconcile_notes_quietly().await;
    }

    pub async fn pin(&mut self, id: &str, flag: bool) {
        let patch = NotePatch {
            is_pinned: Some(flag),
            ..Default::default()
        };
        if let Err(err) = self.api.patch_note(id, patch).await {
            error!(note = %id, error = %err, "failed to pin note");
        }
        self.reconcile_notes_quietly().await;
    }

    /// Mint a persisted label. Empty names short-circuit before any
    /// request.
    pub async fn create_label(&mut self, name: &str) -> Option<Label> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        match self.api.create_label(name).await {
            Ok(record) => {
                self.reconcile_labels_quietly().await;
                Some(Label::Persisted {
                    id: record.id,
                    name: record.name,
                })
            }
            Err(err) => {
                error!(label = %name, error = %err, "failed to create label");
                None
            }
        }
    }

    /// Rename a label. Persisted labels rename in one request;
    /// ephemeral labels have no server record, so every note carrying
    /// the old name is rewritten instead, one update per note.
    pub async fn rename_label(&mut self, label: &Label, new_name: &str) {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return;
        }

        match label {
            Label::Persisted { id, .. } => {
                if let Err(err) = self.api.update_label(id, new_name).await {
                    error!(label = %id, error = %err, "failed to rename label");
                }
            }
            Label::Ephemeral { name } => {
                let affected: Vec<Note> = self
                    .workspace
                    .notes
                    .iter()
                    .filter(|n| n.labels.iter().any(|l| l == name))
                    .cloned()
                    .collect();

                for mut note in affected {
                    for l in &mut note.labels {
                        if l == name {
                            *l = new_name.to_string();
                        }
                    }
                    self.update(note, false, vec![], vec![]).await;
                }
            }
        }

        self.reconcile_labels_quietly().await;
        self.reconcile_notes_quietly().await;
    }

    /// Delete a label everywhere: strip it locally, remove the server
    /// record if one exists, rewrite every non-trashed note that still
    /// references the name in parallel, then reconcile. Drops back to
    /// the default notes view if the deleted label was selected.
    pub async fn delete_label(&mut self, label: &Label) {
        let name = label.name().to_string();

        let affected: Vec<Note> = self
            .workspace
            .notes
            .iter()
            .filter(|n| !n.is_trashed && n.labels.iter().any(|l| l == &name))
            .cloned()
            .collect();

        self.workspace.strip_label(&name);

        if let Some(id) = label.id() {
            if let Err(err) = self.api.delete_label(id).await {
                error!(label = %id, error = %err, "failed to delete label");
            }
        }

        // Resolve each stripped note's remaining labels before the
        // parallel fan-out; minting happens here, not mid-flight
        let mut pending = Vec::new();
        for note in &affected {
            let mut stripped = note.clone();
            stripped.labels.retain(|l| l != &name);
            let label_ids = self.resolve_label_ids(&stripped.labels).await;
            let payload = NotePayload::from_note(&stripped, label_ids);
            pending.push((stripped.id.clone(), payload));
        }

        let api = self.api;
        join_all(pending.into_iter().map(|(id, payload)| async move {
            if let Err(err) = api.update_note(&id, payload).await {
                error!(note = %id, error = %err, "failed to strip label from note");
            }
        }))
        .await;

        self.reconcile_labels_quietly().await;
        self.reconcile_notes_quietly().await;

        self.workspace.deselect_label_if_active(&name);
    }
}
