use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use slate_core::RawNote;

use super::{
    AdminStats, AdminUser, ApiClient, ApiError, DeleteAction, LabelRecord, LoginData, NotePatch,
    NotePayload, UserProfile,
};

/// Uniform response wrapper used by every backend endpoint
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// reqwest-backed gateway to the Slate backend
pub struct HttpApi {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        HttpApi {
            base_url: base_url.into(),
            token,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Unwrap an envelope, requiring the data field
    async fn expect_data<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope.message.unwrap_or_else(|| status.to_string()),
            ));
        }

        envelope
            .data
            .ok_or_else(|| ApiError::Decode("missing data field".to_string()))
    }

    /// Unwrap an envelope where the caller only cares about success
    async fn expect_ok(response: Response) -> Result<(), ApiError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        let envelope: Envelope<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope.message.unwrap_or_else(|| status.to_string()),
            ));
        }

        Ok(())
    }

    fn json_body(payload: &NotePayload) -> serde_json::Value {
        json!({
            "title": payload.title,
            "description": payload.description,
            "status": payload.status,
            "isPinned": payload.is_pinned,
            "isArchived": payload.is_archived,
            "labels": payload.label_ids,
            "deletedAttachmentFilenames": payload.deleted_attachment_filenames,
        })
    }

    /// Repeated-key form fields mirror how the backend reassembles
    /// arrays out of multipart bodies
    fn multipart_body(payload: &NotePayload) -> Form {
        let mut form = Form::new()
            .text("title", payload.title.clone())
            .text("status", payload.status.clone())
            .text("isPinned", payload.is_pinned.to_string())
            .text("isArchived", payload.is_archived.to_string());

        if payload.description.is_empty() {
            form = form.text("description", String::new());
        } else {
            for line in &payload.description {
                form = form.text("description", line.clone());
            }
        }

        for id in &payload.label_ids {
            form = form.text("labels", id.clone());
        }

        for filename in &payload.deleted_attachment_filenames {
            form = form.text("deletedAttachmentFilenames", filename.clone());
        }

        for file in &payload.files {
            form = form.part(
                "files",
                Part::bytes(file.bytes.clone()).file_name(file.filename.clone()),
            );
        }

        form
    }

    async fn send_note(
        &self,
        builder: RequestBuilder,
        payload: NotePayload,
    ) -> Result<(), ApiError> {
        let builder = self.authed(builder);
        let response = if payload.wants_multipart() {
            builder
                .multipart(Self::multipart_body(&payload))
                .send()
                .await?
        } else {
            builder.json(&Self::json_body(&payload)).send().await?
        };
        Self::expect_ok(response).await
    }
}

#[async_trait]
impl ApiClient for HttpApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginData, ApiError> {
        let response = self
            .client
            .post(self.url("/user/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::expect_data(response).await
    }

    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("/user/onboard"))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn list_notes(&self) -> Result<Vec<RawNote>, ApiError> {
        let response = self
            .authed(self.client.get(self.url("/todo/list")))
            .send()
            .await?;
        Self::expect_data(response).await
    }

    async fn create_note(&self, payload: NotePayload) -> Result<(), ApiError> {
        self.send_note(self.client.post(self.url("/todo/create")), payload)
            .await
    }

    async fn update_note(&self, id: &str, payload: NotePayload) -> Result<(), ApiError> {
        self.send_note(
            self.client.put(self.url(&format!("/todo/update/{}", id))),
            payload,
        )
        .await
    }

    async fn patch_note(&self, id: &str, patch: NotePatch) -> Result<(), ApiError> {
        let response = self
            .authed(self.client.put(self.url(&format!("/todo/update/{}", id))))
            .json(&patch)
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn delete_note(&self, id: &str, action: DeleteAction) -> Result<(), ApiError> {
        let response = self
            .authed(self.client.delete(self.url(&format!(
                "/todo/delete/{}?action={}",
                id,
                action.as_query()
            ))))
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn list_labels(&self) -> Result<Vec<LabelRecord>, ApiError> {
        let response = self
            .authed(self.client.get(self.url("/label/list")))
            .send()
            .await?;
        Self::expect_data(response).await
    }

    async fn create_label(&self, name: &str) -> Result<LabelRecord, ApiError> {
        let response = self
            .authed(self.client.post(self.url("/label/create")))
            .json(&json!({ "name": name }))
            .send()
            .await?;
        Self::expect_data(response).await
    }

    async fn update_label(&self, id: &str, name: &str) -> Result<(), ApiError> {
        let response = self
            .authed(self.client.put(self.url(&format!("/label/update/{}", id))))
            .json(&json!({ "name": name }))
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn delete_label(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .authed(self.client.delete(self.url(&format!("/label/delete/{}", id))))
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn me(&self) -> Result<UserProfile, ApiError> {
        let response = self
            .authed(self.client.get(self.url("/user/me")))
            .send()
            .await?;
        Self::expect_data(response).await
    }

    async fn update_user(&self, name: &str) -> Result<(), ApiError> {
        let response = self
            .authed(self.client.put(self.url("/user/update")))
            .json(&json!({ "name": name }))
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        let response = self
            .authed(self.client.get(self.url("/admin/stats")))
            .send()
            .await?;
        Self::expect_data(response).await
    }

    async fn admin_users(&self) -> Result<Vec<AdminUser>, ApiError> {
        let response = self
            .authed(self.client.get(self.url("/admin/users")))
            .send()
            .await?;
        Self::expect_data(response).await
    }

    async fn admin_todos(&self) -> Result<Vec<RawNote>, ApiError> {
        let response = self
            .authed(self.client.get(self.url("/admin/todos")))
            .send()
            .await?;
        Self::expect_data(response).await
    }

    async fn admin_toggle_user_status(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .authed(
                self.client
                    .patch(self.url(&format!("/admin/users/{}/status", id))),
            )
            .json(&json!({}))
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn admin_toggle_user_role(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .authed(
                self.client
                    .patch(self.url(&format!("/admin/users/{}/role", id))),
            )
            .json(&json!({}))
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn admin_delete_user(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .authed(self.client.delete(self.url(&format!("/admin/users/{}", id))))
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn admin_delete_todo(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .authed(self.client.delete(self.url(&format!("/admin/todos/{}", id))))
            .send()
            .await?;
        Self::expect_ok(response).await
    }
}
