//! HTTP implementation of [`NoteStore`] against the conventional REST API:
//!
//! - `GET    {base}/notes/`     → full collection
//! - `POST   {base}/notes/`     → create, server assigns the id
//! - `PUT    {base}/notes/{id}` → replace title/content
//! - `DELETE {base}/notes/{id}` → remove
//!
//! JSON bodies, no authentication, no retries. A non-success status becomes
//! [`ApiError::Api`] carrying the body text so the log line says what the
//! server said.

use async_trait::async_trait;
use log::{debug, info, warn};

use super::store::{ApiError, NoteStore};
use super::types::{Note, NoteDraft};

pub struct HttpNoteStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpNoteStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/notes/", self.base_url)
    }

    fn note_url(&self, id: i64) -> String {
        format!("{}/notes/{}", self.base_url, id)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        warn!("notes service returned {}: {}", status, message);
        Err(ApiError::Api { status, message })
    }
}

#[async_trait]
impl NoteStore for HttpNoteStore {
    async fn list(&self) -> Result<Vec<Note>, ApiError> {
        debug!("GET {}", self.collection_url());
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = Self::check_status(response).await?;

        let notes: Vec<Note> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        info!("fetched {} notes", notes.len());
        Ok(notes)
    }

    async fn create(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        debug!("POST {} title={:?}", self.collection_url(), draft.title);
        let response = self
            .client
            .post(self.collection_url())
            .json(draft)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn update(&self, id: i64, draft: &NoteDraft) -> Result<(), ApiError> {
        debug!("PUT {}", self.note_url(id));
        let response = self
            .client
            .put(self.note_url(id))
            .json(draft)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        debug!("DELETE {}", self.note_url(id));
        let response = self
            .client
            .delete(self.note_url(id))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check_status(response).await?;
        Ok(())
    }
}
