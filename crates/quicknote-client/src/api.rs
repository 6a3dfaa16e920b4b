//! Transport to the notes API.
//!
//! [`NotesApi`] is the seam between the controller and the network; the
//! controller never talks to `reqwest` directly.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Response;
use tracing::debug;
use uuid::Uuid;

use quicknote_core::{
    defaults, CreateNoteRequest, DeleteNoteRequest, DeleteNoteResponse, ErrorResponse, Note,
};

use crate::error::{ClientError, ClientErrorKind, Result};

#[async_trait]
pub trait NotesApi: Send + Sync {
    /// All notes in server order (oldest first).
    async fn list(&self) -> Result<Vec<Note>>;

    async fn create(&self, text: &str) -> Result<Note>;

    async fn delete(&self, id: Uuid) -> Result<DeleteNoteResponse>;
}

#[async_trait]
impl<T: NotesApi + ?Sized> NotesApi for Arc<T> {
    async fn list(&self) -> Result<Vec<Note>> {
        (**self).list().await
    }

    async fn create(&self, text: &str) -> Result<Note> {
        (**self).create(text).await
    }

    async fn delete(&self, id: Uuid) -> Result<DeleteNoteResponse> {
        (**self).delete(id).await
    }
}

/// `reqwest`-backed [`NotesApi`].
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    client: reqwest::Client,
    notes_url: String,
}

impl HttpNotesApi {
    /// Client for the server at `base_url` with the default request timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(
            base_url,
            Duration::from_secs(defaults::CLIENT_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            notes_url: format!(
                "{}{}",
                base_url.trim_end_matches('/'),
                defaults::NOTES_PATH
            ),
        })
    }

    pub fn notes_url(&self) -> &str {
        &self.notes_url
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn list(&self) -> Result<Vec<Note>> {
        let resp = self.client.get(&self.notes_url).send().await?;
        read_json(resp).await
    }

    async fn create(&self, text: &str) -> Result<Note> {
        let resp = self
            .client
            .post(&self.notes_url)
            .json(&CreateNoteRequest::new(text))
            .send()
            .await?;
        read_json(resp).await
    }

    async fn delete(&self, id: Uuid) -> Result<DeleteNoteResponse> {
        let resp = self
            .client
            .delete(&self.notes_url)
            .json(&DeleteNoteRequest { id: id.to_string() })
            .send()
            .await?;
        read_json(resp).await
    }
}

/// Decode a success body, or turn an error body into a [`ClientError`].
async fn read_json<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
        return resp
            .json::<T>()
            .await
            .map_err(|e| ClientError::decode(e.to_string()));
    }

    let bytes = resp.bytes().await?;
    let err = match serde_json::from_slice::<ErrorResponse>(&bytes) {
        Ok(body) => ClientError::new(body.kind.into(), body.error),
        Err(_) => ClientError::new(
            ClientErrorKind::from_status(status),
            format!("HTTP {}", status.as_u16()),
        ),
    };
    debug!(
        subsystem = "client",
        component = "http",
        status = status.as_u16(),
        error_kind = %err.kind,
        "Request failed"
    );
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_url_joins_base() {
        let api = HttpNotesApi::new("http://localhost:3000/").unwrap();
        assert_eq!(api.notes_url(), "http://localhost:3000/api/notes");

        let api = HttpNotesApi::new("http://10.0.0.2:8080").unwrap();
        assert_eq!(api.notes_url(), "http://10.0.0.2:8080/api/notes");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) on loopback is not expected to accept HTTP.
        let api = HttpNotesApi::with_timeout("http://127.0.0.1:9", Duration::from_secs(2))
            .unwrap();
        let err = api.list().await.unwrap_err();
        assert_eq!(err.kind, ClientErrorKind::Network);
    }
}
