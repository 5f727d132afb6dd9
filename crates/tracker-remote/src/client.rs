//! Remote content client
//!
//! Reads and writes whole JSON documents by path on the configured branch,
//! using the per-path [`VersionTokens`] as the optimistic-concurrency
//! precondition of every write.
//!
//! # Status mapping
//!
//! | Operation | Status | Outcome |
//! |-----------|--------|---------|
//! | read      | 2xx    | [`Document::Found`], token recorded |
//! | read      | 404    | [`Document::Absent`], cache untouched |
//! | read      | other  | [`Error::RemoteRead`] |
//! | write     | 2xx    | token replaced by the returned one |
//! | write     | 409    | [`Error::Conflict`], cache untouched |
//! | write     | other  | [`Error::RemoteWrite`] |
//!
//! Nothing is retried here. A conflict means the caller must reload the
//! document and reapply its change.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigSource, RemoteConfig};
use crate::envelope;
use crate::error::FailureKind;
use crate::tokens::VersionTokens;
use crate::transport::{
    Method, Transport, TransportError, TransportErrorKind, TransportRequest, TransportResponse,
};
use crate::{Error, Result};

/// Outcome of reading a document: found, or not there at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document<T> {
    Found(T),
    Absent,
}

impl<T> Document<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Document::Found(value) => Some(value),
            Document::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Document::Absent)
    }
}

impl<T: Default> Document<T> {
    /// The document, or `T::default()` when absent.
    pub fn or_default(self) -> T {
        self.into_option().unwrap_or_default()
    }
}

/// Result of a connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub ok: bool,
    pub detail: String,
}

impl ProbeReport {
    fn ok(detail: impl Into<String>) -> Self {
        Self {
            ok: true,
            detail: detail.into(),
        }
    }

    fn failed(detail: impl Into<String>) -> Self {
        Self {
            ok: false,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileResponse {
    content: String,
    sha: String,
    #[serde(default)]
    encoding: String,
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    content: WrittenFile,
}

#[derive(Debug, Deserialize)]
struct WrittenFile {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

#[derive(Debug, Serialize)]
struct WriteRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

/// Server-provided detail: the API's `message` field when present,
/// otherwise the raw body.
fn detail_of(response: &TransportResponse) -> String {
    match serde_json::from_str::<ApiMessage>(&response.body) {
        Ok(api) => api.message,
        Err(_) if response.body.trim().is_empty() => response.status_text.clone(),
        Err(_) => response.body.clone(),
    }
}

fn failure_kind(error: &TransportError) -> FailureKind {
    match error.kind {
        TransportErrorKind::Timeout => FailureKind::Timeout,
        TransportErrorKind::Connect | TransportErrorKind::Other => FailureKind::Transport,
    }
}

/// Default commit message for a write without one.
pub fn default_message(path: &str) -> String {
    format!("Update {}", path)
}

/// Client for the versioned-content API.
///
/// Cloning shares the transport and the token cache.
#[derive(Clone)]
pub struct ContentClient {
    config: Arc<dyn ConfigSource>,
    transport: Arc<dyn Transport>,
    tokens: Arc<VersionTokens>,
}

impl ContentClient {
    /// Create a client with its own empty token cache.
    pub fn new(config: impl ConfigSource + 'static, transport: impl Transport + 'static) -> Self {
        Self::from_parts(Arc::new(config), Arc::new(transport))
    }

    pub fn from_parts(config: Arc<dyn ConfigSource>, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            tokens: Arc::new(VersionTokens::new()),
        }
    }

    /// Use an existing token cache instead of a fresh one.
    pub fn with_tokens(mut self, tokens: Arc<VersionTokens>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn tokens(&self) -> &VersionTokens {
        &self.tokens
    }

    fn config(&self) -> Result<RemoteConfig> {
        self.config.current().ok_or(Error::NotConfigured)
    }

    /// Read the document at `path` on the configured branch.
    #[tracing::instrument(name = "remote_read", skip(self))]
    pub async fn read<T: DeserializeOwned>(&self, path: &str) -> Result<Document<T>> {
        let config = self.config()?;
        let request = TransportRequest {
            method: Method::Get,
            url: config.contents_url_at_ref(path),
            token: config.token.clone(),
            body: None,
            timeout_secs: config.timeout_secs,
        };

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| Error::read(path, failure_kind(&e), None, e.message))?;

        if response.status == 404 {
            tracing::debug!("Document absent");
            return Ok(Document::Absent);
        }
        if !response.is_success() {
            return Err(Error::read(
                path,
                FailureKind::Status,
                Some(response.status),
                detail_of(&response),
            ));
        }

        let file: FileResponse = serde_json::from_str(&response.body).map_err(|e| {
            Error::read(
                path,
                FailureKind::Decode,
                Some(response.status),
                format!("unexpected response body: {}", e),
            )
        })?;
        if file.encoding != "base64" {
            return Err(Error::read(
                path,
                FailureKind::Decode,
                Some(response.status),
                format!("unsupported content encoding '{}'", file.encoding),
            ));
        }

        let document = envelope::decode(&file.content)
            .map_err(|detail| Error::read(path, FailureKind::Decode, Some(response.status), detail))?;
        self.tokens.record(path, file.sha.clone());

        tracing::debug!(sha = %file.sha, "Document loaded");
        Ok(Document::Found(document))
    }

    /// Replace the document at `path` with `document`.
    ///
    /// The cached token for `path`, if any, is sent as the expected prior
    /// version. Without a message, the commit message is `Update <path>`.
    #[tracing::instrument(name = "remote_write", skip(self, document))]
    pub async fn write<T: Serialize + ?Sized>(
        &self,
        path: &str,
        document: &T,
        message: Option<&str>,
    ) -> Result<()> {
        let config = self.config()?;
        let content = envelope::encode(document).map_err(|e| {
            Error::write(
                path,
                FailureKind::Decode,
                None,
                format!("document could not be serialized: {}", e),
            )
        })?;

        let default_message = default_message(path);
        let prior = self.tokens.get(path);
        let body = WriteRequest {
            message: message.unwrap_or(&default_message),
            content,
            branch: &config.branch,
            sha: prior.clone(),
        };
        let body = serde_json::to_value(&body).map_err(|e| {
            Error::write(path, FailureKind::Decode, None, format!("request body: {}", e))
        })?;

        let request = TransportRequest {
            method: Method::Put,
            url: config.contents_url(path),
            token: config.token.clone(),
            body: Some(body),
            timeout_secs: config.timeout_secs,
        };

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| Error::write(path, failure_kind(&e), None, e.message))?;

        if response.status == 409 {
            tracing::warn!(prior = ?prior, "Write rejected: version conflict");
            return Err(Error::Conflict {
                path: path.to_string(),
            });
        }
        if !response.is_success() {
            return Err(Error::write(
                path,
                FailureKind::Status,
                Some(response.status),
                detail_of(&response),
            ));
        }

        let written: WriteResponse = serde_json::from_str(&response.body).map_err(|e| {
            Error::write(
                path,
                FailureKind::Decode,
                Some(response.status),
                format!("unexpected response body: {}", e),
            )
        })?;
        self.tokens.record(path, written.content.sha.clone());

        tracing::info!(sha = %written.content.sha, "Document written");
        Ok(())
    }

    /// Check that the configured repository is reachable with the
    /// configured token. Never fails; the report says what went wrong.
    pub async fn probe(&self) -> ProbeReport {
        let Ok(config) = self.config() else {
            return ProbeReport::failed("Not configured");
        };

        let request = TransportRequest {
            method: Method::Get,
            url: config.repo_url(),
            token: config.token.clone(),
            body: None,
            timeout_secs: config.timeout_secs,
        };

        match self.transport.send(request).await {
            Ok(response) if response.is_success() => {
                let name = serde_json::from_str::<RepoResponse>(&response.body)
                    .map(|repo| repo.full_name)
                    .unwrap_or_else(|_| config.full_name());
                ProbeReport::ok(format!("Connected: {}", name))
            }
            Ok(response) => ProbeReport::failed(format!(
                "Connection failed: {} {}",
                response.status, response.status_text
            )),
            Err(e) => ProbeReport::failed(format!("Connection error: {}", e.message)),
        }
    }
}

impl std::fmt::Debug for ContentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentClient")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
