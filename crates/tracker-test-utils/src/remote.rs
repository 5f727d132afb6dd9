//! [`MemoryRemote`]: an in-memory versioned-content API.
//!
//! Emulates the subset of the contents API the client uses:
//!
//! - `GET  /repos/{owner}/{repo}` - repository probe
//! - `GET  /repos/{owner}/{repo}/contents/{path}?ref={branch}` - 404 when missing
//! - `PUT  /repos/{owner}/{repo}/contents/{path}` - 409 when the supplied
//!   `sha` does not match the stored one (or is missing for an existing file)
//!
//! Version tokens are the SHA-256 of the stored text.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use tracker_remote::{
    Method, RemoteConfig, Transport, TransportError, TransportRequest, TransportResponse,
};

/// API base used by [`MemoryRemote::config`].
pub const TEST_API_BASE: &str = "https://remote.test";

/// A canned failure returned instead of the next response.
#[derive(Debug, Clone)]
pub enum Fault {
    /// Respond with this status and body
    Status(u16, String),
    /// Fail without a response
    Transport(TransportError),
}

/// One request as the fake saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub token: String,
    /// Document path for contents requests, `None` for the probe
    pub path: Option<String>,
    /// `sha` field of a write body
    pub sha: Option<String>,
    /// `message` field of a write body
    pub message: Option<String>,
    /// `branch` field of a write body
    pub branch: Option<String>,
}

#[derive(Debug, Clone)]
struct StoredFile {
    text: String,
    sha: String,
}

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<String, StoredFile>,
    requests: Vec<RecordedRequest>,
    faults: VecDeque<Fault>,
    /// Faults keyed to a specific path, consumed by the first matching request
    path_faults: Vec<(String, Fault)>,
    required_token: Option<String>,
}

/// In-memory fake of the remote API.
///
/// Clones share state, so a test can hand one clone to the client and keep
/// another to seed documents and inspect requests.
#[derive(Debug, Clone)]
pub struct MemoryRemote {
    owner: String,
    repo: String,
    state: Arc<Mutex<State>>,
}

impl Default for MemoryRemote {
    fn default() -> Self {
        Self::new("o", "r")
    }
}

fn sha_of(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Base64 wrapped at 60 columns, as the real API returns it.
fn wrapped_base64(text: &str) -> String {
    let encoded = BASE64.encode(text.as_bytes());
    encoded
        .as_bytes()
        .chunks(60)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

fn respond(status: u16, body: Value) -> TransportResponse {
    let status_text = match status {
        200 => "OK",
        201 => "Created",
        401 => "Unauthorized",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        _ => "",
    };
    TransportResponse::new(status, status_text, body.to_string())
}

impl MemoryRemote {
    /// Create an empty remote for `owner/repo`.
    pub fn new(owner: &str, repo: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Configuration pointing at this remote with token `"t"` on `main`.
    pub fn config(&self) -> RemoteConfig {
        RemoteConfig::new("t", &self.owner, &self.repo).with_api_base(TEST_API_BASE)
    }

    /// Reject every request whose token differs from `token` with 401.
    pub fn require_token(&self, token: &str) {
        self.lock().required_token = Some(token.to_string());
    }

    /// Store a document directly, as another session would.
    ///
    /// Returns the new version token.
    pub fn put_document(&self, path: &str, document: &Value) -> String {
        let text = serde_json::to_string_pretty(document).unwrap();
        self.put_raw(path, &text)
    }

    /// Store raw text (possibly invalid JSON) as a document.
    pub fn put_raw(&self, path: &str, text: &str) -> String {
        let sha = sha_of(text);
        self.lock().files.insert(
            path.to_string(),
            StoredFile {
                text: text.to_string(),
                sha: sha.clone(),
            },
        );
        sha
    }

    /// Parsed document currently stored at `path`.
    pub fn document(&self, path: &str) -> Option<Value> {
        self.lock()
            .files
            .get(path)
            .map(|f| serde_json::from_str(&f.text).unwrap())
    }

    /// Raw stored text at `path`.
    pub fn raw(&self, path: &str) -> Option<String> {
        self.lock().files.get(path).map(|f| f.text.clone())
    }

    /// Current version token of `path`.
    pub fn sha(&self, path: &str) -> Option<String> {
        self.lock().files.get(path).map(|f| f.sha.clone())
    }

    /// Queue a failure for the next request, whatever it is.
    pub fn fail_next(&self, fault: Fault) {
        self.lock().faults.push_back(fault);
    }

    /// Queue a failure for the next request touching `path`.
    pub fn fail_path(&self, path: &str, fault: Fault) {
        self.lock().path_faults.push((path.to_string(), fault));
    }

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Write requests received so far, oldest first.
    pub fn writes(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == Method::Put)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    /// Split a URL into the document path (`None` for the repository
    /// itself). `Err` when it does not address this repository.
    fn route(&self, url: &str) -> Result<Option<String>, ()> {
        let rest = url.strip_prefix(TEST_API_BASE).ok_or(())?;
        let (path_part, _query) = rest.split_once('?').unwrap_or((rest, ""));
        let repo_prefix = format!("/repos/{}/{}", self.owner, self.repo);
        let tail = path_part.strip_prefix(&repo_prefix).ok_or(())?;
        if tail.is_empty() {
            return Ok(None);
        }
        tail.strip_prefix("/contents/")
            .map(|p| Some(p.to_string()))
            .ok_or(())
    }

    fn handle(&self, request: &TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut state = self.lock();
        let route = self.route(&request.url);
        let path = route.clone().ok().flatten();

        let body_field = |field: &str| {
            request
                .body
                .as_ref()
                .and_then(|b| b.get(field))
                .and_then(Value::as_str)
                .map(String::from)
        };
        state.requests.push(RecordedRequest {
            method: request.method,
            url: request.url.clone(),
            token: request.token.clone(),
            path: path.clone(),
            sha: body_field("sha"),
            message: body_field("message"),
            branch: body_field("branch"),
        });

        let path_fault = path.as_ref().and_then(|p| {
            let idx = state.path_faults.iter().position(|(fp, _)| fp == p)?;
            Some(state.path_faults.remove(idx).1)
        });
        if let Some(fault) = path_fault.or_else(|| state.faults.pop_front()) {
            return match fault {
                Fault::Status(status, body) => Ok(TransportResponse::new(status, "", body)),
                Fault::Transport(error) => Err(error),
            };
        }

        if let Some(required) = &state.required_token {
            if &request.token != required {
                return Ok(respond(401, json!({"message": "Bad credentials"})));
            }
        }

        let Ok(path) = route else {
            return Ok(respond(404, json!({"message": "Not Found"})));
        };

        match (request.method, path) {
            (Method::Get, None) => Ok(respond(
                200,
                json!({"full_name": format!("{}/{}", self.owner, self.repo)}),
            )),
            (Method::Put, None) => Ok(respond(404, json!({"message": "Not Found"}))),
            (Method::Get, Some(path)) => match state.files.get(&path) {
                Some(file) => Ok(respond(
                    200,
                    json!({
                        "path": path,
                        "sha": file.sha,
                        "encoding": "base64",
                        "content": wrapped_base64(&file.text),
                    }),
                )),
                None => Ok(respond(404, json!({"message": "Not Found"}))),
            },
            (Method::Put, Some(path)) => {
                let supplied = body_field("sha");
                let current = state.files.get(&path).map(|f| f.sha.clone());
                if supplied != current {
                    return Ok(respond(
                        409,
                        json!({"message": format!("{} does not match", path)}),
                    ));
                }

                let Some(content) = body_field("content") else {
                    return Ok(respond(422, json!({"message": "content is missing"})));
                };
                let Ok(bytes) = BASE64.decode(content.as_bytes()) else {
                    return Ok(respond(422, json!({"message": "content is not valid Base64"})));
                };
                let text = String::from_utf8_lossy(&bytes).into_owned();
                let sha = sha_of(&text);
                let status = if current.is_some() { 200 } else { 201 };
                state.files.insert(
                    path.clone(),
                    StoredFile {
                        text,
                        sha: sha.clone(),
                    },
                );
                Ok(respond(
                    status,
                    json!({"content": {"path": path, "sha": sha}, "commit": {"message": body_field("message")}}),
                ))
            }
        }
    }
}

#[async_trait]
impl Transport for MemoryRemote {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.handle(&request)
    }
}
