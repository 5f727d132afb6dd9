//! `reqwest`-backed transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};

use crate::transport::{
    Method, Transport, TransportError, TransportErrorKind, TransportRequest, TransportResponse,
};

const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = "client-tracker";

/// Transport that talks HTTP to the real API.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn headers(token: &str) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
            TransportError::new(TransportErrorKind::Other, format!("invalid auth header: {}", e))
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_V3));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        Ok(headers)
    }
}

fn classify(error: &reqwest::Error) -> TransportErrorKind {
    if error.is_timeout() {
        TransportErrorKind::Timeout
    } else if error.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Other
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[tracing::instrument(name = "http_send", skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let headers = Self::headers(&request.token)?;
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Put => self.client.put(&request.url),
        }
        .headers(headers)
        .timeout(Duration::from_secs(request.timeout_secs));

        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::new(classify(&e), e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(classify(&e), format!("read body failed: {}", e)))?;

        tracing::debug!(status = status.as_u16(), "Response received");
        Ok(TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
