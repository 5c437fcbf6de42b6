//! The remote inference service, consulted once when no local table matches.
//!
//! Protocol: `POST {base}/agents/query` with `{"query": "..."}`; a 2xx response carries
//! `{"response": "..."}`. The answer text is returned verbatim.

use crate::constants::REMOTE_QUERY_PATH;
use crate::{AssistError, AssistResult, RemoteError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Something that can answer a free-text query the local tables could not.
#[async_trait]
pub trait RemoteAssistant: Send + Sync {
    /// Makes exactly one attempt. No retries.
    async fn ask(&self, query: &str) -> Result<String, RemoteError>;
}

#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct ResponseBody {
    response: String,
}

/// HTTP client for the remote query endpoint.
#[derive(Clone, Debug)]
pub struct HttpRemote {
    client: reqwest::Client,
    url: String,
}

impl HttpRemote {
    /// Builds a client for `base_url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::InvalidInput`] for a blank URL and [`AssistError::HttpClient`] if
    /// the underlying client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> AssistResult<Self> {
        let base = base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(AssistError::InvalidInput(
                "remote base URL cannot be empty".into(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AssistError::HttpClient)?;

        Ok(Self {
            client,
            url: format!("{base}{REMOTE_QUERY_PATH}"),
        })
    }

    /// Full URL of the query endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RemoteAssistant for HttpRemote {
    async fn ask(&self, query: &str) -> Result<String, RemoteError> {
        tracing::debug!("POST {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&QueryBody { query })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ResponseBody = response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;

        if body.response.trim().is_empty() {
            return Err(RemoteError::EmptyResponse);
        }
        Ok(body.response)
    }
}
