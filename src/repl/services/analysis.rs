//! # Analysis Service Client
//!
//! Talks to the remote analysis service. Two endpoints, both taking the
//! buffer text as `{"code": ...}`:
//!
//! - `POST /reasoning` answers `{"reasoning": ...}`
//! - `POST /debug` answers `{"output": ...}`
//!
//! The [`AnalysisClient`] trait is the seam the orchestrator depends on, so
//! tests can swap in a scripted client.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Faults from talking to the analysis service
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service answered with status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("request task aborted: {0}")]
    Aborted(String),
}

/// Body sent to both endpoints
#[derive(Debug, Serialize)]
struct CodeRequest<'a> {
    code: &'a str,
}

/// Payload of `/reasoning`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReasoningResponse {
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// Payload of `/debug`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DebugResponse {
    #[serde(default)]
    pub output: Option<String>,
}

/// Outbound operations of the analysis service
///
/// `request_reasoning` is side-effect free and may be called redundantly.
/// `request_debug` may execute code remotely and is never retried.
pub trait AnalysisClient: Clone + Send + Sync + 'static {
    fn request_reasoning(
        &self,
        code: String,
    ) -> impl Future<Output = Result<ReasoningResponse, AnalysisError>> + Send;

    fn request_debug(
        &self,
        code: String,
    ) -> impl Future<Output = Result<DebugResponse, AnalysisError>> + Send;
}

/// reqwest-backed client for a running analysis service
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisClient {
    /// Build a client for `server`, e.g. `http://localhost:5000`
    ///
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new(server: &str, timeout: Option<Duration>) -> Result<Self, AnalysisError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        tracing::debug!("analysis client created for {server}");

        Ok(Self {
            client,
            base_url: server.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, code: &str) -> Result<T, AnalysisError> {
        let url = format!("{}/{path}", self.base_url);
        tracing::debug!(%url, code_len = code.len(), "sending analysis request");

        let response = self
            .client
            .post(&url)
            .json(&CodeRequest { code })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                %url,
                status = status.as_u16(),
                "analysis service returned error status"
            );
            return Err(AnalysisError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| AnalysisError::Malformed(e.to_string()))
    }
}

impl AnalysisClient for HttpAnalysisClient {
    async fn request_reasoning(&self, code: String) -> Result<ReasoningResponse, AnalysisError> {
        self.post("reasoning", &code).await
    }

    async fn request_debug(&self, code: String) -> Result<DebugResponse, AnalysisError> {
        self.post("debug", &code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn reasoning_request_should_post_code_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/reasoning"))
            .and(body_json(serde_json::json!({ "code": "print(1)" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "reasoning": "prints one" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpAnalysisClient::new(&server.uri(), None).unwrap();
        let response = client.request_reasoning("print(1)".to_string()).await.unwrap();

        assert_eq!(response.reasoning.as_deref(), Some("prints one"));
    }

    #[tokio::test]
    async fn debug_request_should_tolerate_missing_output_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/debug"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = HttpAnalysisClient::new(&server.uri(), None).unwrap();
        let response = client.request_debug("x".to_string()).await.unwrap();

        assert_eq!(response.output, None);
    }

    #[tokio::test]
    async fn non_success_status_should_map_to_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/debug"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = HttpAnalysisClient::new(&server.uri(), None).unwrap();
        let result = client.request_debug("x".to_string()).await;

        assert!(matches!(result, Err(AnalysisError::Status(500))));
    }

    #[tokio::test]
    async fn invalid_json_should_map_to_malformed_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/reasoning"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = HttpAnalysisClient::new(&server.uri(), None).unwrap();
        let result = client.request_reasoning("x".to_string()).await;

        assert!(matches!(result, Err(AnalysisError::Malformed(_))));
    }

    #[tokio::test]
    async fn unreachable_server_should_map_to_transport_error() {
        let client = HttpAnalysisClient::new("http://127.0.0.1:1", None).unwrap();
        let result = client.request_reasoning("x".to_string()).await;

        assert!(matches!(result, Err(AnalysisError::Transport(_))));
    }

    #[test]
    fn base_url_should_drop_trailing_slash() {
        let client = HttpAnalysisClient::new("http://localhost:5000/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
