//! HTTP client for the remote Legalenz analysis backend
//!
//! Three endpoints, each with its own timeout: document analysis (slow, the
//! backend extracts and summarizes the whole document), clause highlights,
//! and question answering. Requests are never retried here; retry is a
//! session-level event that re-runs the call from scratch.

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::{Client, StatusCode};
use url::Url;
use uuid::Uuid;

use crate::model::analysis::{
    AnalyzeDocumentResponse, ApiErrorBody, AskQuestionRequest, AskQuestionResponse,
};
use crate::model::config::{Config, TimeoutConfig};
use crate::model::highlights::{HighlightsRequest, HighlightsResponse};

const ANALYZE_PATH: &str = "/analyze";
const HIGHLIGHTS_PATH: &str = "/highlights";
const ASK_PATH: &str = "/ask";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request exceeded its endpoint timeout. The message is the
    /// user-facing text shown for that endpoint.
    #[error("{0}")]
    Timeout(String),

    #[error("HTTP error! status: {status}, message: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ClientError {
    /// Message suitable for surfacing to the user as a retryable failure.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Seam over the three backend calls, so the orchestration layer can be
/// exercised without a network.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn analyze(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<AnalyzeDocumentResponse, ClientError>;

    async fn highlights(&self, namespace: &str) -> Result<HighlightsResponse, ClientError>;

    async fn ask(&self, query: &str, namespace: &str)
        -> Result<AskQuestionResponse, ClientError>;
}

/// Client for the Legalenz analysis backend.
pub struct AnalysisClient {
    client: Client,
    base_url: Url,
    timeouts: TimeoutConfig,
}

impl AnalysisClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .user_agent("legalenz-analysis/0.1")
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: config.base_url.clone(),
            timeouts: config.timeouts.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Parse(format!("Invalid endpoint URL: {}", e)))
    }

    /// Map a transport error, tagging timeouts with the endpoint's
    /// user-facing message.
    fn map_error(e: reqwest::Error, timeout_message: &str) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout(timeout_message.to_string())
        } else {
            ClientError::Transport(e)
        }
    }

    /// Turn a non-success response into a status error, preferring the
    /// backend's structured `{error}` body over raw text.
    async fn status_error(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);

        ClientError::Status { status, message }
    }
}

#[async_trait]
impl AnalysisApi for AnalysisClient {
    /// Upload a document for analysis. Returns the summary and the namespace
    /// used by follow-up highlights and question calls.
    async fn analyze(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<AnalyzeDocumentResponse, ClientError> {
        let url = self.endpoint(ANALYZE_PATH)?;
        let request_id = Uuid::new_v4();

        tracing::info!(request_id = %request_id, file = %file_name, url = %url, "Analyzing document");

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|e| ClientError::Parse(format!("Invalid MIME type: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .timeout(self.timeouts.analyze())
            .send()
            .await
            .map_err(|e| {
                Self::map_error(
                    e,
                    "Request timed out. The document analysis is taking longer than expected. Please try again.",
                )
            })?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let parsed: AnalyzeDocumentResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("Failed to deserialize analysis: {}", e)))?;

        tracing::info!(request_id = %request_id, namespace = %parsed.namespace, "Document analyzed");
        Ok(parsed)
    }

    /// Fetch per-category clause findings for an analyzed document.
    async fn highlights(&self, namespace: &str) -> Result<HighlightsResponse, ClientError> {
        let url = self.endpoint(HIGHLIGHTS_PATH)?;
        let request_id = Uuid::new_v4();

        tracing::info!(request_id = %request_id, namespace = %namespace, "Fetching document highlights");

        let response = self
            .client
            .post(url)
            .json(&HighlightsRequest {
                namespace: namespace.to_string(),
            })
            .timeout(self.timeouts.highlights())
            .send()
            .await
            .map_err(|e| {
                Self::map_error(
                    e,
                    "Request timed out. The highlights analysis is taking longer than expected. Please try again.",
                )
            })?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("Failed to deserialize highlights: {}", e)))
    }

    /// Ask a follow-up question about an analyzed document.
    async fn ask(
        &self,
        query: &str,
        namespace: &str,
    ) -> Result<AskQuestionResponse, ClientError> {
        let url = self.endpoint(ASK_PATH)?;
        let request_id = Uuid::new_v4();

        tracing::info!(request_id = %request_id, namespace = %namespace, "Asking document question");

        let response = self
            .client
            .post(url)
            .json(&AskQuestionRequest {
                query: query.to_string(),
                namespace: namespace.to_string(),
            })
            .timeout(self.timeouts.ask())
            .send()
            .await
            .map_err(|e| {
                Self::map_error(e, "Request timed out. Please try asking your question again.")
            })?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("Failed to deserialize answer: {}", e)))
    }
}
