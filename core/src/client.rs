use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use tracing::{debug, error, instrument, warn};

use crate::config::MarsConfig;
use crate::errors::{MarsError, MarsResult};
use crate::types::{AnalysisResult, ChatRequest, ChatResponse};

pub const ANALYZE_PATH: &str = "/api/mars/analyze";
pub const INGEST_PATH: &str = "/api/mars/ingest";
pub const CHAT_PATH: &str = "/api/mars/chat";

/// The three backend operations the views depend on
#[async_trait]
pub trait MarsBackend: Send + Sync + Debug {
    /// Fetch NASA data together with its GPT analysis.
    /// Non-2xx responses are errors.
    async fn analyze(&self) -> MarsResult<AnalysisResult>;

    /// Start ingestion and return the response body verbatim, whatever the status.
    async fn ingest(&self) -> MarsResult<String>;

    /// Ask a question. The status code is not inspected, only the body.
    async fn chat(&self, question: &str) -> MarsResult<ChatResponse>;
}

/// HTTP client for the Mars analysis backend
#[derive(Debug, Clone)]
pub struct MarsClient {
    client: Client,
    base_url: String,
}

impl MarsClient {
    /// Create a new client from configuration
    pub fn new(config: &MarsConfig) -> MarsResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            MarsError::ConfigError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: config.backend_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn send_error(e: reqwest::Error) -> MarsError {
    error!("Request to backend failed: {}", e);
    MarsError::RequestError(format!("Failed to send request: {}", e))
}

#[async_trait]
impl MarsBackend for MarsClient {
    #[instrument(skip(self))]
    async fn analyze(&self) -> MarsResult<AnalysisResult> {
        let url = self.url(ANALYZE_PATH);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(send_error)?;

        let status = response.status();
        if !status.is_success() {
            error!("Analyze request returned status {}", status);
            return Err(MarsError::HttpError {
                status_code: status.as_u16(),
            });
        }

        response
            .json::<AnalysisResult>()
            .await
            .map_err(|e| MarsError::ParsingError(format!("Failed to parse response: {}", e)))
    }

    #[instrument(skip(self))]
    async fn ingest(&self) -> MarsResult<String> {
        let url = self.url(INGEST_PATH);
        debug!("POST {}", url);

        let response = self.client.post(&url).send().await.map_err(send_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Ingest returned status {}, showing body as-is", status);
        }

        response
            .text()
            .await
            .map_err(|e| MarsError::ParsingError(format!("Failed to read response: {}", e)))
    }

    #[instrument(skip(self, question))]
    async fn chat(&self, question: &str) -> MarsResult<ChatResponse> {
        let url = self.url(CHAT_PATH);
        debug!("POST {} question={:?}", url, question);

        let request = ChatRequest {
            question: question.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Chat returned status {}, parsing body anyway", status);
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| MarsError::ParsingError(format!("Failed to parse response: {}", e)))
    }
}
