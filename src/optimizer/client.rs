//! HTTP client for the optimization service

use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::api::{ErrorBody, OptimizeRequest, OptimizeResponse, HEALTH_PATH, OPTIMIZE_PATH};
use crate::utils::retry::{with_retry_if, RetryConfig};
use crate::utils::truncate_text;

/// Longest error body kept in an error message
const MAX_ERROR_BODY_CHARS: usize = 300;

// ============================================================================
// Client Configuration
// ============================================================================

/// Configuration for the optimizer client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL, e.g. `http://localhost:8000`
    pub base_url: String,

    /// Timeout for each health probe
    pub health_timeout: Duration,

    /// Timeout for the optimization call
    pub request_timeout: Duration,

    /// Extra health probe attempts after the first
    pub retry_count: u32,

    /// Delay before the first retry; doubles for each later one
    pub retry_delay: Duration,
}

impl ClientConfig {
    /// Create a new client config
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            health_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(30),
            retry_count: 2,
            retry_delay: Duration::from_millis(250),
        }
    }

    /// Set the health probe timeout
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Set the optimization timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set retry count
    pub fn with_retry_count(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    /// Set retry delay
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    fn retry_config(&self) -> RetryConfig {
        let base = self.retry_delay.as_millis() as u64;
        RetryConfig::with_delays(self.retry_count, base, base.saturating_mul(8))
    }
}

// ============================================================================
// Optimizer Client
// ============================================================================

/// Client for the exact-optimization service
#[derive(Debug, Clone)]
pub struct OptimizerClient {
    config: ClientConfig,
    base_url: String,
    http_client: Client,
}

impl OptimizerClient {
    /// Create a new optimizer client
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Init(format!("invalid base URL '{}': {e}", config.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Init(format!(
                "unsupported URL scheme '{}'",
                parsed.scheme()
            )));
        }

        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("shiftplan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Init(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probe `GET /api/health`; any 2xx means available
    ///
    /// Transient failures are retried with exponential backoff.
    pub async fn health(&self) -> Result<(), ClientError> {
        let url = self.endpoint(HEALTH_PATH);
        with_retry_if(
            &self.config.retry_config(),
            || self.probe_once(&url),
            ClientError::is_retryable,
        )
        .await
    }

    async fn probe_once(&self, url: &str) -> Result<(), ClientError> {
        let response = self
            .http_client
            .get(url)
            .timeout(self.config.health_timeout)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "Optimizer healthy");
            Ok(())
        } else {
            Err(ClientError::Http {
                status: status.as_u16(),
                message: body_snippet(response).await,
            })
        }
    }

    /// Submit a problem to `POST /api/schedule/optimize`
    ///
    /// HTTP 400 is reported as [`ClientError::Infeasible`] carrying the
    /// service's `detail` message. Not retried.
    pub async fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeResponse, ClientError> {
        let url = self.endpoint(OPTIMIZE_PATH);
        tracing::debug!(
            %url,
            period = %request.period,
            employees = request.employees.len(),
            shifts = request.shifts.len(),
            "Submitting optimization request"
        );

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<OptimizeResponse>()
                .await
                .map_err(|e| ClientError::Parse(e.to_string()));
        }

        if status == StatusCode::BAD_REQUEST {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.detail_text())
                .unwrap_or_else(|_| truncate_text(text.trim(), MAX_ERROR_BODY_CHARS));
            return Err(ClientError::Infeasible { detail });
        }

        Err(ClientError::Http {
            status: status.as_u16(),
            message: body_snippet(response).await,
        })
    }
}

async fn body_snippet(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    truncate_text(text.trim(), MAX_ERROR_BODY_CHARS)
}

// ============================================================================
// Client Errors
// ============================================================================

/// Client errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Client could not be built
    #[error("initialization error: {0}")]
    Init(String),

    /// Connection-level failure
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded its timeout
    #[error("request timed out")]
    Timeout,

    /// Non-success status other than 400 on the optimize endpoint
    #[error("HTTP error ({status}): {message}")]
    Http { status: u16, message: String },

    /// Service reported that no assignment satisfies the hard constraints
    #[error("no feasible solution: {detail}")]
    Infeasible { detail: String },

    /// Success body could not be decoded
    #[error("parse error: {0}")]
    Parse(String),

    /// Decoded body contradicts the local data
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }

    /// Whether another attempt could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
