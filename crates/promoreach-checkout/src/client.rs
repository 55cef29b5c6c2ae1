//! HTTP client for creating checkout sessions.

use promoreach_campaign::CheckoutPayload;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Endpoint used when none is configured.
pub const DEFAULT_CHECKOUT_URL: &str = "http://localhost:3000/api/promotions/checkout";

const IDEMPOTENCY_KEY: &str = "Idempotency-Key";

/// Configuration for the checkout client.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// URL the payload is posted to.
    pub endpoint: String,
    /// Bearer token sent with each request.
    pub api_key: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for failed requests.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CHECKOUT_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            max_retries: 5,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
            user_agent: format!("promoreach/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CheckoutConfig {
    /// Returns the default configuration pointed at `endpoint`.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }
}

/// Errors that can occur while creating a checkout session.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server kept failing after all retries.
    #[error("Checkout server error: {status} (after {attempts} attempts)")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Number of requests made.
        attempts: u32,
    },

    /// The server rejected the request.
    #[error("Checkout rejected with status {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The response body was not a checkout session.
    #[error("Invalid checkout response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// A created checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    /// Session identifier.
    pub session_id: String,
    /// Page where the advertiser completes payment.
    pub url: String,
}

/// HTTP client with retry logic for the checkout endpoint.
#[derive(Debug, Clone)]
pub struct CheckoutClient {
    client: Client,
    config: CheckoutConfig,
}

impl CheckoutClient {
    /// Creates a new checkout client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: CheckoutConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(CheckoutConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Posts `payload` and returns the created session.
    ///
    /// Every attempt carries the campaign id as its `Idempotency-Key`, so a
    /// retried request cannot open a second session for the same campaign.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is rejected, the server keeps
    /// failing after all retries, or the response cannot be parsed.
    pub async fn create_session(
        &self,
        payload: &CheckoutPayload,
    ) -> Result<CheckoutSession, CheckoutError> {
        let mut attempts = 0;
        let idempotency_key = payload.campaign_id.to_string();

        loop {
            let mut request = self
                .client
                .post(&self.config.endpoint)
                .header(IDEMPOTENCY_KEY, idempotency_key.as_str())
                .json(payload);
            if let Some(key) = &self.config.api_key {
                request = request.bearer_auth(key);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = self.calculate_backoff_delay(attempts);
                            tracing::warn!(status = status.as_u16(), attempt = attempts, ?delay, "checkout failed, retrying");
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        return Err(CheckoutError::ServerError {
                            status: status.as_u16(),
                            attempts: attempts + 1,
                        });
                    }

                    let body = response.text().await?;
                    if !status.is_success() {
                        return Err(CheckoutError::Rejected {
                            status: status.as_u16(),
                            body,
                        });
                    }

                    let session: CheckoutSession = serde_json::from_str(&body)?;
                    tracing::info!(campaign = %payload.campaign_id, session = %session.session_id, "checkout session created");
                    return Ok(session);
                }
                Err(e) if Self::is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    tracing::warn!(error = %e, attempt = attempts, ?delay, "checkout request failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Exponential backoff capped at `max_delay_ms`, with up to ±25%
    /// deterministic jitter and a 100ms floor.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));
        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        let jitter_range = capped_delay / 4;
        let delay = if jitter_range > 0 {
            let offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            (capped_delay + offset).saturating_sub(jitter_range)
        } else {
            capped_delay
        };

        Duration::from_millis(delay.max(100))
    }

    fn is_retryable_error(error: &reqwest::Error) -> bool {
        if error.is_builder() {
            return false;
        }
        error.is_timeout() || error.is_connect() || error.is_request()
    }
}
