//! HTTP client for the image download API.
//!
//! The protocol is a single endpoint: POST the username as a form field with
//! the hashed password in the `authorization` header, and get back a JSON
//! body carrying a base64 image payload. Every way the request can end maps
//! to an [`ApiOutcome`] variant; callers never see a transport error type.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use super::encoder::PasswordEncoder;

/// Default base URL for the image API.
pub const IMAGE_API_URL: &str = "https://image.example.com";

/// Path of the image download endpoint.
pub const IMAGE_PATH: &str = "/download/bootcamp/image.php";

/// Default per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration for the image API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: IMAGE_API_URL.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Outcome of one image download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome {
    /// 2xx with a parseable body; carries the base64 payload text.
    Success(String),
    /// The server rejected the credentials (401).
    Unauthorized,
    /// Any other failure. `code` is the HTTP status, 408 for a client-side
    /// timeout, or 0 when no response was received at all.
    Failed { code: u16, reason: String },
}

/// Response body of the image endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageResponse {
    pub image: String,
}

/// Client for the image download API.
pub struct ImageApiClient {
    /// Base URL for the image API
    pub base_url: String,
    /// Reusable HTTP client
    client: Client,
    /// Per-request timeout
    timeout: Duration,
    /// Encoder for the authorization header
    encoder: Arc<dyn PasswordEncoder>,
}

impl ImageApiClient {
    /// Create a client with the default base URL and timeout.
    pub fn new(encoder: Arc<dyn PasswordEncoder>) -> Self {
        Self::with_config(ApiConfig::default(), encoder)
    }

    /// Create a client with a custom base URL, keeping the default timeout.
    pub fn with_base_url(base_url: String, encoder: Arc<dyn PasswordEncoder>) -> Self {
        Self::with_config(
            ApiConfig {
                base_url,
                ..ApiConfig::default()
            },
            encoder,
        )
    }

    /// Create a client from explicit configuration.
    pub fn with_config(config: ApiConfig, encoder: Arc<dyn PasswordEncoder>) -> Self {
        Self {
            base_url: config.base_url,
            client: Client::new(),
            timeout: config.timeout,
            encoder,
        }
    }

    /// Download the image payload for a user.
    ///
    /// POST /download/bootcamp/image.php
    ///
    /// Sends the username as a form field and the hashed password in the
    /// `authorization` header. Exactly one attempt is made; retrying is the
    /// caller's decision.
    pub async fn fetch_image(&self, username: &str, password: &str) -> ApiOutcome {
        let url = format!("{}{}", self.base_url, IMAGE_PATH);
        let digest = self.encoder.encode(password);

        debug!("Requesting image for user '{}'", username);

        let result = self
            .client
            .post(&url)
            .header("authorization", digest)
            .form(&[("username", username)])
            .timeout(self.timeout)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!("Image request timed out after {:?}", self.timeout);
                return ApiOutcome::Failed {
                    code: 408,
                    reason: "timeout".to_string(),
                };
            }
            Err(e) => {
                warn!("Image request failed: {}", e);
                return ApiOutcome::Failed {
                    code: 0,
                    reason: e.to_string(),
                };
            }
        };

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            debug!("Image request rejected: bad credentials");
            return ApiOutcome::Unauthorized;
        }

        if !status.is_success() {
            let code = status.as_u16();
            let reason = match response.text().await {
                Ok(body) if !body.is_empty() => body,
                _ => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            };
            warn!("Image request failed with status {}: {}", code, reason);
            return ApiOutcome::Failed { code, reason };
        }

        let code = status.as_u16();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) if e.is_timeout() => {
                warn!("Image response body timed out after {:?}", self.timeout);
                return ApiOutcome::Failed {
                    code: 408,
                    reason: "timeout".to_string(),
                };
            }
            Err(e) => {
                warn!("Failed to read image response body: {}", e);
                return ApiOutcome::Failed {
                    code: 0,
                    reason: e.to_string(),
                };
            }
        };

        if text.is_empty() {
            warn!("Image response body was empty");
            return ApiOutcome::Failed {
                code,
                reason: "empty response body".to_string(),
            };
        }

        match serde_json::from_str::<ImageResponse>(&text) {
            Ok(data) => {
                debug!("Image payload received ({} chars)", data.image.len());
                ApiOutcome::Success(data.image)
            }
            Err(e) => {
                warn!("Malformed image response: {}", e);
                ApiOutcome::Failed {
                    code,
                    reason: format!("malformed response: {}", e),
                }
            }
        }
    }
}
