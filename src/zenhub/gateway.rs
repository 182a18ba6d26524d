//! reqwest implementation of the ZenHub enrichment gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::ExportError;
use crate::github::gateway::{extract_error_message, map_http_error};

use super::EnrichmentGateway;
use super::model::{ApiEnrichment, Enrichment};

const ZENHUB: &str = "ZenHub";
const DEFAULT_BASE_URL: &str = "https://api.zenhub.io";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const TOKEN_HEADER: &str = "X-Authentication-Token";

/// Configuration for [`ZenHubGateway`].
#[derive(Clone, PartialEq, Eq)]
pub struct ZenHubConfig {
    /// Base API URL (e.g., `https://api.zenhub.io`).
    pub base_url: String,
    /// ZenHub identifier of the GitHub repository.
    pub repo_id: String,
    /// Static API token.
    pub token: String,
    /// HTTP timeout per request.
    pub timeout: Duration,
}

impl ZenHubConfig {
    /// Constructs configuration against the public ZenHub API.
    #[must_use]
    pub fn new(repo_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            repo_id: repo_id.into(),
            token: token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn issue_endpoint(&self, issue_number: u64) -> String {
        format!(
            "{}/p1/repositories/{}/issues/{issue_number}",
            self.base_url.trim_end_matches('/'),
            self.repo_id
        )
    }
}

impl std::fmt::Debug for ZenHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZenHubConfig")
            .field("base_url", &self.base_url)
            .field("repo_id", &self.repo_id)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// ZenHub REST gateway.
#[derive(Debug, Clone)]
pub struct ZenHubGateway {
    client: Client,
    config: ZenHubConfig,
}

impl ZenHubGateway {
    /// Creates a gateway with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] when the HTTP client cannot be
    /// built.
    pub fn new(config: ZenHubConfig) -> Result<Self, ExportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| ExportError::Configuration {
                message: format!("failed to configure ZenHub HTTP client: {error}"),
            })?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl EnrichmentGateway for ZenHubGateway {
    async fn issue_enrichment(&self, issue_number: u64) -> Result<Enrichment, ExportError> {
        let response = self
            .client
            .get(self.config.issue_endpoint(issue_number))
            .header(TOKEN_HEADER, self.config.token.as_str())
            .send()
            .await
            .map_err(|error| ExportError::Network {
                service: ZENHUB,
                message: format!("issue enrichment request failed: {error}"),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(
                ZENHUB,
                "issue enrichment",
                status,
                extract_error_message(&body),
            ));
        }

        let payload: ApiEnrichment =
            response
                .json()
                .await
                .map_err(|error| ExportError::MalformedResponse {
                    issue: issue_number,
                    message: format!("ZenHub response JSON decoding failed: {error}"),
                })?;

        payload.into_enrichment(issue_number)
    }
}
