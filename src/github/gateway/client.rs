//! Octocrab client construction helpers for gateway implementations.

use http::Uri;
use octocrab::Octocrab;

use crate::error::ExportError;
use crate::github::locator::GitHubCredentials;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client authenticating with HTTP basic auth against the
/// given API base URL.
///
/// # Errors
///
/// Returns `ExportError::InvalidUrl` when the base URI cannot be parsed or
/// `ExportError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    credentials: &GitHubCredentials,
    api_base: &str,
) -> Result<Octocrab, ExportError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| ExportError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .basic_auth(
            credentials.username().to_owned(),
            credentials.secret().to_owned(),
        )
        .base_uri(base_uri)
        .map_err(|error| ExportError::Api {
            service: super::GITHUB,
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
