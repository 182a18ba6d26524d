//! Error types surfaced by every stage of the export.

use thiserror::Error;

/// Errors surfaced while configuring, fetching, or writing an export.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExportError {
    /// No target repository was configured.
    #[error("repository is required (use --repo owner/repo)")]
    MissingRepository,

    /// The repository identifier is not in `owner/repo` form.
    #[error("repository must be given as owner/repo: {0}")]
    InvalidRepository(String),

    /// The GitHub secret (password or personal access token) was missing.
    #[error("GitHub password or token is required")]
    MissingToken,

    /// The ZenHub API token was missing.
    #[error("ZenHub token is required (use --zenhub-token or ZENHUB_TOKEN)")]
    MissingEnrichmentToken,

    /// The ZenHub repository identifier was missing.
    #[error("ZenHub repository id is required (use --zenhub-repo-id)")]
    MissingEnrichmentRepository,

    /// A configured URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// An upstream service rejected the supplied credentials.
    #[error("{service} rejected the credentials: {message}")]
    Authentication {
        /// Service that returned the 401/403 response.
        service: &'static str,
        /// Error message returned with the response.
        message: String,
    },

    /// An upstream service returned a non-authentication API error.
    #[error("{service} API error: {message}")]
    Api {
        /// Service that returned the error.
        service: &'static str,
        /// Response detail describing the failure.
        message: String,
    },

    /// Networking failed while calling an upstream service.
    #[error("network error talking to {service}: {message}")]
    Network {
        /// Service that could not be reached.
        service: &'static str,
        /// Transport-level error detail.
        message: String,
    },

    /// An upstream response lacked a field the export reads.
    #[error("malformed response for issue #{issue}: {message}")]
    MalformedResponse {
        /// Issue number whose data was malformed.
        issue: u64,
        /// Decoding failure detail.
        message: String,
    },

    /// A timestamp did not match `YYYY-MM-DDTHH:MM:SSZ`.
    #[error("timestamp `{value}` is invalid: {message}")]
    InvalidTimestamp {
        /// Raw timestamp text.
        value: String,
        /// Parser error detail.
        message: String,
    },

    /// A row did not match the header width.
    #[error("row for issue #{issue} has {actual} columns, expected {expected}")]
    RaggedRow {
        /// Issue number of the offending row.
        issue: u64,
        /// Header width.
        expected: usize,
        /// Width of the rejected row.
        actual: usize,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded or was inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}

impl ExportError {
    /// Returns true for transport failures worth retrying.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

impl From<std::io::Error> for ExportError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}
