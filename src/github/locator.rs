//! Repository identity and credential wrappers for issue intake.

use url::Url;

use crate::error::ExportError;

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str, input: &str) -> Result<Self, ExportError> {
        if value.is_empty() {
            return Err(ExportError::InvalidRepository(input.to_owned()));
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str, input: &str) -> Result<Self, ExportError> {
        if value.is_empty() {
            return Err(ExportError::InvalidRepository(input.to_owned()));
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// HTTP basic-auth credentials for the GitHub API.
///
/// The secret may be an account password or a personal access token; GitHub
/// accepts either in the basic-auth password slot.
#[derive(Clone, PartialEq, Eq)]
pub struct GitHubCredentials {
    username: String,
    secret: String,
}

impl GitHubCredentials {
    /// Validates that the secret is non-blank and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingToken`] when the secret is blank.
    pub fn new(username: impl AsRef<str>, secret: impl AsRef<str>) -> Result<Self, ExportError> {
        let trimmed = secret.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ExportError::MissingToken);
        }
        Ok(Self {
            username: username.as_ref().trim().to_owned(),
            secret: trimmed.to_owned(),
        })
    }

    /// Basic-auth username. May be empty when a token is used.
    #[must_use]
    pub const fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Basic-auth password or token.
    #[must_use]
    pub const fn secret(&self) -> &str {
        self.secret.as_str()
    }
}

impl std::fmt::Debug for GitHubCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubCredentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Target repository plus the API base used to reach it.
///
/// # Example
///
/// ```
/// use ticketport::github::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse("octo/repo").expect("should parse");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.repository().as_str(), "repo");
/// assert_eq!(locator.output_stem(), "octo-repo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Parses `owner/repo` against the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidRepository`] when the input is not two
    /// non-empty segments separated by a single slash.
    pub fn parse(input: &str) -> Result<Self, ExportError> {
        Self::with_api_base(input, DEFAULT_API_BASE)
    }

    /// Parses `owner/repo` against an explicit API base, such as a GitHub
    /// Enterprise `https://host/api/v3` endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidRepository`] for a malformed identifier
    /// and [`ExportError::InvalidUrl`] when the API base cannot be parsed.
    pub fn with_api_base(input: &str, api_base: &str) -> Result<Self, ExportError> {
        let trimmed = input.trim().trim_matches('/');
        let mut segments = trimmed.split('/');
        let owner_segment = segments.next().unwrap_or_default();
        let repository_segment = segments
            .next()
            .ok_or_else(|| ExportError::InvalidRepository(input.to_owned()))?;
        if segments.next().is_some() {
            return Err(ExportError::InvalidRepository(input.to_owned()));
        }

        let owner = RepositoryOwner::new(owner_segment, input)?;
        let repository = RepositoryName::new(repository_segment, input)?;
        let api_base =
            Url::parse(api_base).map_err(|error| ExportError::InvalidUrl(error.to_string()))?;

        Ok(Self {
            api_base,
            owner,
            repository,
        })
    }

    /// API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// `owner-repo`, the stem of the default output file name.
    #[must_use]
    pub fn output_stem(&self) -> String {
        format!("{}-{}", self.owner.as_str(), self.repository.as_str())
    }

    pub(crate) fn issues_path(&self) -> String {
        format!(
            "/repos/{}/{}/issues",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}
