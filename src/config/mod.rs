//! Export configuration loaded from CLI, environment, and files.
//!
//! Values are merged with `ortho_config`'s layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.ticketport.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `TICKETPORT_REPO`, `TICKETPORT_GITHUB_TOKEN`,
//!    and so on, plus the legacy `GITHUB_TOKEN` and `ZENHUB_TOKEN`
//! 4. **Command-line arguments** – `--repo`/`-r`, `--github-token`/`-t`, ...
//!
//! # Configuration File
//!
//! ```toml
//! repo = "octocat/hello-world"
//! github_user = "octocat"
//! zenhub_repo_id = "123456789"
//! profile = "compact"
//! label_sizing = "per-issue"
//! max_retries = 3
//! ```

use std::env;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::export::{ExportProfile, LabelSizing, ProfileSettings};
use crate::github::{GitHubCredentials, RepositoryLocator};
use crate::retry::RetryPolicy;
use crate::zenhub::ZenHubConfig;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_ZENHUB_API_BASE: &str = "https://api.zenhub.io";
const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use ticketport::TicketportConfig;
///
/// let config = TicketportConfig::load().expect("failed to load configuration");
/// let locator = config.repository_locator().expect("repository required");
/// let token = config.resolve_github_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "TICKETPORT",
    discovery(
        dotfile_name = ".ticketport.toml",
        config_file_name = "ticketport.toml",
        app_name = "ticketport"
    )
)]
pub struct TicketportConfig {
    /// Repository to export, as `owner/repo`.
    ///
    /// Can be provided via:
    /// - CLI: `--repo <OWNER/REPO>` or `-r <OWNER/REPO>`
    /// - Environment: `TICKETPORT_REPO`
    /// - Config file: `repo = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// GitHub login used for basic authentication.
    ///
    /// Defaults to the repository owner when unset; GitHub ignores the login
    /// when the secret is a personal access token.
    #[ortho_config(cli_short = 'u')]
    pub github_user: Option<String>,

    /// GitHub password or personal access token.
    ///
    /// Can be provided via:
    /// - CLI: `--github-token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `TICKETPORT_GITHUB_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `github_token = "..."`
    #[ortho_config(cli_short = 't')]
    pub github_token: Option<String>,

    /// GitHub API base URL, e.g. `https://github.example.com/api/v3`.
    ///
    /// CLI: `--api-base <URL>` or `-b <URL>`; `-a` belongs to `--active-only`.
    #[ortho_config(cli_short = 'b')]
    pub api_base: Option<String>,

    /// ZenHub API token.
    ///
    /// Can be provided via:
    /// - CLI: `--zenhub-token <TOKEN>` or `-z <TOKEN>`
    /// - Environment: `TICKETPORT_ZENHUB_TOKEN` or `ZENHUB_TOKEN` (legacy)
    /// - Config file: `zenhub_token = "..."`
    #[ortho_config(cli_short = 'z')]
    pub zenhub_token: Option<String>,

    /// ZenHub identifier of the repository.
    #[ortho_config()]
    pub zenhub_repo_id: Option<String>,

    /// ZenHub API base URL.
    #[ortho_config()]
    pub zenhub_api_base: Option<String>,

    /// Export profile name: `detailed` (default) or `compact`.
    #[ortho_config(cli_short = 'p')]
    pub profile: Option<String>,

    /// Label column sizing: `vocabulary` (default) or `per-issue`.
    #[ortho_config()]
    pub label_sizing: Option<String>,

    /// Skips closed issues regardless of profile.
    ///
    /// Can be provided via:
    /// - CLI: `--active-only` / `-a`
    /// - Config file: `active_only = true`
    ///
    /// Note: `TICKETPORT_ACTIVE_ONLY` is not read because `ortho_config` does
    /// not load boolean values from the environment.
    #[ortho_config(cli_short = 'a')]
    pub active_only: bool,

    /// Output CSV path; defaults to `<owner>-<repo>-issues.csv`.
    #[ortho_config(cli_short = 'o')]
    pub output: Option<String>,

    /// Retries after a transient network failure; 0 disables retrying.
    #[ortho_config()]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds, doubled per attempt.
    #[ortho_config()]
    pub retry_backoff_ms: u64,

    /// Emits JSONL telemetry events on stderr.
    #[ortho_config()]
    pub telemetry: bool,
}

impl Default for TicketportConfig {
    fn default() -> Self {
        Self {
            repo: None,
            github_user: None,
            github_token: None,
            api_base: None,
            zenhub_token: None,
            zenhub_repo_id: None,
            zenhub_api_base: None,
            profile: None,
            label_sizing: None,
            active_only: false,
            output: None,
            max_retries: 0,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            telemetry: false,
        }
    }
}

impl TicketportConfig {
    /// Returns the repository identifier or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingRepository`] when no repository is
    /// configured.
    pub fn require_repository(&self) -> Result<&str, ExportError> {
        self.repo
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(ExportError::MissingRepository)
    }

    /// Parses the repository against the configured API base.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingRepository`],
    /// [`ExportError::InvalidRepository`] or [`ExportError::InvalidUrl`].
    pub fn repository_locator(&self) -> Result<RepositoryLocator, ExportError> {
        let api_base = self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE);
        RepositoryLocator::with_api_base(self.require_repository()?, api_base)
    }

    /// Resolves the GitHub secret, falling back to the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingToken`] when no source provides a value.
    pub fn resolve_github_token(&self) -> Result<String, ExportError> {
        self.github_token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(ExportError::MissingToken)
    }

    /// Builds basic-auth credentials, using the repository owner as the login
    /// when `github_user` is unset.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingToken`] for an absent or blank secret.
    pub fn github_credentials(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<GitHubCredentials, ExportError> {
        let username = self
            .github_user
            .as_deref()
            .unwrap_or_else(|| locator.owner().as_str());
        GitHubCredentials::new(username, self.resolve_github_token()?)
    }

    /// Resolves the ZenHub token, falling back to the legacy `ZENHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingEnrichmentToken`] when no source provides
    /// a non-blank value.
    pub fn resolve_zenhub_token(&self) -> Result<String, ExportError> {
        self.zenhub_token
            .clone()
            .or_else(|| env::var("ZENHUB_TOKEN").ok())
            .filter(|token| !token.trim().is_empty())
            .ok_or(ExportError::MissingEnrichmentToken)
    }

    /// Returns the ZenHub repository identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingEnrichmentRepository`] when unset.
    pub fn require_zenhub_repo_id(&self) -> Result<&str, ExportError> {
        self.zenhub_repo_id
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(ExportError::MissingEnrichmentRepository)
    }

    /// Builds the ZenHub gateway configuration.
    ///
    /// # Errors
    ///
    /// Propagates token and repository identifier resolution failures.
    pub fn zenhub_config(&self) -> Result<ZenHubConfig, ExportError> {
        let base_url = self
            .zenhub_api_base
            .as_deref()
            .unwrap_or(DEFAULT_ZENHUB_API_BASE);
        Ok(
            ZenHubConfig::new(self.require_zenhub_repo_id()?, self.resolve_zenhub_token()?)
                .with_base_url(base_url),
        )
    }

    /// Parses the configured profile, defaulting to `detailed`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] for an unknown profile name.
    pub fn export_profile(&self) -> Result<ExportProfile, ExportError> {
        self.profile
            .as_deref()
            .map_or_else(|| Ok(ExportProfile::default()), str::parse)
    }

    /// Parses the configured label sizing, defaulting to `vocabulary`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] for an unknown strategy.
    pub fn label_sizing(&self) -> Result<LabelSizing, ExportError> {
        self.label_sizing
            .as_deref()
            .map_or_else(|| Ok(LabelSizing::default()), str::parse)
    }

    /// Combines the profile with the `active_only` and `label_sizing`
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] for unknown names.
    pub fn profile_settings(&self) -> Result<ProfileSettings, ExportError> {
        Ok(self
            .export_profile()?
            .settings()
            .with_active_only(self.active_only)
            .with_label_sizing(self.label_sizing()?))
    }

    /// Output path, defaulting to `<owner>-<repo>-issues.csv`.
    #[must_use]
    pub fn output_path(&self, locator: &RepositoryLocator) -> Utf8PathBuf {
        self.output.as_ref().map_or_else(
            || Utf8PathBuf::from(format!("{}-issues.csv", locator.output_stem())),
            Utf8PathBuf::from,
        )
    }

    /// Retry policy for upstream calls.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            Duration::from_millis(self.retry_backoff_ms),
        )
    }
}

#[cfg(test)]
mod tests;
