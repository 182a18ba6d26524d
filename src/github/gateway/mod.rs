//! Gateways for loading repository issues through Octocrab.
//!
//! This module provides trait-based gateways for communicating with the GitHub
//! API. The trait-based design enables mocking in tests while the Octocrab
//! implementation handles real HTTP requests.

mod client;
mod comments;
mod error_mapping;
mod issues;

pub use issues::{
    ListIssuesParams, MAX_PER_PAGE, OctocrabIssueGateway, PaginatedIssues,
};

pub(crate) use error_mapping::{extract_error_message, map_http_error};

use async_trait::async_trait;

use crate::error::ExportError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{Issue, IssueComment};

/// Service name used in GitHub error messages.
pub(crate) const GITHUB: &str = "GitHub";

/// Gateway for repository issue operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueGateway: Send + Sync {
    /// Fetch one page of issues for the repository.
    async fn list_issues(
        &self,
        locator: &RepositoryLocator,
        params: &ListIssuesParams,
    ) -> Result<PaginatedIssues, ExportError>;

    /// Fetch all comments for an issue.
    async fn issue_comments(&self, issue: &Issue) -> Result<Vec<IssueComment>, ExportError>;
}
