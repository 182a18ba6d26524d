//! GitHub issue intake.
//!
//! This module wraps Octocrab to page through a repository's issues with
//! basic-auth credentials and to load each issue's comments. Errors are mapped
//! into [`ExportError`](crate::ExportError) variants so callers can surface
//! precise failures without exposing Octocrab internals.

pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use gateway::{
    IssueGateway, ListIssuesParams, OctocrabIssueGateway, PaginatedIssues,
};
pub use locator::{GitHubCredentials, RepositoryLocator, RepositoryName, RepositoryOwner};
pub use models::{Issue, IssueComment, IssuePage};
pub use pagination::PageInfo;

#[cfg(test)]
pub use gateway::MockIssueGateway;
