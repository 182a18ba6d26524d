//! Ticketport library crate exporting GitHub issues as Jira CSV.
//!
//! The library pages through a repository's issues with Octocrab, enriches
//! each issue with its ZenHub pipeline, epic flag and estimate, and writes a
//! fixed-width CSV file that Jira's importer accepts. Failures surface as
//! [`ExportError`] values that the CLI prints verbatim.

pub mod config;
pub mod error;
pub mod export;
pub mod github;
pub mod logging;
pub mod retry;
pub mod telemetry;
pub mod zenhub;

pub use config::TicketportConfig;
pub use error::ExportError;
pub use export::{ExportProfile, ExportSummary, IssueExport, LabelSizing, ProfileSettings};
pub use github::{GitHubCredentials, Issue, OctocrabIssueGateway, RepositoryLocator};
pub use retry::RetryPolicy;
pub use zenhub::{Enrichment, ZenHubConfig, ZenHubGateway};
