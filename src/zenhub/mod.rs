//! ZenHub enrichment intake.
//!
//! ZenHub tracks the pipeline, epic flag and estimate of each GitHub issue.
//! The export reads these per issue number through [`EnrichmentGateway`].

mod gateway;
mod model;

pub use gateway::{ZenHubConfig, ZenHubGateway};
pub use model::{Enrichment, Estimate};

use async_trait::async_trait;

use crate::error::ExportError;

/// Gateway that loads enrichment metadata for an issue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrichmentGateway: Send + Sync {
    /// Fetch the enrichment record for the given issue number.
    async fn issue_enrichment(&self, issue_number: u64) -> Result<Enrichment, ExportError>;
}
