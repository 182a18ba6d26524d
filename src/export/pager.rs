//! Sequential page walker over the repository issues listing.

use tracing::info;

use crate::error::ExportError;
use crate::github::gateway::GITHUB;
use crate::github::{IssueGateway, IssuePage, ListIssuesParams, RepositoryLocator};
use crate::retry::RetryPolicy;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

/// Requests issue pages until the `link` header stops advertising a next
/// page.
pub struct IssuePager<'client, Gateway: IssueGateway> {
    gateway: &'client Gateway,
    per_page: u8,
    retry: RetryPolicy,
    telemetry: &'client dyn TelemetrySink,
}

impl<'client, Gateway: IssueGateway> IssuePager<'client, Gateway> {
    /// Creates a pager with no retries and no telemetry.
    #[must_use]
    pub const fn new(gateway: &'client Gateway, per_page: u8) -> Self {
        Self {
            gateway,
            per_page,
            retry: RetryPolicy::new(0, std::time::Duration::ZERO),
            telemetry: &NoopTelemetrySink,
        }
    }

    /// Retries transient page failures with `retry`.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Records a [`TelemetryEvent::PageFetched`] per page into `telemetry`.
    #[must_use]
    pub const fn with_telemetry(mut self, telemetry: &'client dyn TelemetrySink) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Fetches every page, starting at page 1.
    ///
    /// # Errors
    ///
    /// Aborts on the first failed page request.
    pub async fn fetch_all(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<Vec<IssuePage>, ExportError> {
        let mut pages = Vec::new();
        let mut page = 1_u32;
        loop {
            let params = ListIssuesParams {
                page,
                per_page: self.per_page,
                ..ListIssuesParams::default()
            };
            let result = self
                .retry
                .run("list issues", || self.gateway.list_issues(locator, &params))
                .await?;

            let info = result.page_info;
            let has_next = info.should_continue();
            info!(page, links = %info.describe(), "fetched issue page");
            self.telemetry.record(TelemetryEvent::PageFetched {
                page,
                issues: result.items.len(),
                has_next,
            });
            pages.push(result.items);

            if !has_next {
                info!(pages = pages.len(), "no more pages");
                return Ok(pages);
            }
            page = page.checked_add(1).ok_or_else(|| ExportError::Api {
                service: GITHUB,
                message: "issue listing exceeded the maximum page number".to_owned(),
            })?;
        }
    }
}
