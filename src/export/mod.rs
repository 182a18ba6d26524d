//! GitHub issue to Jira CSV export.
//!
//! An export runs three stages once, top to bottom:
//!
//! 1. [`IssuePager`] walks the issues listing until the `link` header stops
//!    advertising a next page, keeping every page in memory.
//! 2. [`ColumnWidths::probe`] sizes the label and comment columns over all
//!    pages.
//! 3. [`RowEmitter`] revisits every issue, loads its ZenHub enrichment and
//!    comments, and writes one fixed-width row.
//!
//! Every request is awaited before the next one is issued.

mod csv_out;
mod emitter;
pub mod fields;
mod pager;
mod profile;
mod row;
mod widths;

pub use csv_out::CsvOutput;
pub use emitter::{RowEmitter, RowSink};
pub use pager::IssuePager;
pub use profile::{
    CommentPlacement, EstimateDefault, ExportProfile, IssueTypePolicy, LabelSizing,
    ProfileSettings,
};
pub use row::{Column, ExportRow, IssueFields, RowLayout};
pub use widths::{ColumnWidths, eligible_issues, label_count, max_comments};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDateTime;
use tracing::info;

use crate::config::TicketportConfig;
use crate::error::ExportError;
use crate::github::gateway::MAX_PER_PAGE;
use crate::github::{IssueGateway, OctocrabIssueGateway, RepositoryLocator};
use crate::retry::RetryPolicy;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};
use crate::zenhub::{EnrichmentGateway, ZenHubGateway};

/// Outcome of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Issue pages fetched.
    pub pages: usize,
    /// Data rows written.
    pub rows: usize,
    /// Probed label and comment widths.
    pub widths: ColumnWidths,
    /// File the rows were written to.
    pub output: Utf8PathBuf,
}

/// Runs the three export stages against a pair of gateways.
pub struct IssueExport<'client, Issues, Enrichments>
where
    Issues: IssueGateway,
    Enrichments: EnrichmentGateway,
{
    issues: &'client Issues,
    enrichment: &'client Enrichments,
    settings: ProfileSettings,
    retry: RetryPolicy,
    telemetry: &'client dyn TelemetrySink,
    started: NaiveDateTime,
}

impl<'client, Issues, Enrichments> IssueExport<'client, Issues, Enrichments>
where
    Issues: IssueGateway,
    Enrichments: EnrichmentGateway,
{
    /// Creates an export started now, without retries or telemetry.
    #[must_use]
    pub fn new(
        issues: &'client Issues,
        enrichment: &'client Enrichments,
        settings: ProfileSettings,
    ) -> Self {
        Self {
            issues,
            enrichment,
            settings,
            retry: RetryPolicy::default(),
            telemetry: &NoopTelemetrySink,
            started: chrono::Local::now().naive_local(),
        }
    }

    /// Retries transient failures with `retry`.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Records telemetry events into `telemetry`.
    #[must_use]
    pub const fn with_telemetry(mut self, telemetry: &'client dyn TelemetrySink) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Overrides the start time stamped into the synthetic import label.
    #[must_use]
    pub const fn with_start_time(mut self, started: NaiveDateTime) -> Self {
        self.started = started;
        self
    }

    /// Exports every issue of `locator` into a CSV file at `path`.
    ///
    /// The file is created after pagination and probing, so a failed fetch
    /// leaves no partial output behind.
    ///
    /// # Errors
    ///
    /// Returns the first gateway, data, width or I/O failure.
    pub async fn export_to_path(
        &self,
        locator: &RepositoryLocator,
        path: &Utf8Path,
    ) -> Result<ExportSummary, ExportError> {
        let pages = IssuePager::new(self.issues, MAX_PER_PAGE)
            .with_retry(self.retry)
            .with_telemetry(self.telemetry)
            .fetch_all(locator)
            .await?;

        let widths = ColumnWidths::probe(&pages, &self.settings);
        let layout = RowLayout::new(self.settings.columns, widths);
        info!(
            label_columns = widths.labels,
            comment_columns = widths.comments,
            "probed column widths"
        );

        let mut output = CsvOutput::create(path, &layout.header())?;
        let rows = RowEmitter::new(self.issues, self.enrichment, self.settings, layout)
            .with_retry(self.retry)
            .with_import_label(fields::import_label(self.started))
            .emit_all(&pages, &mut output)
            .await?;
        output.finish()?;

        self.telemetry.record(TelemetryEvent::ExportCompleted {
            rows,
            label_columns: widths.labels,
            comment_columns: widths.comments,
        });
        info!(rows, output = %path, "export complete");

        Ok(ExportSummary {
            pages: pages.len(),
            rows,
            widths,
            output: path.to_owned(),
        })
    }
}

/// Resolves configuration, builds both gateways and runs the export.
///
/// # Errors
///
/// Returns configuration errors before any request is made, then any export
/// failure.
pub async fn run(
    config: &TicketportConfig,
    telemetry: &dyn TelemetrySink,
) -> Result<ExportSummary, ExportError> {
    let locator = config.repository_locator()?;
    let credentials = config.github_credentials(&locator)?;
    let settings = config.profile_settings()?;
    let issues = OctocrabIssueGateway::for_credentials(&credentials, &locator)?;
    let enrichment = ZenHubGateway::new(config.zenhub_config()?)?;
    let output = config.output_path(&locator);

    info!(
        owner = locator.owner().as_str(),
        repository = locator.repository().as_str(),
        output = %output,
        "starting issue export"
    );

    IssueExport::new(&issues, &enrichment, settings)
        .with_retry(config.retry_policy())
        .with_telemetry(telemetry)
        .export_to_path(&locator, &output)
        .await
}
