//! Row emission: one enrichment call, one comment fetch and one row per
//! exported issue, strictly in page order.

use tracing::{debug, info, warn};

use crate::error::ExportError;
use crate::github::{Issue, IssueComment, IssueGateway, IssuePage};
use crate::retry::RetryPolicy;
use crate::zenhub::{Enrichment, EnrichmentGateway};

use super::fields;
use super::profile::{CommentPlacement, ProfileSettings};
use super::row::{ExportRow, IssueFields, RowLayout};
use super::widths::eligible_issues;

/// Destination for emitted rows.
pub trait RowSink {
    /// Accepts one width-checked row.
    ///
    /// # Errors
    ///
    /// Returns an error when the row cannot be written.
    fn write_row(&mut self, row: &ExportRow) -> Result<(), ExportError>;
}

impl RowSink for Vec<ExportRow> {
    fn write_row(&mut self, row: &ExportRow) -> Result<(), ExportError> {
        self.push(row.clone());
        Ok(())
    }
}

/// Builds output rows from fetched issues, loading enrichment and comments
/// per issue.
pub struct RowEmitter<'client, Issues, Enrichments>
where
    Issues: IssueGateway,
    Enrichments: EnrichmentGateway,
{
    issues: &'client Issues,
    enrichment: &'client Enrichments,
    settings: ProfileSettings,
    layout: RowLayout,
    retry: RetryPolicy,
    import_label: Option<String>,
}

impl<'client, Issues, Enrichments> RowEmitter<'client, Issues, Enrichments>
where
    Issues: IssueGateway,
    Enrichments: EnrichmentGateway,
{
    /// Creates an emitter for the given layout without retries.
    #[must_use]
    pub const fn new(
        issues: &'client Issues,
        enrichment: &'client Enrichments,
        settings: ProfileSettings,
        layout: RowLayout,
    ) -> Self {
        Self {
            issues,
            enrichment,
            settings,
            layout,
            retry: RetryPolicy::new(0, std::time::Duration::ZERO),
            import_label: None,
        }
    }

    /// Retries transient gateway failures with `retry`.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the synthetic label prepended when the profile asks for one.
    #[must_use]
    pub fn with_import_label(mut self, label: String) -> Self {
        self.import_label = Some(label);
        self
    }

    /// Emits a row for every eligible issue across `pages` into `sink`.
    ///
    /// Pull requests are skipped, as are closed issues in active-only mode.
    /// Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Stops at the first gateway, timestamp, width or sink failure.
    pub async fn emit_all<Sink: RowSink>(
        &self,
        pages: &[IssuePage],
        sink: &mut Sink,
    ) -> Result<usize, ExportError> {
        let mut rows = 0;
        for issue in eligible_issues(pages) {
            if self.settings.active_only && issue.is_closed() {
                debug!(issue = issue.number, "skipping closed issue");
                continue;
            }
            let row = self.emit(issue).await?;
            sink.write_row(&row)?;
            rows += 1;
        }
        Ok(rows)
    }

    /// Builds the row for one issue.
    ///
    /// # Errors
    ///
    /// Returns gateway errors, [`ExportError::InvalidTimestamp`] or
    /// [`ExportError::RaggedRow`].
    pub async fn emit(&self, issue: &Issue) -> Result<ExportRow, ExportError> {
        let enrichment = self
            .retry
            .run("issue enrichment", || {
                self.enrichment.issue_enrichment(issue.number)
            })
            .await?;
        let comments = self.load_comments(issue).await?;
        let formatted: Vec<String> = comments
            .iter()
            .map(|comment| fields::format_comment(comment, self.settings.comments))
            .collect();

        let issue_fields = self.derive_fields(issue, &enrichment, &formatted)?;
        let labels = self.labels_for(issue);
        if self.settings.field_diagnostics {
            log_fields(&issue_fields, &labels, formatted.len());
        }

        let column_comments = match self.settings.comments {
            CommentPlacement::Columns => self.fit_comments(issue.number, formatted),
            CommentPlacement::Description => Vec::new(),
        };
        self.layout.assemble(&issue_fields, labels, column_comments)
    }

    async fn load_comments(&self, issue: &Issue) -> Result<Vec<IssueComment>, ExportError> {
        if issue.comments == 0 {
            return Ok(Vec::new());
        }
        self.retry
            .run("issue comments", || self.issues.issue_comments(issue))
            .await
    }

    /// Drops comments posted after the width probe ran.
    fn fit_comments(&self, issue: u64, mut comments: Vec<String>) -> Vec<String> {
        let columns = self.layout.widths().comments;
        if comments.len() > columns {
            warn!(
                issue,
                fetched = comments.len(),
                columns,
                "dropping comments beyond the probed comment columns"
            );
            comments.truncate(columns);
        }
        comments
    }

    fn derive_fields(
        &self,
        issue: &Issue,
        enrichment: &Enrichment,
        comments: &[String],
    ) -> Result<IssueFields, ExportError> {
        let resolution = fields::resolution(&issue.labels, &enrichment.pipeline);
        Ok(IssueFields {
            key: issue.number,
            summary: issue.title.trim().to_owned(),
            issue_type: fields::issue_type(self.settings.issue_type, enrichment, issue).to_owned(),
            status: enrichment.pipeline.clone(),
            resolution: resolution.unwrap_or_default().to_owned(),
            fix_versions: issue.milestone.clone().unwrap_or_default(),
            description: fields::description(issue, comments, self.settings.comments),
            assignee: issue.assignee.clone().unwrap_or_default(),
            reporter: issue.reporter.clone().unwrap_or_default(),
            created: fields::format_jira_timestamp(&issue.created_at)?,
            updated: fields::format_jira_timestamp(&issue.updated_at)?,
            resolved: fields::format_optional_timestamp(issue.closed_at.as_deref())?,
            estimate: fields::estimate(enrichment, self.settings.estimate_default),
        })
    }

    fn labels_for(&self, issue: &Issue) -> Vec<String> {
        let synthetic = self
            .import_label
            .as_ref()
            .filter(|_| self.settings.import_label)
            .cloned();
        synthetic
            .into_iter()
            .chain(issue.labels.iter().cloned())
            .collect()
    }
}

fn log_fields(fields: &IssueFields, labels: &[String], comment_count: usize) {
    info!(
        issue = fields.key,
        summary = %fields.summary,
        issue_type = %fields.issue_type,
        status = %fields.status,
        resolution = %fields.resolution,
        fix_versions = %fields.fix_versions,
        assignee = %fields.assignee,
        reporter = %fields.reporter,
        created = %fields.created,
        updated = %fields.updated,
        resolved = %fields.resolved,
        estimate = %fields.estimate,
        labels = ?labels,
        comments = comment_count,
        "derived issue fields"
    );
}
