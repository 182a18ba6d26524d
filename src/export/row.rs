//! Output row layout and width-checked row assembly.

use crate::error::ExportError;

use super::widths::ColumnWidths;

const LABELS_HEADER: &str = "Labels";
const COMMENT_HEADER: &str = "Comment Body";

/// Fixed (non-repeating) output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// GitHub issue number.
    Key,
    /// Issue title.
    Summary,
    /// Derived issue type.
    Type,
    /// ZenHub pipeline name.
    Status,
    /// Derived resolution.
    Resolution,
    /// Milestone title.
    FixVersions,
    /// Issue body, optionally with folded comments.
    Description,
    /// Assignee login.
    Assignee,
    /// Reporter login.
    Reporter,
    /// Creation time.
    Created,
    /// Last update time.
    Updated,
    /// Close time.
    Resolved,
    /// ZenHub estimate.
    Estimate,
}

impl Column {
    /// Header cell text as Jira's importer expects it.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Key => "Key",
            Self::Summary => "Summary",
            Self::Type => "Type",
            Self::Status => "Status",
            Self::Resolution => "Resolution",
            Self::FixVersions => "Fix Version(s)",
            Self::Description => "Description",
            Self::Assignee => "Assignee",
            Self::Reporter => "Reporter",
            Self::Created => "Created",
            Self::Updated => "Updated",
            Self::Resolved => "Resolved",
            Self::Estimate => "Estimate",
        }
    }
}

/// Derived cell values for every fixed column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFields {
    /// Issue number.
    pub key: u64,
    /// Trimmed title.
    pub summary: String,
    /// Issue type.
    pub issue_type: String,
    /// Pipeline name.
    pub status: String,
    /// Resolution, empty when none applies.
    pub resolution: String,
    /// Milestone title or empty.
    pub fix_versions: String,
    /// Description cell.
    pub description: String,
    /// Assignee login or empty.
    pub assignee: String,
    /// Reporter login or empty.
    pub reporter: String,
    /// Jira-formatted creation time.
    pub created: String,
    /// Jira-formatted update time.
    pub updated: String,
    /// Jira-formatted close time or empty.
    pub resolved: String,
    /// Estimate cell.
    pub estimate: String,
}

impl IssueFields {
    fn cell(&self, column: Column) -> String {
        match column {
            Column::Key => self.key.to_string(),
            Column::Summary => self.summary.clone(),
            Column::Type => self.issue_type.clone(),
            Column::Status => self.status.clone(),
            Column::Resolution => self.resolution.clone(),
            Column::FixVersions => self.fix_versions.clone(),
            Column::Description => self.description.clone(),
            Column::Assignee => self.assignee.clone(),
            Column::Reporter => self.reporter.clone(),
            Column::Created => self.created.clone(),
            Column::Updated => self.updated.clone(),
            Column::Resolved => self.resolved.clone(),
            Column::Estimate => self.estimate.clone(),
        }
    }
}

/// Column layout shared by the header and every row of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    columns: &'static [Column],
    widths: ColumnWidths,
}

impl RowLayout {
    /// Creates a layout from fixed columns and probed widths.
    #[must_use]
    pub const fn new(columns: &'static [Column], widths: ColumnWidths) -> Self {
        Self { columns, widths }
    }

    /// Probed label and comment widths.
    #[must_use]
    pub const fn widths(&self) -> ColumnWidths {
        self.widths
    }

    /// Total number of cells per row.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.columns.len() + self.widths.labels + self.widths.comments
    }

    /// Header row: fixed columns, then one `Labels` and one `Comment Body`
    /// cell per variable column.
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.header().to_owned())
            .chain(std::iter::repeat_n(LABELS_HEADER.to_owned(), self.widths.labels))
            .chain(std::iter::repeat_n(
                COMMENT_HEADER.to_owned(),
                self.widths.comments,
            ))
            .collect()
    }

    /// Assembles a row, padding labels and comments with empty cells.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::RaggedRow`] when labels or comments overflow
    /// their probed widths.
    pub fn assemble(
        &self,
        fields: &IssueFields,
        labels: Vec<String>,
        comments: Vec<String>,
    ) -> Result<ExportRow, ExportError> {
        let label_overflow = labels.len().saturating_sub(self.widths.labels);
        let comment_overflow = comments.len().saturating_sub(self.widths.comments);
        if label_overflow > 0 || comment_overflow > 0 {
            return Err(ExportError::RaggedRow {
                issue: fields.key,
                expected: self.width(),
                actual: self.width() + label_overflow + comment_overflow,
            });
        }

        let label_padding = self.widths.labels - labels.len();
        let comment_padding = self.widths.comments - comments.len();
        let cells: Vec<String> = self
            .columns
            .iter()
            .map(|column| fields.cell(*column))
            .chain(labels)
            .chain(std::iter::repeat_n(String::new(), label_padding))
            .chain(comments)
            .chain(std::iter::repeat_n(String::new(), comment_padding))
            .collect();

        ExportRow::new(fields.key, cells).checked(self.width())
    }
}

/// One width-checked output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    issue: u64,
    cells: Vec<String>,
}

impl ExportRow {
    /// Wraps raw cells for `issue`.
    #[must_use]
    pub const fn new(issue: u64, cells: Vec<String>) -> Self {
        Self { issue, cells }
    }

    /// Row cells in column order.
    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Returns the row when it has exactly `expected` cells.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::RaggedRow`] on any width mismatch.
    pub fn checked(self, expected: usize) -> Result<Self, ExportError> {
        if self.cells.len() == expected {
            Ok(self)
        } else {
            Err(ExportError::RaggedRow {
                issue: self.issue,
                expected,
                actual: self.cells.len(),
            })
        }
    }
}
