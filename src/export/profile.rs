//! Named export profiles and the settings each one selects.
//!
//! Jira projects import either the full field set with one column per
//! comment (`detailed`) or a reduced field set with comments folded into the
//! description (`compact`). Each profile is a fixed bundle of
//! [`ProfileSettings`]; configuration may only force active-only mode and
//! choose the label sizing strategy on top of it.

use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;

use super::row::Column;

const DETAILED_COLUMNS: &[Column] = &[
    Column::Key,
    Column::Summary,
    Column::Type,
    Column::Status,
    Column::Resolution,
    Column::FixVersions,
    Column::Description,
    Column::Assignee,
    Column::Reporter,
    Column::Created,
    Column::Updated,
    Column::Resolved,
    Column::Estimate,
];

const COMPACT_COLUMNS: &[Column] = &[
    Column::Summary,
    Column::Type,
    Column::Status,
    Column::Description,
    Column::Estimate,
];

/// Named export variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportProfile {
    /// Full field set, one column per comment.
    #[default]
    Detailed,
    /// Reduced field set, comments folded into the description.
    Compact,
}

impl ExportProfile {
    /// Returns the settings bundle for this profile.
    #[must_use]
    pub const fn settings(self) -> ProfileSettings {
        match self {
            Self::Detailed => ProfileSettings {
                columns: DETAILED_COLUMNS,
                issue_type: IssueTypePolicy::EpicFlag,
                comments: CommentPlacement::Columns,
                estimate_default: EstimateDefault::Zero,
                active_only: false,
                import_label: false,
                field_diagnostics: true,
                label_sizing: LabelSizing::Vocabulary,
            },
            Self::Compact => ProfileSettings {
                columns: COMPACT_COLUMNS,
                issue_type: IssueTypePolicy::EpicAndLabels,
                comments: CommentPlacement::Description,
                estimate_default: EstimateDefault::Empty,
                active_only: true,
                import_label: true,
                field_diagnostics: false,
                label_sizing: LabelSizing::Vocabulary,
            },
        }
    }
}

impl FromStr for ExportProfile {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "detailed" => Ok(Self::Detailed),
            "compact" => Ok(Self::Compact),
            _ => Err(ExportError::Configuration {
                message: format!(
                    "unsupported export profile '{s}': valid options are 'detailed' or 'compact'"
                ),
            }),
        }
    }
}

impl fmt::Display for ExportProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detailed => write!(f, "detailed"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

/// How the Jira issue type is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueTypePolicy {
    /// `Epic` when the enrichment flags an epic, otherwise `Task`.
    EpicFlag,
    /// As [`Self::EpicFlag`], with `bug` and `refactor` labels mapping to
    /// `Bug` and `Refactoring`.
    EpicAndLabels,
}

/// Where formatted comments end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPlacement {
    /// One `Comment Body` column per comment.
    Columns,
    /// Appended to the description after a blank line.
    Description,
}

/// Estimate cell value for issues without a ZenHub estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateDefault {
    /// Literal `0`.
    Zero,
    /// Empty cell.
    Empty,
}

impl EstimateDefault {
    /// Returns the cell text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::Empty => "",
        }
    }
}

/// Strategy for sizing the label columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelSizing {
    /// Count of distinct label names across all exported issues.
    #[default]
    Vocabulary,
    /// Largest label count on any single exported issue.
    PerIssue,
}

impl FromStr for LabelSizing {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vocabulary" => Ok(Self::Vocabulary),
            "per-issue" | "per_issue" => Ok(Self::PerIssue),
            _ => Err(ExportError::Configuration {
                message: format!(
                    "unsupported label sizing '{s}': valid options are 'vocabulary' or 'per-issue'"
                ),
            }),
        }
    }
}

impl fmt::Display for LabelSizing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vocabulary => write!(f, "vocabulary"),
            Self::PerIssue => write!(f, "per-issue"),
        }
    }
}

/// Everything the prober and emitter need to know about the output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSettings {
    /// Fixed columns preceding the label and comment columns.
    pub columns: &'static [Column],
    /// Issue type derivation.
    pub issue_type: IssueTypePolicy,
    /// Comment placement.
    pub comments: CommentPlacement,
    /// Estimate fallback.
    pub estimate_default: EstimateDefault,
    /// Skip closed issues.
    pub active_only: bool,
    /// Prepend an `imported_<timestamp>` label to every row.
    pub import_label: bool,
    /// Log every derived field at debug level.
    pub field_diagnostics: bool,
    /// Label column sizing.
    pub label_sizing: LabelSizing,
}

impl ProfileSettings {
    /// Forces active-only export when `active_only` is set; never disables it.
    #[must_use]
    pub const fn with_active_only(mut self, active_only: bool) -> Self {
        self.active_only = self.active_only || active_only;
        self
    }

    /// Overrides the label sizing strategy.
    #[must_use]
    pub const fn with_label_sizing(mut self, label_sizing: LabelSizing) -> Self {
        self.label_sizing = label_sizing;
        self
    }
}

impl Default for ProfileSettings {
    fn default() -> Self {
        ExportProfile::default().settings()
    }
}
