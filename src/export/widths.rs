//! Column-width probing over the fetched issue pages.
//!
//! CSV rows have a fixed width, so the number of label and comment columns
//! must be known before the first row is written. Both counts skip pull
//! requests, which are never exported.

use std::collections::HashSet;

use crate::github::{Issue, IssuePage};

use super::profile::{CommentPlacement, LabelSizing, ProfileSettings};

/// Iterates every non-pull-request issue across all pages, in page order.
pub fn eligible_issues(pages: &[IssuePage]) -> impl Iterator<Item = &Issue> {
    pages
        .iter()
        .flatten()
        .filter(|issue| !issue.is_pull_request)
}

/// Largest comment count on any eligible issue; 0 when no issue has comments.
#[must_use]
pub fn max_comments(pages: &[IssuePage]) -> usize {
    eligible_issues(pages)
        .filter(|issue| issue.comments > 0)
        .map(|issue| usize::try_from(issue.comments).unwrap_or(usize::MAX))
        .max()
        .unwrap_or(0)
}

/// Number of label columns required by the given sizing strategy.
#[must_use]
pub fn label_count(pages: &[IssuePage], sizing: LabelSizing) -> usize {
    match sizing {
        LabelSizing::Vocabulary => {
            let mut seen = HashSet::new();
            eligible_issues(pages)
                .flat_map(|issue| issue.labels.iter())
                .filter(|name| seen.insert(name.as_str()))
                .count()
        }
        LabelSizing::PerIssue => eligible_issues(pages)
            .map(|issue| issue.labels.len())
            .max()
            .unwrap_or(0),
    }
}

/// Label and comment column counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnWidths {
    /// Label columns, including the synthetic import label when enabled.
    pub labels: usize,
    /// Comment columns; 0 when comments are folded into the description.
    pub comments: usize,
}

impl ColumnWidths {
    /// Scans all pages once and sizes the variable columns for `settings`.
    #[must_use]
    pub fn probe(pages: &[IssuePage], settings: &ProfileSettings) -> Self {
        let labels = label_count(pages, settings.label_sizing) + usize::from(settings.import_label);
        let comments = match settings.comments {
            CommentPlacement::Columns => max_comments(pages),
            CommentPlacement::Description => 0,
        };
        Self { labels, comments }
    }
}
