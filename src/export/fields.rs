//! Pure field derivations for one output row.

use chrono::NaiveDateTime;

use crate::error::ExportError;
use crate::github::{Issue, IssueComment};
use crate::zenhub::Enrichment;

use super::profile::{CommentPlacement, EstimateDefault, IssueTypePolicy};

const GITHUB_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%SZ";
/// Jira's default `dd/MMM/yy h:mm a` import format.
const JIRA_TIMESTAMP: &str = "%d/%b/%y %-I:%M %p";
const IMPORT_LABEL_STAMP: &str = "%Y%m%d%H%M";
const CLOSED_PIPELINE: &str = "Closed";

/// Derives the Jira issue type.
#[must_use]
pub fn issue_type(policy: IssueTypePolicy, enrichment: &Enrichment, issue: &Issue) -> &'static str {
    if enrichment.is_epic() {
        return "Epic";
    }
    match policy {
        IssueTypePolicy::EpicFlag => "Task",
        IssueTypePolicy::EpicAndLabels if issue.has_label("bug") => "Bug",
        IssueTypePolicy::EpicAndLabels if issue.has_label("refactor") => "Refactoring",
        IssueTypePolicy::EpicAndLabels => "Task",
    }
}

/// Derives the resolution from labels, overridden by a `Closed` pipeline.
///
/// The last matching label wins.
#[must_use]
pub fn resolution(labels: &[String], status: &str) -> Option<&'static str> {
    if status == CLOSED_PIPELINE {
        return Some("Done");
    }
    labels.iter().rev().find_map(|label| match label.as_str() {
        "wontfix" => Some("won't do"),
        "duplicate" => Some("duplicate"),
        "bug" => Some("bug"),
        _ => None,
    })
}

/// Returns the estimate cell: the ZenHub value or the profile fallback.
#[must_use]
pub fn estimate(enrichment: &Enrichment, fallback: EstimateDefault) -> String {
    enrichment
        .estimate
        .as_ref()
        .map_or_else(|| fallback.as_str().to_owned(), ToString::to_string)
}

/// Converts `2018-11-14T10:39:00Z` into `14/Nov/18 10:39 AM`.
///
/// # Errors
///
/// Returns [`ExportError::InvalidTimestamp`] when `value` is not in the
/// GitHub `YYYY-MM-DDTHH:MM:SSZ` form.
pub fn format_jira_timestamp(value: &str) -> Result<String, ExportError> {
    let parsed = NaiveDateTime::parse_from_str(value, GITHUB_TIMESTAMP).map_err(|error| {
        ExportError::InvalidTimestamp {
            value: value.to_owned(),
            message: error.to_string(),
        }
    })?;
    Ok(parsed.format(JIRA_TIMESTAMP).to_string())
}

/// Like [`format_jira_timestamp`], mapping an absent timestamp to an empty
/// cell.
///
/// # Errors
///
/// Returns [`ExportError::InvalidTimestamp`] for an unparsable value.
pub fn format_optional_timestamp(value: Option<&str>) -> Result<String, ExportError> {
    value.map_or_else(|| Ok(String::new()), format_jira_timestamp)
}

/// Formats one comment for the given placement.
#[must_use]
pub fn format_comment(comment: &IssueComment, placement: CommentPlacement) -> String {
    let author = comment.author.as_deref().unwrap_or_default();
    let body = comment.body.as_deref().unwrap_or_default();
    match placement {
        CommentPlacement::Columns => format!("Username: {author} Content: {body};"),
        CommentPlacement::Description => format!("Username: {author}\n{body};"),
    }
}

/// Removes `#`, `##` and `###` heading markers from the start of each line.
///
/// A marker only counts when followed by a space or the end of the line, so
/// issue references such as `#123` survive.
#[must_use]
pub fn strip_heading_markers(body: &str) -> String {
    body.lines()
        .map(strip_line_heading)
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_line_heading(line: &str) -> &str {
    let rest = line.trim_start_matches('#');
    let hashes = line.len() - rest.len();
    if !(1..=3).contains(&hashes) {
        return line;
    }
    if rest.is_empty() {
        rest
    } else {
        rest.strip_prefix(' ').unwrap_or(line)
    }
}

/// Builds the description cell.
///
/// With comments placed in columns this is the trimmed body. Folded
/// comments follow the heading-stripped body after a blank line.
#[must_use]
pub fn description(issue: &Issue, comments: &[String], placement: CommentPlacement) -> String {
    let body = issue.body.as_deref().unwrap_or_default().trim();
    match placement {
        CommentPlacement::Columns => body.to_owned(),
        CommentPlacement::Description => {
            let stripped = strip_heading_markers(body);
            if comments.is_empty() {
                stripped
            } else {
                format!("{stripped}\n\n{}", comments.join("\n"))
            }
        }
    }
}

/// Returns the synthetic `imported_<YYYYMMDDHHMM>` label for a run started
/// at `started`.
#[must_use]
pub fn import_label(started: NaiveDateTime) -> String {
    format!("imported_{}", started.format(IMPORT_LABEL_STAMP))
}
