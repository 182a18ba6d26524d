//! Data models representing repository issues and their comments.

use serde::Deserialize;

/// Issue record as consumed by the export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issue {
    /// Issue number within the repository.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Markdown body, absent when the issue has no description.
    pub body: Option<String>,
    /// `open` or `closed`.
    pub state: String,
    /// Creation timestamp (`YYYY-MM-DDTHH:MM:SSZ`).
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Closing timestamp, absent while the issue is unresolved.
    pub closed_at: Option<String>,
    /// Assignee login if the issue is assigned.
    pub assignee: Option<String>,
    /// Login of the user who opened the issue.
    pub reporter: Option<String>,
    /// Milestone title if the issue is scheduled.
    pub milestone: Option<String>,
    /// Label names in the order GitHub returns them.
    pub labels: Vec<String>,
    /// Number of comments on the issue.
    pub comments: u64,
    /// API URL listing the issue's comments.
    pub comments_url: String,
    /// Whether the record is a pull request sharing the issue numbering.
    pub is_pull_request: bool,
}

impl Issue {
    /// Returns true when GitHub reports the issue as closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.eq_ignore_ascii_case("closed")
    }

    /// Returns true when the issue carries a label with this exact name.
    #[must_use]
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label == name)
    }
}

/// Issue comment details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueComment {
    /// Author login.
    pub author: Option<String>,
    /// Comment body.
    pub body: Option<String>,
}

/// One page of issues as returned by the listing endpoint.
pub type IssuePage = Vec<Issue>;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiIssue {
    pub(crate) number: u64,
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
    pub(crate) closed_at: Option<String>,
    pub(crate) assignee: Option<ApiUser>,
    pub(crate) user: Option<ApiUser>,
    pub(crate) milestone: Option<ApiMilestone>,
    #[serde(default)]
    pub(crate) labels: Vec<Option<ApiLabel>>,
    #[serde(default)]
    pub(crate) comments: u64,
    #[serde(default)]
    pub(crate) comments_url: String,
    pub(crate) pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiLabel {
    pub(crate) name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiMilestone {
    pub(crate) title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiComment {
    pub(crate) body: Option<String>,
    pub(crate) user: Option<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) login: Option<String>,
}

impl From<ApiIssue> for Issue {
    fn from(value: ApiIssue) -> Self {
        Self {
            number: value.number,
            title: value.title.unwrap_or_default(),
            body: value.body,
            state: value.state.unwrap_or_default(),
            created_at: value.created_at,
            updated_at: value.updated_at,
            closed_at: value.closed_at,
            assignee: value.assignee.and_then(|user| user.login),
            reporter: value.user.and_then(|user| user.login),
            milestone: value.milestone.and_then(|milestone| milestone.title),
            labels: value
                .labels
                .into_iter()
                .flatten()
                .map(|label| label.name)
                .collect(),
            comments: value.comments,
            comments_url: value.comments_url,
            is_pull_request: value.pull_request.is_some(),
        }
    }
}

impl From<ApiComment> for IssueComment {
    fn from(value: ApiComment) -> Self {
        Self {
            author: value.user.and_then(|user| user.login),
            body: value.body,
        }
    }
}
