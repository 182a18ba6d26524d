//! Builders for issue fixtures shared by unit and integration tests.
//!
//! # Examples
//!
//! ```
//! use ticketport::github::test_support::IssueBuilder;
//!
//! let issue = IssueBuilder::new(3).label("bug").comments(2).build();
//! assert_eq!(issue.number, 3);
//! assert!(issue.has_label("bug"));
//! ```

use serde_json::json;

use super::models::{Issue, IssueComment};

/// Fluent builder for [`Issue`] fixtures with export-friendly defaults.
#[derive(Debug, Clone)]
pub struct IssueBuilder {
    issue: Issue,
}

impl IssueBuilder {
    /// Starts an open issue authored by `reporter` with fixed timestamps.
    #[must_use]
    pub fn new(number: u64) -> Self {
        Self {
            issue: Issue {
                number,
                title: format!("Issue {number}"),
                body: Some(format!("Body of issue {number}")),
                state: "open".to_owned(),
                created_at: "2018-11-14T10:39:00Z".to_owned(),
                updated_at: "2018-11-15T15:05:00Z".to_owned(),
                closed_at: None,
                assignee: None,
                reporter: Some("reporter".to_owned()),
                milestone: None,
                labels: Vec::new(),
                comments: 0,
                comments_url: format!("https://api.github.com/repos/o/r/issues/{number}/comments"),
                is_pull_request: false,
            },
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        title.clone_into(&mut self.issue.title);
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: Option<&str>) -> Self {
        self.issue.body = body.map(ToOwned::to_owned);
        self
    }

    /// Appends a label.
    #[must_use]
    pub fn label(mut self, name: &str) -> Self {
        self.issue.labels.push(name.to_owned());
        self
    }

    /// Sets the comment count.
    #[must_use]
    pub const fn comments(mut self, count: u64) -> Self {
        self.issue.comments = count;
        self
    }

    /// Marks the issue closed at the given timestamp.
    #[must_use]
    pub fn closed_at(mut self, timestamp: &str) -> Self {
        "closed".clone_into(&mut self.issue.state);
        self.issue.closed_at = Some(timestamp.to_owned());
        self
    }

    /// Sets the assignee login.
    #[must_use]
    pub fn assignee(mut self, login: &str) -> Self {
        self.issue.assignee = Some(login.to_owned());
        self
    }

    /// Sets the milestone title.
    #[must_use]
    pub fn milestone(mut self, title: &str) -> Self {
        self.issue.milestone = Some(title.to_owned());
        self
    }

    /// Marks the record as a pull request.
    #[must_use]
    pub const fn pull_request(mut self) -> Self {
        self.issue.is_pull_request = true;
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> Issue {
        self.issue
    }
}

/// Creates a comment with the given author and body.
#[must_use]
pub fn comment(author: &str, body: &str) -> IssueComment {
    IssueComment {
        author: Some(author.to_owned()),
        body: Some(body.to_owned()),
    }
}

/// Renders an issue as the JSON object the GitHub issues API returns.
///
/// `comments_url` is taken verbatim so mock servers can route comment fetches.
#[must_use]
pub fn issue_json(issue: &Issue, comments_url: &str) -> serde_json::Value {
    let mut value = json!({
        "number": issue.number,
        "title": issue.title,
        "body": issue.body,
        "state": issue.state,
        "created_at": issue.created_at,
        "updated_at": issue.updated_at,
        "closed_at": issue.closed_at,
        "assignee": issue.assignee.as_ref().map(|login| json!({ "login": login })),
        "user": issue.reporter.as_ref().map(|login| json!({ "login": login })),
        "milestone": issue.milestone.as_ref().map(|title| json!({ "title": title })),
        "labels": issue.labels.iter().map(|name| json!({ "name": name })).collect::<Vec<_>>(),
        "comments": issue.comments,
        "comments_url": comments_url,
    });

    if issue.is_pull_request
        && let Some(object) = value.as_object_mut()
    {
        object.insert(
            "pull_request".to_owned(),
            json!({ "url": format!("https://api.github.com/repos/o/r/pulls/{}", issue.number) }),
        );
    }

    value
}
