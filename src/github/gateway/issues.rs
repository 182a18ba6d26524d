//! Octocrab implementation of the issue gateway.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};

use crate::error::ExportError;
use crate::github::locator::{GitHubCredentials, RepositoryLocator};
use crate::github::models::{ApiIssue, Issue, IssueComment, IssuePage};
use crate::github::pagination::PageInfo;

use super::IssueGateway;
use super::client::build_octocrab_client;
use super::comments::fetch_issue_comments;
use super::error_mapping::map_octocrab_error;

/// Largest page size GitHub accepts.
pub const MAX_PER_PAGE: u8 = 100;

/// The export lists open and closed issues alike.
const ALL_STATES: &str = "all";

/// Parameters for listing issues.
#[derive(Debug, Clone)]
pub struct ListIssuesParams {
    /// Page number to fetch (1-based).
    pub page: u32,
    /// Items per page (max 100).
    pub per_page: u8,
}

impl ListIssuesParams {
    /// Parameters for the given page with the maximum page size.
    #[must_use]
    pub const fn for_page(page: u32) -> Self {
        Self {
            page,
            per_page: MAX_PER_PAGE,
        }
    }
}

impl Default for ListIssuesParams {
    fn default() -> Self {
        Self::for_page(1)
    }
}

/// One page of issues plus the link relations that came with it.
#[derive(Debug, Clone)]
pub struct PaginatedIssues {
    /// Issues (and pull requests) on this page.
    pub items: IssuePage,
    /// Pagination state.
    pub page_info: PageInfo,
}

/// Octocrab-backed issue gateway.
pub struct OctocrabIssueGateway {
    client: Octocrab,
}

impl OctocrabIssueGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds a basic-auth Octocrab client for the locator's API base.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::InvalidUrl` when the base URI cannot be parsed or
    /// `ExportError::Api` when Octocrab fails to construct a client.
    pub fn for_credentials(
        credentials: &GitHubCredentials,
        locator: &RepositoryLocator,
    ) -> Result<Self, ExportError> {
        let octocrab = build_octocrab_client(credentials, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl IssueGateway for OctocrabIssueGateway {
    async fn list_issues(
        &self,
        locator: &RepositoryLocator,
        params: &ListIssuesParams,
    ) -> Result<PaginatedIssues, ExportError> {
        validate_pagination_params(params.page, params.per_page)?;

        let page_str = params.page.to_string();
        let per_page_str = params.per_page.to_string();

        let query_params = [
            ("state", ALL_STATES),
            ("page", page_str.as_str()),
            ("per_page", per_page_str.as_str()),
        ];

        let page_result: Page<ApiIssue> = self
            .client
            .get(locator.issues_path(), Some(&query_params))
            .await
            .map_err(|error| map_octocrab_error("list issues", &error))?;

        // Extract link relations before consuming items.
        let page_info = PageInfo::builder()
            .next(page_result.next.as_ref().map(ToString::to_string))
            .last(page_result.last.as_ref().map(ToString::to_string))
            .build();

        let items: IssuePage = page_result
            .items
            .into_iter()
            .map(ApiIssue::into)
            .collect();

        Ok(PaginatedIssues { items, page_info })
    }

    async fn issue_comments(&self, issue: &Issue) -> Result<Vec<IssueComment>, ExportError> {
        fetch_issue_comments(&self.client, &issue.comments_url).await
    }
}

fn validate_pagination_params(page: u32, per_page: u8) -> Result<(), ExportError> {
    if page == 0 {
        return Err(ExportError::Configuration {
            message: "page must be at least 1".to_owned(),
        });
    }

    if per_page == 0 || per_page > MAX_PER_PAGE {
        return Err(ExportError::Configuration {
            message: format!("per_page must be between 1 and {MAX_PER_PAGE}"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{basic_auth, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{ListIssuesParams, OctocrabIssueGateway};
    use crate::error::ExportError;
    use crate::github::gateway::IssueGateway;
    use crate::github::locator::{GitHubCredentials, RepositoryLocator};
    use crate::github::models::Issue;

    const ISSUES_PATH: &str = "/api/v3/repos/owner/repo/issues";

    fn gateway_for(server: &MockServer) -> (OctocrabIssueGateway, RepositoryLocator) {
        let locator =
            RepositoryLocator::with_api_base("owner/repo", &format!("{}/api/v3", server.uri()))
                .expect("should create repository locator");
        let credentials =
            GitHubCredentials::new("octocat", "secret").expect("credentials should be valid");
        let gateway = OctocrabIssueGateway::for_credentials(&credentials, &locator)
            .expect("should create gateway");
        (gateway, locator)
    }

    fn issue_json(number: u64) -> serde_json::Value {
        json!({
            "number": number,
            "title": format!("Issue {number}"),
            "state": "open",
            "user": { "login": "octocat" },
            "created_at": "2018-11-14T10:39:00Z",
            "updated_at": "2018-11-14T10:39:00Z",
            "labels": [],
            "comments": 0,
            "comments_url": "https://example.invalid/comments"
        })
    }

    #[tokio::test]
    async fn list_issues_reads_link_relations() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_for(&server);
        let next_url = format!(
            "{}{ISSUES_PATH}?state=all&page=2&per_page=100",
            server.uri()
        );
        let link_header = format!("<{next_url}>; rel=\"next\", <{next_url}>; rel=\"last\"");

        Mock::given(method("GET"))
            .and(path(ISSUES_PATH))
            .and(query_param("state", "all"))
            .and(query_param("page", "1"))
            .and(query_param("per_page", "100"))
            .and(basic_auth("octocat", "secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([issue_json(1), issue_json(2)]))
                    .insert_header("Link", link_header),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = gateway
            .list_issues(&locator, &ListIssuesParams::default())
            .await
            .expect("request should succeed");

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items.first().map(|issue| issue.number), Some(1));
        assert!(result.page_info.has_next());
        assert!(result.page_info.has_last());
        assert!(result.page_info.should_continue());
    }

    #[tokio::test]
    async fn list_issues_without_link_header_stops() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_for(&server);

        Mock::given(method("GET"))
            .and(path(ISSUES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([issue_json(1)])))
            .mount(&server)
            .await;

        let result = gateway
            .list_issues(&locator, &ListIssuesParams::default())
            .await
            .expect("request should succeed");

        assert!(!result.page_info.should_continue());
        assert_eq!(result.page_info.describe(), "no further pages");
    }

    #[tokio::test]
    async fn list_issues_maps_unauthorised_to_authentication() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_for(&server);

        Mock::given(method("GET"))
            .and(path(ISSUES_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let error = gateway
            .list_issues(&locator, &ListIssuesParams::default())
            .await
            .expect_err("request should fail");

        assert!(
            matches!(error, ExportError::Authentication { ref message, .. } if message.contains("Bad credentials")),
            "expected Authentication, got {error:?}"
        );
    }

    #[tokio::test]
    async fn list_issues_rejects_invalid_pagination_params() {
        let locator = RepositoryLocator::parse("owner/repo").expect("should parse");
        let credentials = GitHubCredentials::new("", "token").expect("valid");
        let gateway =
            OctocrabIssueGateway::for_credentials(&credentials, &locator).expect("gateway");

        for params in [
            ListIssuesParams {
                page: 0,
                ..ListIssuesParams::default()
            },
            ListIssuesParams {
                per_page: 101,
                ..ListIssuesParams::default()
            },
        ] {
            let error = gateway
                .list_issues(&locator, &params)
                .await
                .expect_err("invalid params should fail");

            assert!(
                matches!(error, ExportError::Configuration { .. }),
                "expected Configuration, got {error:?}"
            );
        }
    }

    #[tokio::test]
    async fn issue_comments_follows_comments_url() {
        let server = MockServer::start().await;
        let (gateway, _) = gateway_for(&server);
        let comments_path = "/api/v3/repos/owner/repo/issues/5/comments";

        Mock::given(method("GET"))
            .and(path(comments_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "body": "first", "user": { "login": "alice" } },
                { "id": 2, "body": "second", "user": { "login": "bob" } }
            ])))
            .mount(&server)
            .await;

        let issue = Issue {
            number: 5,
            comments: 2,
            comments_url: format!("{}{comments_path}", server.uri()),
            ..Issue::default()
        };

        let comments = gateway
            .issue_comments(&issue)
            .await
            .expect("comments should load");

        let authors: Vec<Option<&str>> = comments
            .iter()
            .map(|comment| comment.author.as_deref())
            .collect();
        assert_eq!(authors, vec![Some("alice"), Some("bob")]);
    }
}
