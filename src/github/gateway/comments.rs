//! Comment fetching for issue gateways.

use octocrab::{Octocrab, Page};

use crate::error::ExportError;
use crate::github::models::{ApiComment, IssueComment};

use super::error_mapping::map_octocrab_error;

/// Fetches every comment page behind an issue's `comments_url`.
pub(super) async fn fetch_issue_comments(
    client: &Octocrab,
    comments_url: &str,
) -> Result<Vec<IssueComment>, ExportError> {
    let page = client
        .get::<Page<ApiComment>, _, _>(comments_url, None::<&()>)
        .await
        .map_err(|error| map_octocrab_error("issue comments", &error))?;

    client
        .all_pages(page)
        .await
        .map(|comments| comments.into_iter().map(ApiComment::into).collect())
        .map_err(|error| map_octocrab_error("issue comments", &error))
}
