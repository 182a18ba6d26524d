//! Mock GitHub and ZenHub endpoints plus the export driver.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use serde_json::json;
use ticketport::github::test_support::{comment, issue_json};
use ticketport::{
    ExportError, ExportProfile, ExportSummary, GitHubCredentials, Issue, IssueExport,
    OctocrabIssueGateway, RepositoryLocator, ZenHubConfig, ZenHubGateway,
};
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::state::ExportState;

const ISSUES_PATH: &str = "/api/v3/repos/owner/repo/issues";
const ZENHUB_REPO_ID: &str = "4242";
const ZENHUB_TOKEN: &str = "zh-token";

fn comments_path(number: u64) -> String {
    format!("{ISSUES_PATH}/{number}/comments")
}

fn link_header(server_uri: &str, page: usize, last: usize, per_page: usize) -> Option<String> {
    (page < last).then(|| {
        format!(
            "<{server_uri}{ISSUES_PATH}?page={next}&per_page={per_page}>; rel=\"next\", \
             <{server_uri}{ISSUES_PATH}?page={last}&per_page={per_page}>; rel=\"last\"",
            next = page + 1,
        )
    })
}

async fn mount_issue_pages(server: &MockServer, issues: &[Issue], per_page: usize) {
    let uri = server.uri();
    let pages: Vec<&[Issue]> = issues.chunks(per_page.max(1)).collect();
    let last = pages.len().max(1);

    for (index, chunk) in pages.iter().enumerate() {
        let page = index + 1;
        let body: Vec<serde_json::Value> = chunk
            .iter()
            .map(|issue| issue_json(issue, &format!("{uri}{}", comments_path(issue.number))))
            .collect();
        let template = ResponseTemplate::new(200).set_body_json(body);
        let response = match link_header(&uri, page, last, per_page) {
            Some(link) => template.insert_header("link", link.as_str()),
            None => template,
        };

        Mock::given(method("GET"))
            .and(path(ISSUES_PATH))
            .and(query_param("page", page.to_string().as_str()))
            .respond_with(response)
            .mount(server)
            .await;
    }

    if issues.is_empty() {
        Mock::given(method("GET"))
            .and(path(ISSUES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(server)
            .await;
    }

    for issue in issues.iter().filter(|issue| issue.comments > 0) {
        let comments: Vec<serde_json::Value> = (1..=issue.comments)
            .map(|index| {
                let record = comment("reviewer", &format!("Comment {index}"));
                json!({ "body": record.body, "user": { "login": record.author } })
            })
            .collect();
        Mock::given(method("GET"))
            .and(path(comments_path(issue.number)))
            .respond_with(ResponseTemplate::new(200).set_body_json(comments))
            .mount(server)
            .await;
    }
}

async fn mount_enrichment(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path_regex(format!(
            r"^/p1/repositories/{ZENHUB_REPO_ID}/issues/\d+$"
        )))
        .and(header("X-Authentication-Token", ZENHUB_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn read_table(path: &Utf8Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .unwrap_or_else(|error| panic!("failed to open export {path}: {error}"));

    reader
        .records()
        .map(|record| {
            record
                .unwrap_or_else(|error| panic!("failed to read export row: {error}"))
                .iter()
                .map(ToOwned::to_owned)
                .collect()
        })
        .collect()
}

/// Mounts the staged fixtures, runs the export and records its outcome.
pub(crate) fn run_export(state: &ExportState, profile: ExportProfile) {
    let runtime = state.runtime();
    let issues = state.issues.get().unwrap_or_default();
    let per_page = state.per_page.get().unwrap_or(100);
    let enrichment = state
        .enrichment
        .get()
        .unwrap_or_else(|| json!({ "is_epic": false, "pipeline": { "name": "Backlog" } }));

    let workspace = tempfile::TempDir::new()
        .unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"));
    let output = Utf8PathBuf::from_path_buf(workspace.path().join("export.csv"))
        .unwrap_or_else(|path| panic!("non UTF-8 temporary path: {}", path.display()));

    let result = state
        .server
        .with_ref(|server| {
            runtime.block_on(async {
                mount_issue_pages(server, &issues, per_page).await;
                mount_enrichment(server, enrichment).await;
                export_against(server, profile, &output).await
            })
        })
        .unwrap_or_else(|| panic!("mock server not initialised"));

    match result {
        Ok(summary) => {
            state.table.set(read_table(&output));
            state.summary.set(summary);
        }
        Err(error) => state.error.set(error),
    }
}

async fn export_against(
    server: &MockServer,
    profile: ExportProfile,
    output: &Utf8Path,
) -> Result<ExportSummary, ExportError> {
    let api_base = format!("{}/api/v3", server.uri());
    let locator = RepositoryLocator::with_api_base("owner/repo", &api_base)?;
    let credentials = GitHubCredentials::new("octocat", "secret")?;
    let issues = OctocrabIssueGateway::for_credentials(&credentials, &locator)?;
    let zenhub = ZenHubConfig::new(ZENHUB_REPO_ID, ZENHUB_TOKEN).with_base_url(server.uri());
    let enrichment = ZenHubGateway::new(zenhub)?;
    let started = NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|date| date.and_hms_opt(3, 4, 0))
        .unwrap_or_else(|| panic!("valid start time"));

    IssueExport::new(&issues, &enrichment, profile.settings())
        .with_start_time(started)
        .export_to_path(&locator, output)
        .await
}

/// Counts requests the mock server received for the issue listing.
pub(crate) fn issue_listing_requests(state: &ExportState) -> usize {
    let runtime = state.runtime();

    state
        .server
        .with_ref(|server| runtime.block_on(server.received_requests()))
        .flatten()
        .unwrap_or_else(|| panic!("request recording disabled"))
        .iter()
        .filter(|request| request.url.path() == ISSUES_PATH)
        .count()
}
