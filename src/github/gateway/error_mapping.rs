//! Error mapping helpers for the Octocrab GitHub gateway implementations.

use http::StatusCode;

use crate::error::ExportError;

use super::GITHUB;

/// Checks if a GitHub error status indicates an authentication failure.
pub(crate) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> ExportError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_http_error(
            GITHUB,
            operation,
            source.status_code,
            Some(source.message.clone()),
        );
    }

    if is_network_error(error) {
        return ExportError::Network {
            service: GITHUB,
            message: format!("{operation} failed: {error}"),
        };
    }

    ExportError::Api {
        service: GITHUB,
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps a non-success HTTP status from any upstream service.
pub(crate) fn map_http_error(
    service: &'static str,
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> ExportError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());
    if is_auth_failure(status) {
        ExportError::Authentication {
            service,
            message: format!("{operation} failed: {service} returned {status} {message}"),
        }
    } else {
        ExportError::Api {
            service,
            message: format!("{operation} failed with status {status}: {message}"),
        }
    }
}

/// Pulls the `message` field out of a JSON error body.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;

    use super::{extract_error_message, map_http_error};
    use crate::error::ExportError;

    #[rstest]
    #[case(StatusCode::UNAUTHORIZED)]
    #[case(StatusCode::FORBIDDEN)]
    fn auth_statuses_map_to_authentication(#[case] status: StatusCode) {
        let error = map_http_error("GitHub", "list issues", status, Some("Bad credentials".into()));

        assert!(
            matches!(error, ExportError::Authentication { ref message, .. } if message.contains("Bad credentials")),
            "expected Authentication, got {error:?}"
        );
    }

    #[rstest]
    fn other_statuses_map_to_api() {
        let error = map_http_error("ZenHub", "issue enrichment", StatusCode::NOT_FOUND, None);

        assert_eq!(
            error,
            ExportError::Api {
                service: "ZenHub",
                message: "issue enrichment failed with status 404 Not Found: unknown error"
                    .to_owned(),
            }
        );
    }

    #[rstest]
    #[case(r#"{"message":"Not Found"}"#, Some("Not Found"))]
    #[case(r#"{"error":"nope"}"#, None)]
    #[case("<html>", None)]
    fn extracts_message_field(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_error_message(body).as_deref(), expected);
    }
}
