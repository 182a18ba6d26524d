//! Enrichment records returned by ZenHub.

use std::fmt;

use serde::Deserialize;

use crate::error::ExportError;

/// Pipeline, epic and estimate metadata for one issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    /// Epic flag, absent when ZenHub omits it.
    pub is_epic: Option<bool>,
    /// Name of the pipeline (workflow stage) holding the issue.
    pub pipeline: String,
    /// Estimate value, absent for unestimated issues.
    pub estimate: Option<Estimate>,
}

impl Enrichment {
    /// Returns true only when ZenHub explicitly flags the issue as an epic.
    #[must_use]
    pub fn is_epic(&self) -> bool {
        self.is_epic.unwrap_or(false)
    }
}

/// Numeric estimate rendered exactly as ZenHub sent it (`3`, `0.5`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Estimate(serde_json::Number);

impl Estimate {
    /// Wraps a JSON number.
    #[must_use]
    pub const fn new(value: serde_json::Number) -> Self {
        Self(value)
    }
}

impl From<u64> for Estimate {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiEnrichment {
    pub(crate) is_epic: Option<bool>,
    pub(crate) pipeline: Option<ApiPipeline>,
    pub(crate) estimate: Option<ApiEstimate>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPipeline {
    pub(crate) name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiEstimate {
    pub(crate) value: Option<serde_json::Number>,
}

impl ApiEnrichment {
    /// Converts the wire record, requiring a pipeline name.
    pub(crate) fn into_enrichment(self, issue: u64) -> Result<Enrichment, ExportError> {
        let pipeline = self
            .pipeline
            .and_then(|pipeline| pipeline.name)
            .ok_or_else(|| ExportError::MalformedResponse {
                issue,
                message: "ZenHub response has no pipeline.name".to_owned(),
            })?;

        Ok(Enrichment {
            is_epic: self.is_epic,
            pipeline,
            estimate: self
                .estimate
                .and_then(|estimate| estimate.value)
                .map(Estimate::new),
        })
    }
}
