//! Pagination state derived from the `link` response header.
//!
//! GitHub advertises further pages through `rel="next"` and `rel="last"`
//! relations. The export keeps requesting pages only while both relations are
//! present, so a missing `next` relation is the sole termination signal.

/// Link relations observed on one page response.
///
/// # Example
///
/// ```
/// use ticketport::github::PageInfo;
///
/// let info = PageInfo::builder()
///     .next(Some("https://api.github.com/repos/o/r/issues?page=2".to_owned()))
///     .last(Some("https://api.github.com/repos/o/r/issues?page=2".to_owned()))
///     .build();
/// assert!(info.should_continue());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    next: Option<String>,
    last: Option<String>,
}

/// Builder for [`PageInfo`].
#[derive(Debug, Clone)]
pub struct PageInfoBuilder {
    info: PageInfo,
}

impl PageInfoBuilder {
    /// Sets the `rel="next"` target.
    #[must_use]
    pub fn next(mut self, next: Option<String>) -> Self {
        self.info.next = next;
        self
    }

    /// Sets the `rel="last"` target.
    #[must_use]
    pub fn last(mut self, last: Option<String>) -> Self {
        self.info.last = last;
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> PageInfo {
        self.info
    }
}

impl PageInfo {
    /// Starts a builder with no relations.
    #[must_use]
    pub const fn builder() -> PageInfoBuilder {
        PageInfoBuilder {
            info: Self {
                next: None,
                last: None,
            },
        }
    }

    /// Returns true if the response advertised a `next` relation.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns true if the response advertised a `last` relation.
    #[must_use]
    pub const fn has_last(&self) -> bool {
        self.last.is_some()
    }

    /// Returns true when another page must be requested.
    ///
    /// GitHub drops `next` and `last` on the final page, so both must be
    /// present to continue.
    #[must_use]
    pub const fn should_continue(&self) -> bool {
        self.has_next() && self.has_last()
    }

    /// Renders the observed relations for diagnostics, mirroring the raw
    /// header layout.
    #[must_use]
    pub fn describe(&self) -> String {
        let relations: Vec<String> = [("next", &self.next), ("last", &self.last)]
            .into_iter()
            .filter_map(|(rel, target)| {
                target
                    .as_deref()
                    .map(|url| format!("<{url}>; rel=\"{rel}\""))
            })
            .collect();

        if relations.is_empty() {
            "no further pages".to_owned()
        } else {
            relations.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::PageInfo;

    const NEXT: &str = "https://api.github.com/repos/o/r/issues?page=2";
    const LAST: &str = "https://api.github.com/repos/o/r/issues?page=3";

    #[rstest]
    #[case::both(Some(NEXT), Some(LAST), true)]
    #[case::next_only(Some(NEXT), None, false)]
    #[case::last_only(None, Some(LAST), false)]
    #[case::neither(None, None, false)]
    fn continues_only_with_next_and_last(
        #[case] next: Option<&str>,
        #[case] last: Option<&str>,
        #[case] expected: bool,
    ) {
        let info = PageInfo::builder()
            .next(next.map(ToOwned::to_owned))
            .last(last.map(ToOwned::to_owned))
            .build();

        assert_eq!(info.should_continue(), expected);
    }

    #[rstest]
    fn describe_lists_relations() {
        let info = PageInfo::builder()
            .next(Some(NEXT.to_owned()))
            .last(Some(LAST.to_owned()))
            .build();

        assert_eq!(
            info.describe(),
            format!("<{NEXT}>; rel=\"next\", <{LAST}>; rel=\"last\"")
        );
    }

    #[rstest]
    fn describe_reports_final_page() {
        let info = PageInfo::builder().build();

        assert_eq!(info.describe(), "no further pages");
    }
}
