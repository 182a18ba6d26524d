//! Scenario state for the issue export BDD tests.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use ticketport::{ExportError, ExportSummary, Issue};
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Tokio runtime shared between the steps of one scenario.
#[derive(Clone)]
pub(crate) struct ScenarioRuntime(Rc<RefCell<Runtime>>);

impl ScenarioRuntime {
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

#[derive(ScenarioState, Default)]
pub(crate) struct ExportState {
    pub(crate) runtime: Slot<ScenarioRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) issues: Slot<Vec<Issue>>,
    pub(crate) per_page: Slot<usize>,
    pub(crate) enrichment: Slot<serde_json::Value>,
    pub(crate) summary: Slot<ExportSummary>,
    pub(crate) error: Slot<ExportError>,
    pub(crate) table: Slot<Vec<Vec<String>>>,
}

impl ExportState {
    /// Appends issue fixtures, numbering them after the ones already staged.
    pub(crate) fn stage_issues(&self, build: impl Fn(u64) -> Issue, count: u64) {
        let mut issues = self.issues.take().unwrap_or_default();
        let first = issues.len() as u64 + 1;
        issues.extend((first..first + count).map(build));
        self.issues.set(issues);
    }

    /// Starts the runtime and the mock server serving both APIs on first use.
    pub(crate) fn runtime(&self) -> ScenarioRuntime {
        if self.runtime.with_ref(|_| ()).is_none() {
            let runtime = Runtime::new()
                .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
            self.runtime
                .set(ScenarioRuntime(Rc::new(RefCell::new(runtime))));
        }

        let runtime = self
            .runtime
            .get()
            .unwrap_or_else(|| panic!("runtime not initialised after set"));

        if self.server.with_ref(|_| ()).is_none() {
            self.server.set(runtime.block_on(MockServer::start()));
        }

        runtime
    }
}
