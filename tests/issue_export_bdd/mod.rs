//! Support modules for the issue export BDD tests.

pub(crate) mod harness;
pub(crate) mod state;

pub(crate) use harness::{issue_listing_requests, run_export};
pub(crate) use state::ExportState;
