//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Repository, token and output resolution tests
//! - `loading`: Environment and CLI loading through `load_from_iter`
//! - `validation`: Profile and label sizing parsing tests

mod helpers;
mod loading;
