//! Tests for loading configuration from the environment and CLI flags.

use ortho_config::OrthoConfig;
use rstest::rstest;

use crate::TicketportConfig;

/// Loads configuration with an isolated home directory and the given
/// environment overrides.
fn load_with(env: &[(&str, Option<&str>)], cli_args: &[&str]) -> TicketportConfig {
    let temp_dir = tempfile::TempDir::new().expect("temp dir should be created");
    let home = temp_dir.path().to_string_lossy().to_string();

    let mut vars: Vec<(&str, Option<&str>)> = vec![
        ("HOME", Some(home.as_str())),
        ("XDG_CONFIG_HOME", Some(home.as_str())),
    ];
    for key in ["TICKETPORT_REPO", "TICKETPORT_MAX_RETRIES"] {
        if !env.iter().any(|(name, _)| *name == key) {
            vars.push((key, None));
        }
    }
    vars.extend_from_slice(env);
    let _guard = env_lock::lock_env(vars);

    let mut args: Vec<std::ffi::OsString> = vec![std::ffi::OsString::from("ticketport")];
    args.extend(cli_args.iter().map(std::ffi::OsString::from));

    TicketportConfig::load_from_iter(args).expect("config should load")
}

#[rstest]
fn repo_loads_from_environment_variable() {
    let config = load_with(&[("TICKETPORT_REPO", Some("octocat/hello-world"))], &[]);

    assert_eq!(config.repo.as_deref(), Some("octocat/hello-world"));
}

#[rstest]
fn repo_loads_from_short_cli_flag() {
    let config = load_with(&[], &["-r", "octocat/spoon-knife"]);

    assert_eq!(config.repo.as_deref(), Some("octocat/spoon-knife"));
}

#[rstest]
fn cli_overrides_environment_for_retries() {
    let config = load_with(
        &[("TICKETPORT_MAX_RETRIES", Some("5"))],
        &["--max-retries", "2"],
    );

    assert_eq!(config.max_retries, 2);
}

#[rstest]
fn active_only_flag_sets_boolean() {
    let config = load_with(&[], &["--active-only"]);

    assert!(config.active_only);
}

#[rstest]
fn short_flags_for_active_only_and_api_base_are_distinct() {
    let config = load_with(&[], &["-a", "-b", "https://github.example.com/api/v3"]);

    assert!(config.active_only, "-a should enable active_only");
    assert_eq!(
        config.api_base.as_deref(),
        Some("https://github.example.com/api/v3")
    );
}

#[rstest]
fn retry_backoff_keeps_default_when_unset() {
    let config = load_with(&[], &[]);

    assert_eq!(config.retry_backoff_ms, 500);
}
