//! Ticketport CLI entrypoint for GitHub issue export.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use ticketport::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink};
use ticketport::{ExportError, ExportSummary, TicketportConfig, export, logging};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ExportError> {
    let config = load_config()?;
    logging::init()?;

    let summary = if config.telemetry {
        export::run(&config, &StderrJsonlTelemetrySink).await?
    } else {
        export::run(&config, &NoopTelemetrySink).await?
    };

    write_summary(&summary)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ExportError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<TicketportConfig, ExportError> {
    TicketportConfig::load().map_err(|error| ExportError::Configuration {
        message: error.to_string(),
    })
}

fn write_summary(summary: &ExportSummary) -> Result<(), ExportError> {
    let mut stdout = io::stdout().lock();
    let message = format!(
        "Exported {} issues from {} pages to {} ({} label columns, {} comment columns)",
        summary.rows,
        summary.pages,
        summary.output,
        summary.widths.labels,
        summary.widths.comments
    );

    writeln!(stdout, "{message}").map_err(|error| ExportError::Io {
        message: error.to_string(),
    })
}
