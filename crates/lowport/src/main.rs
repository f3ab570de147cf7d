mod cli;
mod error;
mod export;
mod output;
mod report;

use std::io::IsTerminal;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use lowport_core::{DashboardClient, TransportConfig};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout carries the report; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut settings = lowport_config::load(Some(&cli.env_file))?;
    if let Some(threshold) = cli.threshold {
        settings.usage_threshold_kb = threshold;
    }
    debug!(
        org_id = %settings.org_id,
        base_url = %settings.base_url,
        threshold_kb = settings.usage_threshold_kb,
        "settings loaded"
    );

    let mut transport = TransportConfig::default();
    if let Some(secs) = cli.timeout {
        transport = transport.with_timeout(Duration::from_secs(secs));
    }

    let org_id = settings.org_id.as_str();
    let client = DashboardClient::from_api_key(&settings.base_url, &settings.api_key, &transport)
        .map_err(|e| CliError::api(e, &settings.base_url, org_id))?;

    let color = output::should_color(&cli.color);

    let switches = client
        .list_switches(org_id)
        .await
        .map_err(|e| CliError::api(e, client.base_url(), org_id))?;
    if switches.is_empty() {
        output::print_failure("No switches found or failed to retrieve switches.", color);
        return Ok(());
    }
    info!(count = switches.len(), "switches found");

    if !cli.quiet {
        report::print_report(&client, &switches, org_id, color).await?;
    }

    let rows = export::export_low_usage(
        &client,
        &switches,
        org_id,
        settings.usage_threshold_kb,
        &cli.output_file,
    )
    .await?;
    info!(rows, "low-usage ports exported");

    output::print_success(
        &format!(
            "Low usage ports have been exported to '{}'.",
            cli.output_file.display()
        ),
        color,
        cli.quiet,
    );
    Ok(())
}
