mod cli;
mod commands;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scoopadmin_api::{ApiClient, SessionStore};
use scoopadmin_core::{AdminStore, Dispatcher};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

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

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(mut cli: Cli) -> Result<(), CliError> {
    let config = scoopadmin_config::load_config_or_default();
    cli.global.apply_config(&config);

    let dispatcher = build_dispatcher(&cli.global, config)?;

    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &dispatcher, &cli.global).await
}

/// Build the dispatcher from the loaded config plus CLI flag overrides.
fn build_dispatcher(
    global: &cli::GlobalOpts,
    mut config: scoopadmin_config::Config,
) -> Result<Dispatcher, CliError> {
    if let Some(ref api_url) = global.api_url {
        config.api_url.clone_from(api_url);
    }
    if global.insecure {
        config.insecure = true;
    }
    if let Some(timeout) = global.timeout {
        config.timeout = timeout;
    }

    let session = Arc::new(SessionStore::open(config.session_path()));
    let client = ApiClient::new(&config.api_url, &config.transport(), session)?;

    Ok(Dispatcher::new(
        Arc::new(client),
        Arc::new(AdminStore::new()),
    ))
}
