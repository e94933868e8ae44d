mod cli;
mod commands;
mod error;
mod telemetry;

use clap::Parser as _;
use discipline_preferences_api::ApiClient;
use discipline_preferences_config::get_config_from;
use tracing::debug;

use crate::cli::Cli;
use crate::error::CliError;
use crate::telemetry::setup_logging;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let mut config = get_config_from(&cli.config)?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    setup_logging(config.log_filter.as_deref());
    debug!(api_url = %config.api_url, session_file = %config.session_file.display(), "configured");

    let client = ApiClient::new(config.api_url)?;
    commands::run(cli.command, client, &config.session_file).await
}
