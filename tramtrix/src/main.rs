use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tramtrix::awtrix::AwtrixClient;
use tramtrix::config::AppConfig;
use tramtrix::ojp::OjpClient;
use tramtrix::poller::{PollSettings, Poller, StartupError, resolve_route};

/// Exit status for configuration problems, before any network activity.
const EXIT_CONFIG: u8 = 2;

/// Exit status for failures while starting up (client setup, stop lookup).
const EXIT_STARTUP: u8 = 1;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ StartupError::Config(_)) => {
            error!(error = %e, "cannot start");
            ExitCode::from(EXIT_CONFIG)
        }
        Err(e) => {
            error!(error = %e, "startup failed");
            ExitCode::from(EXIT_STARTUP)
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;

    let ojp = OjpClient::new(config.ojp_config())?;
    let clock = AwtrixClient::new(config.awtrix_config())?;

    let route = resolve_route(&ojp, &config.origin_stop, &config.destination_stop).await?;
    info!(origin = %route.origin, destination = %route.destination, "stops resolved");

    let poller = Poller::new(ojp, clock, route, PollSettings::from(&config));
    poller.run().await;

    Ok(())
}
