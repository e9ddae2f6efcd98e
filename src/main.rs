mod app_init;
mod cli;
mod client;
mod config;
mod domain;
mod id;
mod logging;
mod result;
mod sync;

use crate::{app_init::AppComponents, cli::Args, config::SyncConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse_normalized();
    app_init::initialize_logging()?;

    let config = SyncConfig::from_env()?;
    let AppComponents { github, sync } = app_init::initialize_app(&config)?;

    // Sync failures are logged by the clients; the process still exits cleanly
    sync::run(&github, &sync, &args.username, &args.subdomain).await;

    Ok(())
}
