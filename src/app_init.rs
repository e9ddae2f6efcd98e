use crate::{
    client::{ClientConfig, FreshdeskApi, GithubApi},
    config::SyncConfig,
    logging::{LoggingConfig, init_logging},
    result::Result,
    sync::ContactSync,
};

pub struct AppComponents {
    pub github: GithubApi,
    pub sync: ContactSync,
}

pub fn initialize_app(config: &SyncConfig) -> Result<AppComponents> {
    let github = GithubApi::new(ClientConfig::github(config))?;
    let freshdesk = FreshdeskApi::new(ClientConfig::freshdesk(config))?;

    Ok(AppComponents {
        github,
        sync: ContactSync::new(freshdesk),
    })
}

pub fn initialize_logging() -> Result<()> {
    init_logging(LoggingConfig::from_env())?;
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "gh-freshdesk-sync starting up");
    Ok(())
}
