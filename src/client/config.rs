//! Per-client connection settings

use compact_str::CompactString;

use crate::config::SyncConfig;

/// Base URL and credential for one remote API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL; for Freshdesk this is the `{subdomain}` template
    pub base_url: CompactString,
    /// Access token
    pub token: CompactString,
    /// Value sent as `User-Agent`
    pub user_agent: CompactString,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<CompactString>, token: impl Into<CompactString>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
        }
    }

    pub fn github(config: &SyncConfig) -> Self {
        Self::new(config.github_api_base_url.clone(), config.github_token.clone())
    }

    pub fn freshdesk(config: &SyncConfig) -> Self {
        Self::new(
            config.freshdesk_api_base_url.clone(),
            config.freshdesk_token.clone(),
        )
    }
}
