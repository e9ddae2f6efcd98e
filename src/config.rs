//! Environment-derived configuration, loaded once at startup

use compact_str::CompactString;

use crate::result::{Result, SyncError};

pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const FRESHDESK_TOKEN: &str = "FRESHDESK_TOKEN";
pub const GITHUB_API_BASE_URL: &str = "GITHUB_API_BASE_URL";
pub const FRESHDESK_API_BASE_URL: &str = "FRESHDESK_API_BASE_URL";

/// Placeholder replaced by the tenant name in the Freshdesk URL template
pub const SUBDOMAIN_PLACEHOLDER: &str = "{subdomain}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub github_token: CompactString,
    pub freshdesk_token: CompactString,
    pub github_api_base_url: CompactString,
    /// URL template containing `{subdomain}`
    pub freshdesk_api_base_url: CompactString,
}

impl SyncConfig {
    /// Load from the process environment, after pulling in a `.env` file if one exists
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine; real environment variables win over it
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |name: &'static str| -> Result<CompactString> {
            lookup(name)
                .map(CompactString::from)
                .ok_or_else(|| SyncError::missing_env_var(name))
        };

        let config = Self {
            github_token: require(GITHUB_TOKEN)?,
            freshdesk_token: require(FRESHDESK_TOKEN)?,
            github_api_base_url: trim_url(require(GITHUB_API_BASE_URL)?),
            freshdesk_api_base_url: trim_url(require(FRESHDESK_API_BASE_URL)?),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.github_token.trim().is_empty() {
            return Err(SyncError::config_validation_error(
                GITHUB_TOKEN,
                "Token cannot be empty",
            ));
        }

        if self.freshdesk_token.trim().is_empty() {
            return Err(SyncError::config_validation_error(
                FRESHDESK_TOKEN,
                "Token cannot be empty",
            ));
        }

        validate_url(GITHUB_API_BASE_URL, &self.github_api_base_url)?;

        if !self.freshdesk_api_base_url.contains(SUBDOMAIN_PLACEHOLDER) {
            return Err(SyncError::config_validation_error(
                FRESHDESK_API_BASE_URL,
                "URL template must contain {subdomain}",
            ));
        }

        validate_url(FRESHDESK_API_BASE_URL, &self.freshdesk_url("example"))
    }

    /// Resolve the Freshdesk API base URL for one tenant
    pub fn freshdesk_url(&self, subdomain: &str) -> String {
        resolve_subdomain(&self.freshdesk_api_base_url, subdomain)
    }
}

pub fn resolve_subdomain(template: &str, subdomain: &str) -> String {
    template.replace(SUBDOMAIN_PLACEHOLDER, subdomain)
}

fn trim_url(url: CompactString) -> CompactString {
    url.trim().trim_end_matches('/').into()
}

fn validate_url(field: &'static str, url: &str) -> Result<()> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(SyncError::config_validation_error(
            field,
            "URL must start with http:// or https://",
        ));
    }

    if url::Url::parse(url).is_err() {
        return Err(SyncError::config_validation_error(
            field,
            "URL is not a valid URL format",
        ));
    }

    Ok(())
}
