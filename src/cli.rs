use std::ffi::OsString;

use clap::Parser;

/// Two-letter short flag accepted for `--subdomain`
const SUBDOMAIN_SHORT: &str = "-sd";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "gh-freshdesk-sync")]
#[command(version)]
#[command(about = "GitHub-Freshdesk Integration")]
#[command(
    long_about = "Fetches a GitHub user profile and creates or updates the matching Freshdesk \
contact, keyed by the GitHub user ID stored as the contact's unique external ID."
)]
#[command(after_long_help = r#"ENVIRONMENT VARIABLES
    GITHUB_TOKEN                    GitHub access token
    FRESHDESK_TOKEN                 Freshdesk API key
    GITHUB_API_BASE_URL             e.g. https://api.github.com
    FRESHDESK_API_BASE_URL          e.g. https://{subdomain}.freshdesk.com/api/v2
    GH_FRESHDESK_SYNC_LOG_FORMAT    "json" for JSON log lines

A .env file in the current directory is read as well.
"#)]
pub struct Args {
    /// GitHub username
    #[arg(short, long)]
    pub username: String,

    /// Freshdesk subdomain (also accepted as -sd)
    #[arg(short, long)]
    pub subdomain: String,
}

impl Args {
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Rewrite `-sd VALUE` and `-sd=VALUE` into their long form, since clap only
/// supports single-character short flags
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some(SUBDOMAIN_SHORT) => OsString::from("--subdomain"),
            Some(s) if s.starts_with("-sd=") => {
                OsString::from(format!("--subdomain={}", &s[SUBDOMAIN_SHORT.len() + 1..]))
            },
            _ => arg,
        })
        .collect()
}
