//! HTTP clients for the two remote APIs
//!
//! Public operations never return errors: failures are logged with their
//! distinguished cause and surface to callers as `None`.

pub mod config;
pub mod error;
pub mod freshdesk;
pub mod github;
mod http;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use error::ClientError;
pub use freshdesk::FreshdeskApi;
pub use github::GithubApi;
