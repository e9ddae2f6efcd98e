//! HTTP client for the GitHub REST API

use compact_str::CompactString;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument};

use super::{
    config::ClientConfig,
    error::{ClientError, Result},
    http::{endpoint, handle_response},
};
use crate::domain::GithubUser;

const ACCEPT_V3: &str = "application/vnd.github.v3+json";

#[derive(Debug)]
pub struct GithubApi {
    client: Client,
    config: ClientConfig,
}

/// GitHub API error response format
#[derive(Debug, Deserialize)]
struct GithubApiError {
    message: CompactString,
}

impl GithubApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self { client, config })
    }

    /// Fetch a user profile, logging and discarding any failure
    pub async fn fetch_user(&self, username: &str) -> Option<GithubUser> {
        match self.get_user(username).await {
            Ok(user) => Some(user),
            Err(e) => {
                error!(
                    error = %e,
                    username,
                    "An error occurred while trying to fetch information about a GitHub user"
                );
                None
            },
        }
    }

    #[instrument(skip(self))]
    pub(crate) async fn get_user(&self, username: &str) -> Result<GithubUser> {
        let url = endpoint(&self.config.base_url, &format!("users/{username}"))?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.token)
            .header("Accept", ACCEPT_V3)
            .send()
            .await?;

        let user: GithubUser = handle_response(response, describe_error).await?;
        debug!(id = user.id, login = %user.login, "Fetched GitHub user");
        Ok(user)
    }
}

fn describe_error(body: &str) -> Option<CompactString> {
    serde_json::from_str::<GithubApiError>(body)
        .ok()
        .map(|e| e.message)
}
