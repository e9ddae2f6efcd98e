//! Response handling shared by both API clients

use compact_str::{CompactString, format_compact};
use reqwest::{Response, Url};
use serde::Deserialize;
use tracing::debug;

use super::error::{ClientError, Result};

/// Extracts a readable message from an API error body
pub type ErrorDescriber = fn(&str) -> Option<CompactString>;

/// Join `path` onto `base`, keeping any path prefix already present in `base`
pub fn endpoint(base: &str, path: &str) -> Result<Url> {
    let raw = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&raw).map_err(|_| ClientError::invalid_url(raw))
}

/// Check the status and deserialize a JSON body
pub async fn handle_response<T>(response: Response, describe: ErrorDescriber) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let url_path = response.url().path().to_string();
    let status = response.status();
    let body = response.text().await?;

    debug!(path = %url_path, status = status.as_u16(), bytes = body.len(), "Received response");

    if status.is_success() {
        serde_json::from_str(&body)
            .map_err(|e| ClientError::json_parse(url_path, "Failed to parse response", e))
    } else {
        Err(error_for_status(status.as_u16(), &url_path, &body, describe))
    }
}

fn error_for_status(status: u16, path: &str, body: &str, describe: ErrorDescriber) -> ClientError {
    match status {
        401 | 403 => ClientError::Authentication,
        404 => ClientError::not_found(path),
        429 => ClientError::RateLimit,
        _ => match describe(body) {
            Some(message) => ClientError::api(status, message),
            None if body.is_empty() => ClientError::api(status, "empty response body"),
            None => ClientError::api(status, format_compact!("{}", body)),
        },
    }
}
