//! HTTP client for the Freshdesk v2 contacts API
//!
//! Every call authenticates with Basic auth, using the API token as the username and a
//! placeholder password. Operations take the already-resolved subdomain URL, so one client
//! can talk to any tenant.

use compact_str::{CompactString, format_compact};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, instrument};

use super::{
    config::ClientConfig,
    error::{ClientError, Result},
    http::{endpoint, handle_response},
};
use crate::{
    domain::{ContactPayload, FreshdeskContact},
    id::{ContactId, ExternalId},
};

/// Freshdesk ignores the password when authenticating with an API key
const PLACEHOLDER_PASSWORD: &str = "X";

#[derive(Debug)]
pub struct FreshdeskApi {
    client: Client,
    config: ClientConfig,
}

/// Freshdesk API error response format
#[derive(Debug, Deserialize)]
struct FreshdeskApiError {
    description: CompactString,
    #[serde(default)]
    errors: Vec<FreshdeskFieldError>,
}

#[derive(Debug, Deserialize)]
struct FreshdeskFieldError {
    #[serde(default)]
    field: Option<CompactString>,
    message: CompactString,
}

impl FreshdeskApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self { client, config })
    }

    /// Base URL template this client was configured with
    pub fn url_template(&self) -> &str {
        &self.config.base_url
    }

    /// Find the first contact carrying `external_id`.
    ///
    /// Lists every contact on the first page Freshdesk returns and filters locally. Only
    /// contacts carrying an `id` can match, since the caller needs it to address an update.
    /// A failed request is logged and reported the same way as a missing contact.
    pub async fn find_contact_by_external_id(
        &self,
        subdomain_url: &str,
        external_id: &ExternalId,
    ) -> Option<FreshdeskContact> {
        match self.list_contacts(subdomain_url).await {
            Ok(contacts) => contacts
                .into_iter()
                .find(|contact| contact.id.is_some() && contact.has_external_id(external_id)),
            Err(e) => {
                error!(
                    error = %e,
                    external_id = %external_id,
                    "An error occurred while trying to fetch a contact from Freshdesk by ID"
                );
                None
            },
        }
    }

    /// Replace the fields of an existing contact
    pub async fn update_contact(
        &self,
        subdomain_url: &str,
        payload: &ContactPayload,
        contact_id: ContactId,
    ) -> Option<FreshdeskContact> {
        match self.put_contact(subdomain_url, payload, contact_id).await {
            Ok(contact) => Some(contact),
            Err(e) => {
                error!(
                    error = %e,
                    contact_id = %contact_id,
                    "An error occurred while trying to update a contact in Freshdesk"
                );
                None
            },
        }
    }

    pub async fn create_contact(
        &self,
        subdomain_url: &str,
        payload: &ContactPayload,
    ) -> Option<FreshdeskContact> {
        match self.post_contact(subdomain_url, payload).await {
            Ok(contact) => Some(contact),
            Err(e) => {
                error!(
                    error = %e,
                    external_id = payload.unique_external_id,
                    "An error occurred while trying to create a contact in Freshdesk"
                );
                None
            },
        }
    }

    #[instrument(skip(self))]
    pub(crate) async fn list_contacts(&self, subdomain_url: &str) -> Result<Vec<FreshdeskContact>> {
        let url = endpoint(subdomain_url, "contacts")?;
        let response = self.authenticated(self.client.get(url)).send().await?;

        let entries: Vec<Value> = handle_response(response, describe_error).await?;
        let listed = entries.len();

        // One odd entry must not hide the rest of the listing
        let contacts = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<FreshdeskContact>(entry) {
                Ok(contact) => Some(contact),
                Err(e) => {
                    debug!(index, error = %e, "Skipping undecodable Freshdesk contact");
                    None
                },
            })
            .collect::<Vec<_>>();

        debug!(
            contact_count = contacts.len(),
            skipped = listed - contacts.len(),
            "Listed Freshdesk contacts"
        );
        Ok(contacts)
    }

    #[instrument(skip(self, payload))]
    pub(crate) async fn put_contact(
        &self,
        subdomain_url: &str,
        payload: &ContactPayload,
        contact_id: ContactId,
    ) -> Result<FreshdeskContact> {
        let url = endpoint(subdomain_url, &format!("contacts/{contact_id}"))?;
        let response = self
            .authenticated(self.client.put(url))
            .json(payload)
            .send()
            .await?;

        handle_response(response, describe_error).await
    }

    #[instrument(skip(self, payload))]
    pub(crate) async fn post_contact(
        &self,
        subdomain_url: &str,
        payload: &ContactPayload,
    ) -> Result<FreshdeskContact> {
        let url = endpoint(subdomain_url, "contacts")?;
        let response = self
            .authenticated(self.client.post(url))
            .json(payload)
            .send()
            .await?;

        handle_response(response, describe_error).await
    }

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.config.token, Some(PLACEHOLDER_PASSWORD))
    }
}

fn describe_error(body: &str) -> Option<CompactString> {
    let api_error = serde_json::from_str::<FreshdeskApiError>(body).ok()?;

    let details = api_error
        .errors
        .iter()
        .map(|e| match &e.field {
            Some(field) => format!("{}: {}", field, e.message),
            None => e.message.to_string(),
        })
        .collect::<Vec<_>>();

    if details.is_empty() {
        Some(api_error.description)
    } else {
        Some(format_compact!(
            "{} ({})",
            api_error.description,
            details.join("; ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{basic_auth, body_json, method, path},
    };

    use super::*;

    fn api() -> FreshdeskApi {
        FreshdeskApi::new(ClientConfig::new("unused", "fd-token")).unwrap()
    }

    fn payload() -> ContactPayload {
        ContactPayload {
            name: Some("Ada".into()),
            email: Some("ada@x.com".into()),
            twitter_id: Some("ada_t".into()),
            unique_external_id: 42,
        }
    }

    #[tokio::test]
    async fn find_contact_returns_matching_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .and(basic_auth("fd-token", PLACEHOLDER_PASSWORD))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "unique_external_id": "12344" },
                { "id": 2, "unique_external_id": "12345" },
                { "id": 3, "unique_external_id": "12345" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let contact = api()
            .find_contact_by_external_id(&server.uri(), &ExternalId::new("12345"))
            .await
            .unwrap();

        assert_eq!(contact.id, Some(ContactId::new(2)));
    }

    #[tokio::test]
    async fn find_contact_absent_when_no_entry_matches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "unique_external_id": "7" },
                { "id": 2, "unique_external_id": null }
            ])))
            .mount(&server)
            .await;

        let api = api();
        assert!(
            api.find_contact_by_external_id(&server.uri(), &ExternalId::from(42))
                .await
                .is_none()
        );
        // The listing itself succeeded; absence means "no match"
        assert_eq!(api.list_contacts(&server.uri()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn find_contact_skips_entries_with_odd_types() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 8, "unique_external_id": true },
                { "id": "nine", "unique_external_id": 42 },
                { "id": 10, "unique_external_id": 4.2 },
                { "unique_external_id": 42 },
                { "id": 7, "unique_external_id": 42 }
            ])))
            .mount(&server)
            .await;

        let contact = api()
            .find_contact_by_external_id(&server.uri(), &ExternalId::from(42))
            .await
            .unwrap();

        assert_eq!(contact.id, Some(ContactId::new(7)));
    }

    #[tokio::test]
    async fn find_contact_failure_looks_like_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "description": "Internal error",
                "errors": []
            })))
            .mount(&server)
            .await;

        let api = api();
        let failed = api
            .find_contact_by_external_id(&server.uri(), &ExternalId::from(42))
            .await;
        let unreachable = api
            .find_contact_by_external_id("http://127.0.0.1:1", &ExternalId::from(42))
            .await;

        assert_eq!(failed, None);
        assert_eq!(unreachable, None);
        assert!(matches!(
            api.list_contacts(&server.uri()).await,
            Err(ClientError::Api { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn update_contact_puts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/contacts/7"))
            .and(basic_auth("fd-token", PLACEHOLDER_PASSWORD))
            .and(body_json(json!({
                "name": "Ada",
                "email": "ada@x.com",
                "twitter_id": "ada_t",
                "unique_external_id": 42
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "name": "Ada",
                "unique_external_id": "42"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let contact = api()
            .update_contact(&server.uri(), &payload(), ContactId::new(7))
            .await
            .unwrap();

        assert_eq!(contact.id, Some(ContactId::new(7)));
        assert_eq!(contact.name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn mutations_accept_body_without_id() {
        let server = MockServer::start().await;
        let body = json!({
            "name": "Ada",
            "email": "ada@x.com",
            "twitter_id": "ada_t",
            "unique_external_id": 42
        });
        Mock::given(method("PUT"))
            .and(path("/contacts/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/contacts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let api = api();
        let updated = api
            .update_contact(&server.uri(), &payload(), ContactId::new(7))
            .await
            .unwrap();
        let created = api.create_contact(&server.uri(), &payload()).await.unwrap();

        assert_eq!(updated, created);
        assert_eq!(updated.id, None);
        assert_eq!(updated.twitter_id.as_deref(), Some("ada_t"));
        assert!(updated.has_external_id(&ExternalId::from(42)));
    }

    #[tokio::test]
    async fn update_contact_absent_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(
            api()
                .update_contact(&server.uri(), &payload(), ContactId::new(7))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn create_contact_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/contacts"))
            .and(basic_auth("fd-token", PLACEHOLDER_PASSWORD))
            .and(body_json(serde_json::to_value(payload()).unwrap()))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 99,
                "name": "Ada",
                "email": "ada@x.com",
                "twitter_id": "ada_t",
                "unique_external_id": "42"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let contact = api()
            .create_contact(&server.uri(), &payload())
            .await
            .unwrap();

        assert_eq!(contact.id, Some(ContactId::new(99)));
        assert!(contact.has_external_id(&ExternalId::from(42)));
    }

    #[tokio::test]
    async fn create_contact_absent_on_validation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "description": "Validation failed",
                "errors": [{
                    "field": "email",
                    "message": "It should be a unique value",
                    "code": "duplicate_value"
                }]
            })))
            .mount(&server)
            .await;

        let api = api();
        assert!(api.create_contact(&server.uri(), &payload()).await.is_none());
        match api.post_contact(&server.uri(), &payload()).await {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 409);
                assert_eq!(
                    message,
                    "Validation failed (email: It should be a unique value)"
                );
            },
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
