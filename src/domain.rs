use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::{ContactId, ExternalId};

/// GitHub user profile as returned by `GET /users/{username}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GithubUser {
    pub id: u64,
    #[serde(default)]
    pub login: CompactString,
    pub name: Option<String>,
    pub email: Option<String>,
    pub twitter_username: Option<String>,
    /// Remaining profile fields, kept untouched
    #[serde(flatten)]
    #[allow(dead_code)]
    pub other: Map<String, Value>,
}

/// Freshdesk contact as returned by the contacts endpoints
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FreshdeskContact {
    /// Absent in some create/update responses; the listing always carries it
    #[serde(default)]
    pub id: Option<ContactId>,
    #[serde(default)]
    pub unique_external_id: Option<ExternalId>,
    #[serde(default)]
    #[allow(dead_code)]
    pub name: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub email: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub twitter_id: Option<String>,
    #[serde(flatten)]
    #[allow(dead_code)]
    pub other: Map<String, Value>,
}

/// Body sent to Freshdesk when creating or updating a contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub twitter_id: Option<String>,
    pub unique_external_id: u64,
}

impl ContactPayload {
    pub fn external_id(&self) -> ExternalId {
        ExternalId::from(self.unique_external_id)
    }
}

impl From<&GithubUser> for ContactPayload {
    fn from(user: &GithubUser) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            twitter_id: user.twitter_username.clone(),
            unique_external_id: user.id,
        }
    }
}

impl FreshdeskContact {
    /// Compares string forms, so an ID stored as `"42"` matches the numeric GitHub ID `42`
    pub fn has_external_id(&self, external_id: &ExternalId) -> bool {
        self.unique_external_id.as_ref() == Some(external_id)
    }
}
