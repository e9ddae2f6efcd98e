//! Create-or-update orchestration of one GitHub profile into Freshdesk

use tracing::{info, instrument, warn};

use crate::{
    client::{FreshdeskApi, GithubApi},
    config::resolve_subdomain,
    domain::{ContactPayload, FreshdeskContact, GithubUser},
};

/// Which mutation a sync ended with
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Created(FreshdeskContact),
    Updated(FreshdeskContact),
}

/// Maps profiles onto Freshdesk contacts keyed by GitHub user ID
#[derive(Debug)]
pub struct ContactSync {
    freshdesk: FreshdeskApi,
}

impl ContactSync {
    pub fn new(freshdesk: FreshdeskApi) -> Self {
        Self { freshdesk }
    }

    /// Create or update the contact for `profile` in `subdomain`.
    ///
    /// A failed lookup is indistinguishable from a missing contact and falls through to a
    /// create, which can duplicate a contact that already exists.
    #[instrument(skip(self, profile), fields(github_id = profile.id))]
    pub async fn sync_contact(&self, subdomain: &str, profile: &GithubUser) -> Option<SyncOutcome> {
        let subdomain_url = resolve_subdomain(self.freshdesk.url_template(), subdomain);
        let payload = ContactPayload::from(profile);

        let existing = self
            .freshdesk
            .find_contact_by_external_id(&subdomain_url, &payload.external_id())
            .await;

        match existing.and_then(|contact| contact.id) {
            Some(contact_id) => {
                info!(contact_id = %contact_id, "Updating existing Freshdesk contact");
                self.freshdesk
                    .update_contact(&subdomain_url, &payload, contact_id)
                    .await
                    .map(SyncOutcome::Updated)
            },
            None => {
                info!("Creating Freshdesk contact");
                self.freshdesk
                    .create_contact(&subdomain_url, &payload)
                    .await
                    .map(SyncOutcome::Created)
            },
        }
    }
}

/// Fetch `username` from GitHub and sync it into `subdomain`.
///
/// Nothing is sent to Freshdesk when the profile cannot be fetched.
pub async fn run(
    github: &GithubApi,
    sync: &ContactSync,
    username: &str,
    subdomain: &str,
) -> Option<SyncOutcome> {
    let Some(profile) = github.fetch_user(username).await else {
        warn!(username, "No GitHub profile available, skipping Freshdesk sync");
        return None;
    };

    let outcome = sync.sync_contact(subdomain, &profile).await;
    match &outcome {
        Some(SyncOutcome::Created(contact)) => {
            info!(username, subdomain, contact_id = ?contact.id, "Created Freshdesk contact");
        },
        Some(SyncOutcome::Updated(contact)) => {
            info!(username, subdomain, contact_id = ?contact.id, "Updated Freshdesk contact");
        },
        None => warn!(username, subdomain, "Freshdesk contact was not synced"),
    }
    outcome
}
