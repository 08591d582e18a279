//! Discovery: the suggestion feed and the browse view.
//!
//! Both views fetch candidates, drop the viewer's own card, fill in display
//! placeholders and hand the rest to the matching engine.

use hirify_core::{
    error::Result,
    matching::{MatchFilters, MatchPolicy, UnknownRolePolicy, Viewer, match_candidates},
    session::SessionRecord,
    user::{UserDocument, UserRepository},
};
use std::sync::Arc;

use crate::session_store::SessionStore;

/// Shown on cards whose description is empty.
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available";

pub struct DiscoveryService {
    users: Arc<dyn UserRepository>,
    session: Arc<SessionStore>,
    unknown_role: UnknownRolePolicy,
}

impl DiscoveryService {
    pub fn new(users: Arc<dyn UserRepository>, session: Arc<SessionStore>) -> Self {
        Self {
            users,
            session,
            unknown_role: UnknownRolePolicy::default(),
        }
    }

    /// Overrides what a viewer without a role sees.
    pub fn with_unknown_role(mut self, unknown_role: UnknownRolePolicy) -> Self {
        self.unknown_role = unknown_role;
        self
    }

    /// Suggestion feed: opposite role with a compatible domain, narrowed by
    /// an optional free-text query.
    pub async fn suggest(&self, query: &str) -> Result<Vec<UserDocument>> {
        let policy = MatchPolicy::suggest().with_unknown_role(self.unknown_role);
        self.discover(MatchFilters::query(query), policy).await
    }

    /// Browse view: opposite role, narrowed by domain and location filters.
    pub async fn browse(&self, domain: &str, location: &str) -> Result<Vec<UserDocument>> {
        let policy = MatchPolicy::browse().with_unknown_role(self.unknown_role);
        self.discover(MatchFilters::browse(domain, location), policy)
            .await
    }

    async fn discover(
        &self,
        filters: MatchFilters,
        policy: MatchPolicy,
    ) -> Result<Vec<UserDocument>> {
        let record = self.session.require().await?;
        let viewer = record
            .profile
            .as_ref()
            .map(Viewer::from)
            .unwrap_or_default();

        let fetched = match viewer.role {
            Some(role) => self.users.list_by_role(role.opposite()).await?,
            None => {
                tracing::debug!(
                    "[Discovery] Viewer '{}' has no role, policy {:?}",
                    record.key(),
                    policy.unknown_role
                );
                self.users.list_all().await?
            }
        };
        let fetched_count = fetched.len();

        let candidates: Vec<UserDocument> = fetched
            .into_iter()
            .filter(|doc| !is_viewer(doc, &record))
            .map(with_placeholders)
            .collect();

        let matched: Vec<UserDocument> = match_candidates(&viewer, &candidates, &filters, policy)
            .into_iter()
            .cloned()
            .collect();

        tracing::info!(
            "[Discovery] {} of {} candidate(s) matched for '{}'",
            matched.len(),
            fetched_count,
            record.key()
        );
        Ok(matched)
    }
}

fn is_viewer(doc: &UserDocument, record: &SessionRecord) -> bool {
    if doc.key == record.key() {
        return true;
    }
    let email = record.identity.email.trim();
    !email.is_empty() && doc.profile.email.trim().eq_ignore_ascii_case(email)
}

fn with_placeholders(mut doc: UserDocument) -> UserDocument {
    if doc.profile.description.trim().is_empty() {
        doc.profile.description = DESCRIPTION_PLACEHOLDER.to_string();
    }
    doc
}
