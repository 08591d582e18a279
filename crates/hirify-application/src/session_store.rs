//! Process-wide session state.
//!
//! The store follows the identity provider's auth-state notifications and
//! re-reads the profile document on every sign-in. Every other service only
//! reads it.

use hirify_core::{
    error::{HirifyError, Result},
    identity::{AuthState, IdentityProvider},
    session::SessionRecord,
    user::UserRepository,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

pub struct SessionStore {
    identity: Arc<dyn IdentityProvider>,
    users: Arc<dyn UserRepository>,
    record: RwLock<Option<SessionRecord>>,
}

impl SessionStore {
    pub fn new(identity: Arc<dyn IdentityProvider>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            identity,
            users,
            record: RwLock::new(None),
        }
    }

    /// Re-applies the provider's current auth state.
    pub async fn refresh(&self) -> Result<Option<SessionRecord>> {
        let state = self.identity.current();
        self.apply(state).await
    }

    /// Spawns a task applying every auth-state notification until the
    /// provider is dropped.
    pub fn listen(self: Arc<Self>) -> JoinHandle<()> {
        let mut rx = self.identity.subscribe();
        tokio::spawn(async move {
            loop {
                let state = rx.borrow_and_update().clone();
                if let Err(e) = self.apply(state).await {
                    tracing::warn!("[Session] Failed to apply auth state: {}", e);
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    async fn apply(&self, state: AuthState) -> Result<Option<SessionRecord>> {
        let record = match state {
            Some(identity) => {
                let profile = self.users.find_by_key(&identity.uid).await?;
                if profile.is_none() {
                    tracing::debug!("[Session] No profile document for '{}'", identity.uid);
                }
                Some(SessionRecord::new(identity, profile))
            }
            None => None,
        };

        *self.record.write().await = record.clone();
        Ok(record)
    }

    /// Returns the current record, if signed in.
    pub async fn current(&self) -> Option<SessionRecord> {
        self.record.read().await.clone()
    }

    /// Returns the current record or `NotAuthenticated`.
    pub async fn require(&self) -> Result<SessionRecord> {
        self.current().await.ok_or(HirifyError::NotAuthenticated)
    }
}
