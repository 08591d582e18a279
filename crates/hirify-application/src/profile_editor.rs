//! Profile form controller.
//!
//! Keeps the draft being edited, writes it back as a full replace and runs
//! the account deletion flow.

use hirify_core::{
    address::AddressSuggestion,
    error::{HirifyError, Result},
    identity::{Identity, IdentityProvider},
    navigation::{DEFAULT_REDIRECT_DELAY, Redirect, Route},
    profile::{ProfileDraft, ProfileField, SoughtField},
    user::{Role, SoughtProfile, UserRepository},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::session_store::SessionStore;

pub struct ProfileEditor {
    users: Arc<dyn UserRepository>,
    identity: Arc<dyn IdentityProvider>,
    session: Arc<SessionStore>,
    draft: RwLock<Option<ProfileDraft>>,
    submitting: AtomicBool,
    redirect_delay: Duration,
}

/// Clears the in-progress flag when a submit finishes or is dropped.
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ProfileEditor {
    pub fn new(
        users: Arc<dyn UserRepository>,
        identity: Arc<dyn IdentityProvider>,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            users,
            identity,
            session,
            draft: RwLock::new(None),
            submitting: AtomicBool::new(false),
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Loads the document stored under `key` into the draft.
    ///
    /// Without a stored document the draft keeps the default shape of
    /// `default_role`.
    pub async fn load(&self, key: &str, default_role: Role) -> Result<ProfileDraft> {
        let draft = match self.users.find_by_key(key).await? {
            Some(profile) => ProfileDraft::from_stored(profile),
            None => {
                tracing::debug!("[ProfileEditor] No document for '{}', using defaults", key);
                ProfileDraft::new(default_role)
            }
        };

        *self.draft.write().await = Some(draft.clone());
        Ok(draft)
    }

    /// Loads the signed-in user's document.
    pub async fn load_current(&self) -> Result<ProfileDraft> {
        let record = self.session.require().await?;
        let default_role = record.role().unwrap_or(Role::Student);
        self.load(record.key(), default_role).await
    }

    /// Returns a copy of the draft being edited.
    pub async fn draft(&self) -> Option<ProfileDraft> {
        self.draft.read().await.clone()
    }

    pub async fn update_field(&self, field: ProfileField, value: &str) -> Result<()> {
        self.edit(|draft| {
            draft.update_field(field, value);
            Ok(())
        })
        .await
    }

    pub async fn apply_address(&self, suggestion: &AddressSuggestion) -> Result<()> {
        self.edit(|draft| {
            draft.apply_address(suggestion);
            Ok(())
        })
        .await
    }

    pub async fn add_sought_row(&self) -> Result<usize> {
        self.edit(ProfileDraft::add_sought_row).await
    }

    pub async fn remove_sought_row(&self, index: usize) -> Result<SoughtProfile> {
        self.edit(|draft| draft.remove_sought_row(index)).await
    }

    pub async fn update_sought_row(
        &self,
        index: usize,
        field: SoughtField,
        value: &str,
    ) -> Result<()> {
        self.edit(|draft| draft.update_sought_row(index, field, value))
            .await
    }

    async fn edit<T>(&self, f: impl FnOnce(&mut ProfileDraft) -> Result<T>) -> Result<T> {
        let mut guard = self.draft.write().await;
        let draft = guard
            .as_mut()
            .ok_or_else(|| HirifyError::validation("No profile loaded"))?;
        f(draft)
    }

    /// Writes the draft under the signed-in identity's key.
    ///
    /// The stored document is fully replaced. A second submit while one is
    /// running is rejected.
    pub async fn submit(&self) -> Result<Redirect> {
        if self.submitting.swap(true, Ordering::SeqCst) {
            return Err(HirifyError::validation("A save is already in progress"));
        }
        let _guard = SubmitGuard(&self.submitting);

        let identity = self.signed_in()?;
        let document = {
            let guard = self.draft.read().await;
            let draft = guard
                .as_ref()
                .ok_or_else(|| HirifyError::validation("No profile loaded"))?;
            draft.to_document(&identity)
        };

        self.users.save(&identity.uid, &document).await?;
        tracing::info!("[ProfileEditor] Saved profile '{}'", identity.uid);

        Ok(Redirect::new(Route::Suggest, self.redirect_delay))
    }

    /// Deletes the profile document, then the identity, then clears the
    /// session.
    ///
    /// A failed document delete stops the flow before the identity is
    /// touched.
    pub async fn delete_account(&self) -> Result<()> {
        let identity = self.signed_in()?;

        if let Err(e) = self.users.delete(&identity.uid).await {
            tracing::error!(
                "[ProfileEditor] Failed to delete document '{}': {}",
                identity.uid,
                e
            );
            return Err(e);
        }

        if let Err(e) = self.identity.delete_current().await {
            tracing::error!(
                "[ProfileEditor] Failed to revoke identity '{}' after deleting its document: {}",
                identity.uid,
                e
            );
            return Err(e);
        }

        self.session.refresh().await?;
        *self.draft.write().await = None;

        tracing::info!("[ProfileEditor] Deleted account '{}'", identity.uid);
        Ok(())
    }

    fn signed_in(&self) -> Result<Identity> {
        self.identity.current().ok_or(HirifyError::NotAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockIdentityProvider, MockUserRepository};
    use hirify_core::user::UserProfile;
    use tokio::sync::Notify;

    struct Fixture {
        editor: Arc<ProfileEditor>,
        users: Arc<MockUserRepository>,
        provider: Arc<MockIdentityProvider>,
        session: Arc<SessionStore>,
    }

    async fn fixture(users: MockUserRepository) -> Fixture {
        fixture_with_provider(users, MockIdentityProvider::signed_in(acme_identity())).await
    }

    async fn fixture_with_provider(
        users: MockUserRepository,
        provider: MockIdentityProvider,
    ) -> Fixture {
        let provider = Arc::new(provider);
        let users = Arc::new(users);
        let session = Arc::new(SessionStore::new(provider.clone(), users.clone()));
        session.refresh().await.unwrap();
        let editor = Arc::new(ProfileEditor::new(
            users.clone(),
            provider.clone(),
            session.clone(),
        ));
        Fixture {
            editor,
            users,
            provider,
            session,
        }
    }

    fn acme_identity() -> Identity {
        Identity::new("uid-1", "acme@example.com").with_display_name("Acme")
    }

    fn stored_company() -> UserProfile {
        UserProfile {
            role: Some(Role::Company),
            email: "acme@example.com".to_string(),
            company_name: "Acme".to_string(),
            siret: "12345678900011".to_string(),
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_load_missing_document_uses_defaults() {
        let f = fixture(MockUserRepository::new()).await;
        let draft = f.editor.load("uid-1", Role::Company).await.unwrap();
        assert_eq!(draft.sought_rows(), &[SoughtProfile::default()]);
        assert_eq!(draft.profile().company_name, "");
    }

    #[tokio::test]
    async fn test_edit_requires_loaded_draft() {
        let f = fixture(MockUserRepository::new()).await;
        let err = f
            .editor
            .update_field(ProfileField::City, "Lyon")
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_submit_preserves_unshown_fields() {
        let f = fixture(MockUserRepository::with(vec![("uid-1", stored_company())])).await;
        f.editor.load_current().await.unwrap();
        f.editor
            .update_sought_row(0, SoughtField::Domain, "Web")
            .await
            .unwrap();
        f.editor
            .update_field(ProfileField::Description, "We build things")
            .await
            .unwrap();

        let redirect = f.editor.submit().await.unwrap();
        assert_eq!(redirect.route, Route::Suggest);
        assert_eq!(redirect.delay, DEFAULT_REDIRECT_DELAY);

        let stored = f.users.snapshot().remove("uid-1").unwrap();
        assert_eq!(stored.siret, "12345678900011");
        assert_eq!(stored.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(stored.name, "Acme");
        assert_eq!(stored.alternants, vec![SoughtProfile::new("", "Web")]);
    }

    #[tokio::test]
    async fn test_submit_twice_is_idempotent() {
        let f = fixture(MockUserRepository::with(vec![("uid-1", stored_company())])).await;
        f.editor.load_current().await.unwrap();

        f.editor.submit().await.unwrap();
        let once = f.users.snapshot();
        f.editor.submit().await.unwrap();
        let twice = f.users.snapshot();

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_submit_rejected() {
        let gate = Arc::new(Notify::new());
        let f = fixture(MockUserRepository::new().gated(gate.clone())).await;
        f.editor.load_current().await.unwrap();

        let first = tokio::spawn({
            let editor = f.editor.clone();
            async move { editor.submit().await }
        });
        while f.users.save_calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let err = f.editor.submit().await.unwrap_err();
        assert!(err.is_validation());

        gate.notify_one();
        first.await.unwrap().unwrap();

        // The flag is released once the first submit completes
        gate.notify_one();
        f.editor.submit().await.unwrap();
    }

    #[tokio::test]
    async fn test_submit_signed_out() {
        let f = fixture(MockUserRepository::new()).await;
        f.editor.load("uid-1", Role::Student).await.unwrap();
        f.provider.sign_out().await.unwrap();

        assert!(f.editor.submit().await.unwrap_err().is_not_authenticated());
    }

    #[tokio::test]
    async fn test_delete_account() {
        let f = fixture(MockUserRepository::with(vec![("uid-1", stored_company())])).await;

        f.editor.delete_account().await.unwrap();

        assert!(f.users.snapshot().is_empty());
        assert_eq!(f.provider.delete_calls.load(Ordering::SeqCst), 1);
        assert!(f.session.current().await.is_none());
    }

    #[tokio::test]
    async fn test_failed_document_delete_never_revokes_identity() {
        let users = MockUserRepository::with(vec![("uid-1", stored_company())])
            .failing_delete("permission-denied");
        let f = fixture(users).await;

        let err = f.editor.delete_account().await.unwrap_err();
        assert_eq!(err.to_string(), "Data access error: permission-denied");
        assert_eq!(f.provider.delete_calls.load(Ordering::SeqCst), 0);
        assert!(f.session.current().await.is_some());
        assert!(f.provider.current().is_some());
    }

    #[tokio::test]
    async fn test_failed_identity_revocation_is_reported() {
        let provider =
            MockIdentityProvider::signed_in(acme_identity()).failing_delete("requires-recent-login");
        let users = MockUserRepository::with(vec![("uid-1", stored_company())]);
        let f = fixture_with_provider(users, provider).await;

        let err = f.editor.delete_account().await.unwrap_err();
        assert!(matches!(err, HirifyError::Authentication(_)));
        assert_eq!(f.provider.delete_calls.load(Ordering::SeqCst), 1);

        // The document is already gone; the identity stays signed in
        assert!(f.users.snapshot().is_empty());
        assert!(f.provider.current().is_some());
    }
}
