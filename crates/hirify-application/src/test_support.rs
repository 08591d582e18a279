//! In-memory adapters shared by the service tests.

use async_trait::async_trait;
use hirify_core::{
    error::{HirifyError, Result},
    identity::{AuthState, Identity, IdentityProvider},
    user::{UserDocument, UserProfile, UserRepository},
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Notify, watch};

/// Document store kept in a sorted map.
#[derive(Default)]
pub struct MockUserRepository {
    documents: Mutex<BTreeMap<String, UserProfile>>,
    fail_delete: Option<String>,
    save_gate: Option<Arc<Notify>>,
    pub save_calls: AtomicUsize,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(documents: Vec<(&str, UserProfile)>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.documents.lock().unwrap();
            for (key, profile) in documents {
                map.insert(key.to_string(), profile);
            }
        }
        repo
    }

    pub fn failing_delete(mut self, message: &str) -> Self {
        self.fail_delete = Some(message.to_string());
        self
    }

    /// Holds every save until the gate is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.save_gate = Some(gate);
        self
    }

    pub fn snapshot(&self) -> BTreeMap<String, UserProfile> {
        self.documents.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<UserProfile>> {
        Ok(self.documents.lock().unwrap().get(key).cloned())
    }

    async fn save(&self, key: &str, profile: &UserProfile) -> Result<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.save_gate {
            gate.notified().await;
        }
        self.documents
            .lock()
            .unwrap()
            .insert(key.to_string(), profile.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if let Some(message) = &self.fail_delete {
            return Err(HirifyError::data_access(message.clone()));
        }
        self.documents.lock().unwrap().remove(key);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<UserDocument>> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .map(|(key, profile)| UserDocument::new(key.clone(), profile.clone()))
            .collect())
    }
}

/// Identity provider holding accounts in memory and counting calls.
pub struct MockIdentityProvider {
    accounts: Mutex<Vec<(Identity, String)>>,
    state: watch::Sender<AuthState>,
    fail_delete: Option<String>,
    pub sign_up_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            accounts: Mutex::new(Vec::new()),
            state,
            fail_delete: None,
            sign_up_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    /// Provider already signed in as `identity`.
    pub fn signed_in(identity: Identity) -> Self {
        let provider = Self::new();
        provider
            .accounts
            .lock()
            .unwrap()
            .push((identity.clone(), "secret1".to_string()));
        provider.state.send_replace(Some(identity));
        provider
    }

    pub fn failing_delete(mut self, message: &str) -> Self {
        self.fail_delete = Some(message.to_string());
        self
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|(identity, _)| identity.email == email) {
            return Err(HirifyError::authentication("email-already-in-use"));
        }
        let identity = Identity::new(format!("uid-{}", accounts.len() + 1), email);
        accounts.push((identity.clone(), password.to_string()));
        self.state.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn update_display_name(&self, display_name: &str) -> Result<Identity> {
        let current = self.current().ok_or(HirifyError::NotAuthenticated)?;
        let updated = current.with_display_name(display_name);
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(entry) = accounts.iter_mut().find(|(i, _)| i.uid == updated.uid) {
            entry.0 = updated.clone();
        }
        self.state.send_replace(Some(updated.clone()));
        Ok(updated)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        let identity = self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|(identity, stored)| identity.email == email && stored == password)
            .map(|(identity, _)| identity.clone())
            .ok_or_else(|| HirifyError::authentication("wrong-password"))?;
        self.state.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<()> {
        self.state.send_replace(None);
        Ok(())
    }

    async fn delete_current(&self) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let current = self.current().ok_or(HirifyError::NotAuthenticated)?;
        if let Some(message) = &self.fail_delete {
            return Err(HirifyError::authentication(message.clone()));
        }
        self.accounts
            .lock()
            .unwrap()
            .retain(|(identity, _)| identity.uid != current.uid);
        self.state.send_replace(None);
        Ok(())
    }

    fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}
