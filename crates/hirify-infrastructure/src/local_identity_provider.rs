//! Local email/password identity provider.
//!
//! Accounts live next to the profile documents; the current sign-in is kept
//! in `session.toml` so it survives between CLI invocations.

use crate::dto::{Account, create_account_migrator};
use crate::storage::AtomicTomlFile;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use async_trait::async_trait;
use hirify_core::{
    error::{HirifyError, Result},
    identity::{AuthState, Identity, IdentityProvider, MIN_PASSWORD_CHARS},
};
use rand::RngCore;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::watch;
use version_migrate::{
    AppPaths, AsyncDirStorage, DirStorageStrategy, FilenameEncoding, FormatStrategy, PathStrategy,
};

const ENTITY: &str = "account";

/// Identity provider backed by local files.
///
/// Directory structure:
/// ```text
/// base_dir/
/// ├── data/hirify/accounts/
/// │   └── <uid>.toml
/// └── session.toml
/// ```
pub struct LocalIdentityProvider {
    accounts: AsyncDirStorage,
    session: AtomicTomlFile<Identity>,
    state: watch::Sender<AuthState>,
}

impl LocalIdentityProvider {
    /// Opens the provider and restores the persisted sign-in, if its account
    /// still exists.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let session_path = base_dir.join("session.toml");
        Self::with_session_file(base_dir, session_path).await
    }

    /// Opens the provider with an explicit session file location.
    pub async fn with_session_file(base_dir: PathBuf, session_path: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| HirifyError::io(format!("Failed to create base directory: {}", e)))?;

        let paths = AppPaths::new("hirify").data_strategy(PathStrategy::CustomBase(base_dir));
        let strategy = DirStorageStrategy::default()
            .with_format(FormatStrategy::Toml)
            .with_filename_encoding(FilenameEncoding::Direct);
        let migrator = create_account_migrator()?;
        let accounts = AsyncDirStorage::new(paths, "accounts", migrator, strategy)
            .await
            .map_err(|e| HirifyError::io(format!("Failed to create AsyncDirStorage: {}", e)))?;

        let (state, _) = watch::channel(None);
        let provider = Self {
            accounts,
            session: AtomicTomlFile::new(session_path),
            state,
        };
        provider.restore_session().await?;

        Ok(provider)
    }

    async fn restore_session(&self) -> Result<()> {
        let Some(identity) = self.session.load()? else {
            return Ok(());
        };

        match self.load_account(&identity.uid).await? {
            Some(account) => {
                tracing::debug!("[Identity] Restored sign-in for '{}'", account.uid);
                self.state.send_replace(Some(to_identity(&account)));
            }
            None => {
                tracing::warn!(
                    "[Identity] Dropping stale sign-in for '{}': account no longer exists",
                    identity.uid
                );
                self.session.remove()?;
            }
        }
        Ok(())
    }

    async fn load_account(&self, uid: &str) -> Result<Option<Account>> {
        match self.accounts.load::<Account>(ENTITY, uid).await {
            Ok(account) => Ok(Some(account)),
            Err(e) => {
                let err: HirifyError = e.into();
                if err.is_not_found_or_missing() {
                    Ok(None)
                } else {
                    Err(err)
                }
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let needle = normalize_email(email);
        let all = self
            .accounts
            .load_all::<Account>(ENTITY)
            .await
            .map_err(|e| HirifyError::data_access(format!("Failed to load accounts: {}", e)))?;

        Ok(all
            .into_iter()
            .map(|(_uid, account)| account)
            .find(|account| account.email == needle))
    }

    async fn save_account(&self, account: &Account) -> Result<()> {
        self.accounts
            .save(ENTITY, &account.uid, account)
            .await
            .map_err(|e| HirifyError::data_access(format!("Failed to save account: {}", e)))
    }

    fn signed_in(&self) -> Result<Identity> {
        self.state.borrow().clone().ok_or(HirifyError::NotAuthenticated)
    }

    fn set_current(&self, identity: Identity) -> Result<Identity> {
        self.session.save(&identity)?;
        self.state.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    fn clear_current(&self) -> Result<()> {
        self.session.remove()?;
        self.state.send_replace(None);
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity> {
        let email = normalize_email(email);
        validate_email(&email)?;
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(HirifyError::authentication(format!(
                "Password should be at least {} characters",
                MIN_PASSWORD_CHARS
            )));
        }
        if self.find_by_email(&email).await?.is_some() {
            return Err(HirifyError::authentication(
                "The email address is already in use by another account",
            ));
        }

        let account = Account {
            uid: uuid::Uuid::new_v4().simple().to_string(),
            email,
            password_hash: hash_password(password)?,
            display_name: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.save_account(&account).await?;
        tracing::info!("[Identity] Created account '{}'", account.uid);

        self.set_current(to_identity(&account))
    }

    async fn update_display_name(&self, display_name: &str) -> Result<Identity> {
        let current = self.signed_in()?;
        let mut account = self
            .load_account(&current.uid)
            .await?
            .ok_or_else(|| HirifyError::not_found("account", current.uid.clone()))?;

        account.display_name = Some(display_name.to_string());
        self.save_account(&account).await?;

        self.set_current(to_identity(&account))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        let invalid = || HirifyError::authentication("Invalid email or password");

        let account = self.find_by_email(email).await?.ok_or_else(invalid)?;
        if !verify_password(password, &account.password_hash)? {
            return Err(invalid());
        }

        tracing::info!("[Identity] Signed in '{}'", account.uid);
        self.set_current(to_identity(&account))
    }

    async fn sign_out(&self) -> Result<()> {
        if let Some(identity) = self.current() {
            tracing::info!("[Identity] Signed out '{}'", identity.uid);
        }
        self.clear_current()
    }

    async fn delete_current(&self) -> Result<()> {
        let current = self.signed_in()?;
        self.accounts
            .delete(&current.uid)
            .await
            .map_err(|e| HirifyError::data_access(format!("Failed to delete account: {}", e)))?;
        tracing::info!("[Identity] Deleted account '{}'", current.uid);

        self.clear_current()
    }

    fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}

fn to_identity(account: &Account) -> Identity {
    Identity {
        uid: account.uid.clone(),
        email: account.email.clone(),
        display_name: account.display_name.clone(),
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_email(email: &str) -> Result<()> {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if valid {
        Ok(())
    } else {
        Err(HirifyError::authentication("The email address is badly formatted"))
    }
}

fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| HirifyError::internal(format!("Failed to encode salt: {}", e)))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| HirifyError::internal(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| HirifyError::data_access(format!("Corrupt password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
