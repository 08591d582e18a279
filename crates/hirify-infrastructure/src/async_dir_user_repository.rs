//! AsyncDirStorage-based UserRepository implementation

use crate::dto::create_user_profile_migrator;
use async_trait::async_trait;
use hirify_core::{
    error::{HirifyError, Result},
    user::{UserDocument, UserProfile, UserRepository},
};
use std::path::Path;
use tokio::fs;
use version_migrate::{
    AppPaths, AsyncDirStorage, DirStorageStrategy, FilenameEncoding, FormatStrategy, PathStrategy,
};

const ENTITY: &str = "user_profile";

/// AsyncDirStorage-based user document repository.
///
/// Directory structure (the `data/hirify` prefix comes from `AppPaths`):
/// ```text
/// base_dir/
/// └── data/hirify/users/
///     ├── <uid-1>.toml
///     └── <uid-2>.toml
/// ```
pub struct AsyncDirUserRepository {
    storage: AsyncDirStorage,
}

impl AsyncDirUserRepository {
    /// Creates a repository storing documents under `base_dir/data/hirify/users`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Directory creation fails
    /// - AsyncDirStorage initialization fails
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| HirifyError::io(format!("Failed to create base directory: {}", e)))?;

        let paths = AppPaths::new("hirify").data_strategy(PathStrategy::CustomBase(base_dir));
        let migrator = create_user_profile_migrator()?;
        let strategy = DirStorageStrategy::default()
            .with_format(FormatStrategy::Toml)
            .with_filename_encoding(FilenameEncoding::Direct);

        let storage = AsyncDirStorage::new(paths, "users", migrator, strategy)
            .await
            .map_err(|e| HirifyError::io(format!("Failed to create AsyncDirStorage: {}", e)))?;

        Ok(Self { storage })
    }
}

#[async_trait]
impl UserRepository for AsyncDirUserRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<UserProfile>> {
        match self.storage.load::<UserProfile>(ENTITY, key).await {
            Ok(profile) => Ok(Some(profile)),
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

    async fn save(&self, key: &str, profile: &UserProfile) -> Result<()> {
        self.storage
            .save(ENTITY, key, profile)
            .await
            .map_err(|e| HirifyError::data_access(format!("Failed to save user '{}': {}", key, e)))?;
        tracing::debug!("[UserRepository] Saved document '{}'", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.storage
            .delete(key)
            .await
            .map_err(|e| {
                HirifyError::data_access(format!("Failed to delete user '{}': {}", key, e))
            })?;
        tracing::debug!("[UserRepository] Deleted document '{}'", key);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<UserDocument>> {
        let all = self
            .storage
            .load_all::<UserProfile>(ENTITY)
            .await
            .map_err(|e| HirifyError::data_access(format!("Failed to load users: {}", e)))?;

        let mut documents: Vec<UserDocument> = all
            .into_iter()
            .map(|(key, profile)| UserDocument::new(key, profile))
            .collect();

        // Directory listing order is platform dependent
        documents.sort_by(|a, b| a.key.cmp(&b.key));

        Ok(documents)
    }
}
