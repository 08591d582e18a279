//! User repository trait.
//!
//! Defines the document store operations the application consumes.

use super::model::{Role, UserDocument, UserProfile};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the `users` document collection.
///
/// Documents are keyed by the identity provider's user id. Writes are full
/// replaces of the document; there is no partial patch.
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Schema versioning (older documents may lack `alternants`)
/// - Returning documents in a stable order from collection scans
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a profile by its document key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UserProfile))`: Document found
    /// - `Ok(None)`: No document under this key
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_key(&self, key: &str) -> Result<Option<UserProfile>>;

    /// Creates or replaces the document stored under `key`.
    async fn save(&self, key: &str, profile: &UserProfile) -> Result<()>;

    /// Deletes the document stored under `key`.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Scans the entire collection.
    async fn list_all(&self) -> Result<Vec<UserDocument>>;

    /// Lists documents whose role equals `role`.
    ///
    /// The default implementation scans the collection and filters in memory.
    /// Stores able to query by role should override it.
    async fn list_by_role(&self, role: Role) -> Result<Vec<UserDocument>> {
        let documents = self.list_all().await?;
        Ok(documents
            .into_iter()
            .filter(|doc| doc.profile.role == Some(role))
            .collect())
    }
}
