//! Identity provider trait.

use super::model::{AuthState, Identity};
use crate::error::Result;
use async_trait::async_trait;
use tokio::sync::watch;

/// Minimum password length accepted at registration and sign-up.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// An abstract identity service.
///
/// Mirrors what a hosted auth backend offers: email/password accounts, a
/// current sign-in, and an asynchronous "auth state changed" notification.
/// Signing up also signs the new account in.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates an account and signs it in.
    ///
    /// # Errors
    ///
    /// `HirifyError::Authentication` when the email is already registered.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity>;

    /// Sets the display name of the current identity.
    async fn update_display_name(&self, display_name: &str) -> Result<Identity>;

    /// Signs in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity>;

    /// Signs the current identity out. Signing out while signed out is a no-op.
    async fn sign_out(&self) -> Result<()>;

    /// Deletes the current identity and signs out.
    async fn delete_current(&self) -> Result<()>;

    /// Returns the currently signed-in identity.
    fn current(&self) -> AuthState;

    /// Subscribes to auth-state change notifications.
    fn subscribe(&self) -> watch::Receiver<AuthState>;
}
