//! Identity handle returned by the identity service.

use serde::{Deserialize, Serialize};

/// A signed-in account as seen by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user id; also the key of the user's profile document
    pub uid: String,
    pub email: String,
    /// Display name set after sign-up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

/// Payload of an auth-state change notification: `None` when signed out.
pub type AuthState = Option<Identity>;
