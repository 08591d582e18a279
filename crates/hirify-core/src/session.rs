//! Process-wide session record.

use crate::identity::Identity;
use crate::user::{Role, UserProfile};

/// The signed-in identity merged with its profile document.
///
/// `profile` is `None` until the user has a stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub identity: Identity,
    pub profile: Option<UserProfile>,
}

impl SessionRecord {
    pub fn new(identity: Identity, profile: Option<UserProfile>) -> Self {
        Self { identity, profile }
    }

    /// Document key of the signed-in user.
    pub fn key(&self) -> &str {
        &self.identity.uid
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().and_then(|profile| profile.role)
    }
}
