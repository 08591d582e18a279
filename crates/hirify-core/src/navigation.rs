//! Navigation targets reached after a successful action.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default pause between a success message and the redirect.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Authenticated profile page
    Profile,
    /// Discovery feed
    Suggest,
    Login,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Profile => "/profile",
            Route::Suggest => "/suggest",
            Route::Login => "/login",
        }
    }
}

/// Tells the caller where to go once the success message has been shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub route: Route,
    pub delay: Duration,
}

impl Redirect {
    pub fn new(route: Route, delay: Duration) -> Self {
        Self { route, delay }
    }
}
