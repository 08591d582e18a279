//! Account registration.

use hirify_core::{
    address::AddressSuggestion,
    error::{HirifyError, Result},
    identity::{IdentityProvider, MIN_PASSWORD_CHARS},
    navigation::{DEFAULT_REDIRECT_DELAY, Redirect, Route},
    user::{GeoLocation, Role, UserProfile, UserRepository},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Everything the registration form collects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub role: Option<Role>,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub siret: String,
    /// Address picked from the lookup suggestions, if any
    pub address: Option<AddressSuggestion>,
}

impl RegistrationRequest {
    /// Name set on the identity: company name, or "first last".
    pub fn display_name(&self) -> String {
        match self.role {
            Some(Role::Company) => self.company_name.trim().to_string(),
            _ => format!("{} {}", self.first_name.trim(), self.last_name.trim())
                .trim()
                .to_string(),
        }
    }
}

pub struct RegistrationService {
    identity: Arc<dyn IdentityProvider>,
    users: Arc<dyn UserRepository>,
    redirect_delay: Duration,
}

impl RegistrationService {
    pub fn new(identity: Arc<dyn IdentityProvider>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            identity,
            users,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Creates the identity and its minimal profile document, then points
    /// the caller to the login page.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<Redirect> {
        let role = request
            .role
            .ok_or_else(|| HirifyError::validation("Choose a role: student or company"))?;
        if request.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(HirifyError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_CHARS
            )));
        }

        let identity = self
            .identity
            .sign_up(&request.email, &request.password)
            .await?;

        let display_name = request.display_name();
        let identity = if display_name.is_empty() {
            identity
        } else {
            self.identity.update_display_name(&display_name).await?
        };

        let profile = build_document(role, request, &identity.email, &display_name);
        self.users.save(&identity.uid, &profile).await?;

        tracing::info!(
            "[Registration] Registered {} account '{}'",
            role,
            identity.uid
        );
        Ok(Redirect::new(Route::Login, self.redirect_delay))
    }
}

fn build_document(
    role: Role,
    request: &RegistrationRequest,
    email: &str,
    display_name: &str,
) -> UserProfile {
    let mut profile = UserProfile {
        role: Some(role),
        email: email.to_string(),
        name: display_name.to_string(),
        created_at: Some(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };

    match role {
        Role::Student => {
            profile.first_name = request.first_name.trim().to_string();
            profile.last_name = request.last_name.trim().to_string();
        }
        Role::Company => {
            profile.company_name = request.company_name.trim().to_string();
            profile.siret = request.siret.trim().to_string();
        }
    }

    if let Some(address) = &request.address {
        profile.address = address.label.clone();
        profile.postal_code = address.postcode.clone();
        profile.city = address.city.clone();
        profile.location = Some(GeoLocation {
            latitude: address.latitude,
            longitude: address.longitude,
        });
    }

    profile
}
