//! UserProfile domain model.
//!
//! A profile is the document stored under the identity provider's user id.
//! Its `role` decides which optional fields carry meaning: students fill
//! `cursus`/`domain`, companies fill `alternants`.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// The two kinds of accounts on the platform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Student,
    Company,
}

impl Role {
    /// Returns the role a user of this role is matched against.
    pub fn opposite(self) -> Self {
        match self {
            Role::Student => Role::Company,
            Role::Company => Role::Student,
        }
    }

    /// Parses a stored role string. Unknown or empty values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

/// A company's declared (program type, domain) pair describing a kind of
/// apprentice it seeks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SoughtProfile {
    /// Program type (e.g. "BTS", "Master")
    pub cursus: String,
    /// Sought skill domain, compared case-insensitively
    pub domain: String,
}

impl SoughtProfile {
    pub fn new(cursus: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            cursus: cursus.into(),
            domain: domain.into(),
        }
    }
}

/// Coordinates picked from an address suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// User profile document.
///
/// Absent optional fields are empty strings (or an empty list for
/// `alternants`), never `None`; only `role`, `location` and `created_at`
/// are genuinely optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    /// Account kind; `None` when missing or unrecognised in storage
    pub role: Option<Role>,
    pub email: String,
    /// Display name copied from the identity provider on save
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    /// Company registration number
    pub siret: String,
    pub description: String,
    pub address_type: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub location: Option<GeoLocation>,
    /// Student program type
    pub cursus: String,
    /// Student skill domain
    pub domain: String,
    /// Company sought profiles, in form order
    pub alternants: Vec<SoughtProfile>,
    /// RFC 3339 creation timestamp written at registration
    pub created_at: Option<String>,
}

impl UserProfile {
    /// Name shown on cards: company name for companies, "first last" for
    /// students, falling back to the stored display name.
    pub fn display_name(&self) -> String {
        let composed = match self.role {
            Some(Role::Company) => self.company_name.trim().to_string(),
            _ => format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string(),
        };

        if composed.is_empty() {
            self.name.clone()
        } else {
            composed
        }
    }

    /// Non-empty sought domains of a company profile.
    pub fn sought_domains(&self) -> impl Iterator<Item = &str> {
        self.alternants
            .iter()
            .map(|alt| alt.domain.as_str())
            .filter(|domain| !domain.is_empty())
    }
}

/// A profile together with the document key it is stored under.
///
/// The key is the identity provider's user id; it is what discovery uses to
/// recognise the viewer's own document.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDocument {
    pub key: String,
    pub profile: UserProfile,
}

impl UserDocument {
    pub fn new(key: impl Into<String>, profile: UserProfile) -> Self {
        Self {
            key: key.into(),
            profile,
        }
    }
}
