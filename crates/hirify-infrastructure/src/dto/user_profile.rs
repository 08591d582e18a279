//! UserProfile DTOs and migrations

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Migrator, Versioned};

use hirify_core::error::Result;
use hirify_core::user::{GeoLocation, Role, SoughtProfile, UserProfile};

/// User profile document V1.0.0 (students only, no sought profiles).
///
/// Documents written by the first registration form used `postcode`
/// instead of `postalCode`; both spellings are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfileV1_0 {
    pub role: String,
    pub email: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub description: String,
    pub address: String,
    #[serde(alias = "postcode")]
    pub postal_code: String,
    pub city: String,
    pub cursus: String,
    pub domain: String,
}

/// User profile document V1.1.0 (added sought profiles, siret, address
/// type, coordinates and creation timestamp).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfileV1_1 {
    /// Stored verbatim; unknown values load as a profile without role
    pub role: String,
    pub email: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub siret: String,
    pub description: String,
    pub address_type: String,
    pub address: String,
    #[serde(alias = "postcode")]
    pub postal_code: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    pub cursus: String,
    pub domain: String,
    pub alternants: Vec<SoughtProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

// ============================================================================
// Migration implementations
// ============================================================================

/// Migration from UserProfileV1_0 to UserProfileV1_1.
impl MigratesTo<UserProfileV1_1> for UserProfileV1_0 {
    fn migrate(self) -> UserProfileV1_1 {
        UserProfileV1_1 {
            role: self.role,
            email: self.email,
            name: self.name,
            first_name: self.first_name,
            last_name: self.last_name,
            company_name: self.company_name,
            siret: String::new(),
            description: self.description,
            address_type: String::new(),
            address: self.address,
            postal_code: self.postal_code,
            city: self.city,
            location: None,
            cursus: self.cursus,
            domain: self.domain,
            alternants: Vec::new(),
            created_at: None,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl IntoDomain<UserProfile> for UserProfileV1_1 {
    fn into_domain(self) -> UserProfile {
        UserProfile {
            role: Role::parse(&self.role),
            email: self.email,
            name: self.name,
            first_name: self.first_name,
            last_name: self.last_name,
            company_name: self.company_name,
            siret: self.siret,
            description: self.description,
            address_type: self.address_type,
            address: self.address,
            postal_code: self.postal_code,
            city: self.city,
            location: self.location,
            cursus: self.cursus,
            domain: self.domain,
            alternants: self.alternants,
            created_at: self.created_at,
        }
    }
}

impl FromDomain<UserProfile> for UserProfileV1_1 {
    fn from_domain(profile: UserProfile) -> Self {
        UserProfileV1_1 {
            role: profile
                .role
                .map(|role| role.to_string())
                .unwrap_or_default(),
            email: profile.email,
            name: profile.name,
            first_name: profile.first_name,
            last_name: profile.last_name,
            company_name: profile.company_name,
            siret: profile.siret,
            description: profile.description,
            address_type: profile.address_type,
            address: profile.address,
            postal_code: profile.postal_code,
            city: profile.city,
            location: profile.location,
            cursus: profile.cursus,
            domain: profile.domain,
            alternants: profile.alternants,
            created_at: profile.created_at,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for UserProfile documents.
///
/// # Migration Path
///
/// - V1.0 → V1.1: Adds sought profiles and company fields, all empty
/// - V1.1 → UserProfile: Parses the stored role
pub fn create_user_profile_migrator() -> Result<Migrator> {
    let mut migrator = Migrator::new();
    migrator.register(
        Migrator::define("user_profile")
            .from::<UserProfileV1_0>()
            .step::<UserProfileV1_1>()
            .into_with_save::<UserProfile>(),
    )?;
    Ok(migrator)
}
