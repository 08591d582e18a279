//! Editable profile draft.
//!
//! Holds the locally edited copy of the signed-in user's profile until it is
//! submitted. The draft always carries the whole fetched document so a submit
//! preserves fields the form does not show.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::address::AddressSuggestion;
use crate::error::{HirifyError, Result};
use crate::identity::Identity;
use crate::user::{GeoLocation, Role, SoughtProfile, UserProfile};

/// Scalar profile fields editable through the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ProfileField {
    FirstName,
    LastName,
    CompanyName,
    Siret,
    Description,
    AddressType,
    Address,
    PostalCode,
    City,
    Cursus,
    Domain,
}

/// Fields of a sought-profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SoughtField {
    Cursus,
    Domain,
}

/// A role-specific editable profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDraft {
    role: Role,
    profile: UserProfile,
}

impl ProfileDraft {
    /// Creates the default draft for `role`: every string empty, and one empty
    /// sought row for companies.
    pub fn new(role: Role) -> Self {
        let alternants = match role {
            Role::Company => vec![SoughtProfile::default()],
            Role::Student => Vec::new(),
        };

        Self {
            role,
            profile: UserProfile {
                role: Some(role),
                alternants,
                ..Default::default()
            },
        }
    }

    /// Builds a draft from a stored document.
    ///
    /// The stored role wins; documents without a role open as student drafts.
    /// Company documents saved before sought rows existed get one empty row.
    pub fn from_stored(profile: UserProfile) -> Self {
        let role = profile.role.unwrap_or(Role::Student);
        let mut profile = profile;
        if role == Role::Company && profile.alternants.is_empty() {
            profile.alternants.push(SoughtProfile::default());
        }

        Self { role, profile }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn sought_rows(&self) -> &[SoughtProfile] {
        &self.profile.alternants
    }

    /// Replaces one scalar field. No validation is applied.
    pub fn update_field(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            ProfileField::FirstName => &mut self.profile.first_name,
            ProfileField::LastName => &mut self.profile.last_name,
            ProfileField::CompanyName => &mut self.profile.company_name,
            ProfileField::Siret => &mut self.profile.siret,
            ProfileField::Description => &mut self.profile.description,
            ProfileField::AddressType => &mut self.profile.address_type,
            ProfileField::Address => &mut self.profile.address,
            ProfileField::PostalCode => &mut self.profile.postal_code,
            ProfileField::City => &mut self.profile.city,
            ProfileField::Cursus => &mut self.profile.cursus,
            ProfileField::Domain => &mut self.profile.domain,
        };
        *slot = value;
    }

    /// Fills the address block from a picked address suggestion.
    pub fn apply_address(&mut self, suggestion: &AddressSuggestion) {
        self.profile.address = suggestion.label.clone();
        self.profile.postal_code = suggestion.postcode.clone();
        self.profile.city = suggestion.city.clone();
        self.profile.location = Some(GeoLocation {
            latitude: suggestion.latitude,
            longitude: suggestion.longitude,
        });
    }

    /// Appends an empty sought row and returns its index.
    pub fn add_sought_row(&mut self) -> Result<usize> {
        self.ensure_company("add a sought profile")?;
        self.profile.alternants.push(SoughtProfile::default());
        Ok(self.profile.alternants.len() - 1)
    }

    /// Removes the sought row at `index`. The last remaining row cannot be removed.
    pub fn remove_sought_row(&mut self, index: usize) -> Result<SoughtProfile> {
        self.ensure_company("remove a sought profile")?;
        self.ensure_row(index)?;
        if self.profile.alternants.len() <= 1 {
            return Err(HirifyError::validation(
                "At least one sought profile is required",
            ));
        }
        Ok(self.profile.alternants.remove(index))
    }

    /// Replaces one field of the sought row at `index`.
    pub fn update_sought_row(
        &mut self,
        index: usize,
        field: SoughtField,
        value: impl Into<String>,
    ) -> Result<()> {
        self.ensure_company("edit a sought profile")?;
        self.ensure_row(index)?;
        let row = &mut self.profile.alternants[index];
        match field {
            SoughtField::Cursus => row.cursus = value.into(),
            SoughtField::Domain => row.domain = value.into(),
        }
        Ok(())
    }

    /// Produces the document written on submit: the whole draft merged with
    /// the role, the identity's display name and its email.
    pub fn to_document(&self, identity: &Identity) -> UserProfile {
        let mut document = self.profile.clone();
        document.role = Some(self.role);
        document.name = identity.display_name.clone().unwrap_or_default();
        document.email = identity.email.clone();
        document
    }

    fn ensure_company(&self, action: &str) -> Result<()> {
        if self.role == Role::Company {
            Ok(())
        } else {
            Err(HirifyError::validation(format!(
                "Only company profiles can {}",
                action
            )))
        }
    }

    fn ensure_row(&self, index: usize) -> Result<()> {
        if index < self.profile.alternants.len() {
            Ok(())
        } else {
            Err(HirifyError::validation(format!(
                "No sought profile at position {}",
                index
            )))
        }
    }
}
