//! Matching inputs: viewer, policy and filters.

use serde::{Deserialize, Serialize};

use crate::user::{Role, SoughtProfile, UserProfile};

/// The signed-in user whose perspective drives a discovery computation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Viewer {
    /// `None` when the viewer's profile is incomplete or unrecognised
    pub role: Option<Role>,
    /// Student skill domain
    pub domain: String,
    /// Company sought profiles
    pub alternants: Vec<SoughtProfile>,
}

impl Viewer {
    pub fn student(domain: impl Into<String>) -> Self {
        Self {
            role: Some(Role::Student),
            domain: domain.into(),
            alternants: Vec::new(),
        }
    }

    pub fn company(alternants: Vec<SoughtProfile>) -> Self {
        Self {
            role: Some(Role::Company),
            domain: String::new(),
            alternants,
        }
    }
}

impl From<&UserProfile> for Viewer {
    fn from(profile: &UserProfile) -> Self {
        Self {
            role: profile.role,
            domain: profile.domain.clone(),
            alternants: profile.alternants.clone(),
        }
    }
}

/// What to do when the viewer has no known role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownRolePolicy {
    /// Show nobody until the viewer's profile declares a role
    #[default]
    ExcludeAll,
    /// Skip role and domain checks; only the text and browse filters apply
    PassThrough,
}

/// Whether candidates must declare a domain compatible with the viewer's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainRule {
    /// Student domain must equal one of the company's sought domains
    Compatible,
    /// Role complementarity only
    Any,
}

/// Parameter set selecting how a discovery view matches candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPolicy {
    pub domain_rule: DomainRule,
    pub unknown_role: UnknownRolePolicy,
}

impl MatchPolicy {
    /// The suggestion feed: opposite role and compatible domain.
    pub const fn suggest() -> Self {
        Self {
            domain_rule: DomainRule::Compatible,
            unknown_role: UnknownRolePolicy::ExcludeAll,
        }
    }

    /// The browse view: opposite role, narrowed by browse filters only.
    pub const fn browse() -> Self {
        Self {
            domain_rule: DomainRule::Any,
            unknown_role: UnknownRolePolicy::ExcludeAll,
        }
    }

    pub const fn with_unknown_role(mut self, unknown_role: UnknownRolePolicy) -> Self {
        self.unknown_role = unknown_role;
        self
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self::suggest()
    }
}

/// Post-filters applied after role and domain matching.
///
/// Empty strings disable the corresponding filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchFilters {
    /// Free text searched in names, domain, description, address and city
    pub query: String,
    /// Substring of the candidate's domain or of one of its sought domains
    pub domain: String,
    /// Substring of the candidate's city, or of its postal code
    pub location: String,
}

impl MatchFilters {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn browse(domain: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            query: String::new(),
            domain: domain.into(),
            location: location.into(),
        }
    }
}
