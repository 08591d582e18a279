//! Matching engine for the discovery views.
//!
//! # Module Structure
//!
//! - `model`: viewer, policy and filter types
//! - `engine`: the `match_candidates` function
//!
//! # Usage
//!
//! ```
//! use hirify_core::matching::{match_candidates, MatchFilters, MatchPolicy, Viewer};
//! use hirify_core::user::{Role, SoughtProfile, UserDocument, UserProfile};
//!
//! let company = UserProfile {
//!     role: Some(Role::Company),
//!     alternants: vec![SoughtProfile::new("BTS", "web")],
//!     ..Default::default()
//! };
//! let candidates = vec![UserDocument::new("acme", company)];
//!
//! let matched = match_candidates(
//!     &Viewer::student("Web"),
//!     &candidates,
//!     &MatchFilters::default(),
//!     MatchPolicy::suggest(),
//! );
//! assert_eq!(matched.len(), 1);
//! ```

mod engine;
mod model;

pub use engine::match_candidates;
pub use model::{DomainRule, MatchFilters, MatchPolicy, UnknownRolePolicy, Viewer};
