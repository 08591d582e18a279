//! Identity domain module.
//!
//! # Module Structure
//!
//! - `model`: signed-in identity handle
//! - `provider`: identity service port (`IdentityProvider`)

mod model;
mod provider;

// Re-export public API
pub use model::{AuthState, Identity};
pub use provider::{IdentityProvider, MIN_PASSWORD_CHARS};
