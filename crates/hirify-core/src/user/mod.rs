//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: profile document model (`UserProfile`, `Role`, `SoughtProfile`)
//! - `repository`: document store port (`UserRepository`)
//!
//! # Usage
//!
//! ```ignore
//! use hirify_core::user::{Role, UserProfile, UserRepository};
//! ```

mod model;
mod repository;

// Re-export public API
pub use model::{GeoLocation, Role, SoughtProfile, UserDocument, UserProfile};
pub use repository::UserRepository;
