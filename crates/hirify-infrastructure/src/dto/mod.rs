//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema of the documents written to
//! disk. They are private to the infrastructure layer.
//!
//! ### UserProfile Version History
//! - **1.0.0**: Student-era schema, postal code sometimes stored as `postcode`
//! - **1.1.0**: Added `alternants`, `siret`, `addressType`, `location`, `createdAt`
//!
//! ### Account Version History
//! - **1.0.0**: Initial schema

mod account;
mod user_profile;

pub use account::{Account, AccountV1_0_0, create_account_migrator};
pub use user_profile::{UserProfileV1_0, UserProfileV1_1, create_user_profile_migrator};
