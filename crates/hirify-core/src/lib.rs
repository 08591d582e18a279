//! Domain layer for Hirify.
//!
//! Holds the profile model, the matching engine and the ports (traits) the
//! application layer talks to: document store, identity service and address
//! lookup.

pub mod address;
pub mod config;
pub mod error;
pub mod identity;
pub mod matching;
pub mod navigation;
pub mod profile;
pub mod session;
pub mod user;

// Re-export common error type
pub use error::{HirifyError, Result};
