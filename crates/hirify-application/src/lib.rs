//! Application layer for Hirify.
//!
//! Use cases coordinating the domain ports: session tracking, discovery,
//! profile editing and registration.

pub mod discovery_service;
pub mod profile_editor;
pub mod registration_service;
pub mod session_store;

#[cfg(test)]
mod test_support;

pub use discovery_service::DiscoveryService;
pub use profile_editor::ProfileEditor;
pub use registration_service::{RegistrationRequest, RegistrationService};
pub use session_store::SessionStore;
