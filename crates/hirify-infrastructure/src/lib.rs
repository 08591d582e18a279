//! Local adapters for the Hirify ports: directory-backed documents and
//! accounts, the address search client and configuration loading.

pub mod address_lookup;
pub mod async_dir_user_repository;
pub mod config_service;
pub mod dto;
pub mod local_identity_provider;
pub mod paths;
pub mod storage;

pub use crate::address_lookup::ApiAdresseLookup;
pub use crate::async_dir_user_repository::AsyncDirUserRepository;
pub use crate::config_service::ConfigService;
pub use crate::local_identity_provider::LocalIdentityProvider;
pub use crate::paths::HirifyPaths;
