//! Unified path management for hirify files.
//!
//! Platform directories are resolved via AppPaths from the version-migrate
//! crate, the same helper the directory-backed stores use.

use std::path::{Path, PathBuf};
use version_migrate::AppPaths;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path resolution for hirify.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/hirify/            # Config directory (AppPaths default)
/// └── config.toml              # Application configuration
///
/// ~/.local/share/hirify/       # Data directory (or `data_dir` from config.toml)
/// ├── data/hirify/
/// │   ├── users/               # Profile documents, one file per user key
/// │   └── accounts/            # Local identity accounts
/// └── session.toml             # Current sign-in
/// ```
pub struct HirifyPaths {
    data_dir_override: Option<PathBuf>,
}

impl HirifyPaths {
    /// Creates a path resolver. `data_dir` overrides the platform data directory.
    pub fn new(data_dir: Option<&Path>) -> Self {
        Self {
            data_dir_override: data_dir.map(Path::to_path_buf),
        }
    }

    fn app_paths() -> AppPaths {
        AppPaths::new("hirify")
    }

    /// Returns the hirify configuration directory (e.g. `~/.config/hirify/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .config_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the data directory holding documents, accounts and the session.
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.data_dir_override {
            Some(dir) => Ok(dir.clone()),
            None => Self::app_paths()
                .data_dir()
                .map_err(|_| PathError::HomeDirNotFound),
        }
    }

    /// Returns the path of the persisted sign-in.
    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("session.toml"))
    }
}
