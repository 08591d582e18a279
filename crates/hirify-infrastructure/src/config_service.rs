//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` and caches it.

use crate::paths::HirifyPaths;
use crate::storage::AtomicTomlFile;
use hirify_core::{
    config::RootConfig,
    error::{HirifyError, Result},
};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
///
/// A missing file is created with the default configuration on first load.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the platform `config.toml`.
    pub fn new() -> Result<Self> {
        let path = HirifyPaths::config_file()
            .map_err(|e| HirifyError::config(format!("Failed to resolve config path: {}", e)))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service reading an explicit config file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let read_lock = self.config.read().map_err(poisoned)?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        {
            let mut write_lock = self.config.write().map_err(poisoned)?;
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) -> Result<()> {
        let mut write_lock = self.config.write().map_err(poisoned)?;
        *write_lock = None;
        Ok(())
    }

    fn load_config(&self) -> Result<RootConfig> {
        let file = AtomicTomlFile::<RootConfig>::new(self.path.clone());

        match file.load() {
            Ok(Some(config)) => Ok(config),
            Ok(None) => {
                let default_config = RootConfig::default();
                file.save(&default_config)?;
                tracing::info!("[Config] Created default config at {:?}", self.path);
                Ok(default_config)
            }
            Err(e) => Err(HirifyError::config(format!(
                "Failed to load {:?}: {}",
                self.path, e
            ))),
        }
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> HirifyError {
    HirifyError::internal("Config cache lock poisoned")
}
