//! Wiring of the local adapters behind the application services.

use anyhow::{Context, Result};
use hirify_application::{DiscoveryService, ProfileEditor, RegistrationService, SessionStore};
use hirify_core::config::RootConfig;
use hirify_infrastructure::{
    ApiAdresseLookup, AsyncDirUserRepository, ConfigService, HirifyPaths, LocalIdentityProvider,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

pub struct App {
    pub config: RootConfig,
    pub identity: Arc<LocalIdentityProvider>,
    pub users: Arc<AsyncDirUserRepository>,
    pub session: Arc<SessionStore>,
}

impl App {
    /// Loads the configuration, installs logging and opens the stores.
    pub async fn open(data_dir: Option<PathBuf>) -> Result<Self> {
        let config = ConfigService::new()?
            .get_config()
            .context("Failed to load config.toml")?;

        init_logging(&config.log_level);

        let paths = HirifyPaths::new(data_dir.as_deref().or(config.data_dir.as_deref()));
        let data_dir = paths.data_dir()?;
        let session_file = paths.session_file()?;
        tracing::debug!("[App] Data directory: {}", data_dir.display());

        let identity =
            Arc::new(LocalIdentityProvider::with_session_file(data_dir.clone(), session_file).await?);
        let users = Arc::new(AsyncDirUserRepository::new(&data_dir).await?);

        let session = Arc::new(SessionStore::new(identity.clone(), users.clone()));
        session.refresh().await?;

        Ok(Self {
            config,
            identity,
            users,
            session,
        })
    }

    pub fn discovery(&self) -> DiscoveryService {
        DiscoveryService::new(self.users.clone(), self.session.clone())
    }

    pub fn editor(&self) -> ProfileEditor {
        ProfileEditor::new(self.users.clone(), self.identity.clone(), self.session.clone())
            .with_redirect_delay(self.config.navigation.redirect_delay())
    }

    pub fn registration(&self) -> RegistrationService {
        RegistrationService::new(self.identity.clone(), self.users.clone())
            .with_redirect_delay(self.config.navigation.redirect_delay())
    }

    pub fn address_lookup(&self) -> Result<ApiAdresseLookup> {
        Ok(ApiAdresseLookup::new(self.config.address_lookup.clone())?)
    }
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
