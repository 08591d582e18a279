//! Application configuration model (`config.toml`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::address::MIN_QUERY_CHARS;
use crate::navigation::DEFAULT_REDIRECT_DELAY;

/// Root of `config.toml`. Every section falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootConfig {
    /// Overrides the platform data directory holding users, accounts and the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    pub address_lookup: AddressLookupSettings,
    pub navigation: NavigationSettings,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: "info".to_string(),
            address_lookup: AddressLookupSettings::default(),
            navigation: NavigationSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressLookupSettings {
    /// Search endpoint (GeoJSON feature collection response)
    pub endpoint: String,
    /// Maximum number of suggestions requested
    pub limit: usize,
    /// Shortest fragment sent to the endpoint
    pub min_query_chars: usize,
}

impl Default for AddressLookupSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api-adresse.data.gouv.fr/search/".to_string(),
            limit: 5,
            min_query_chars: MIN_QUERY_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    pub redirect_delay_ms: u64,
}

impl NavigationSettings {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY.as_millis() as u64,
        }
    }
}
