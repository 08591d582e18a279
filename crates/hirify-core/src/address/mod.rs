//! Address lookup port and model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Fragments shorter than this are never sent to the lookup service.
pub const MIN_QUERY_CHARS: usize = 3;

/// A ranked address candidate returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressSuggestion {
    /// Full address line
    pub label: String,
    pub postcode: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Department/region context string
    #[serde(default)]
    pub context: String,
}

/// Read-only address search.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Searches addresses matching a free-text fragment.
    ///
    /// Returns an empty list for fragments shorter than the configured minimum.
    async fn search(&self, fragment: &str) -> Result<Vec<AddressSuggestion>>;
}

/// Returns whether `fragment` is long enough to be searched.
pub fn is_searchable(fragment: &str, min_chars: usize) -> bool {
    fragment.chars().count() >= min_chars
}
