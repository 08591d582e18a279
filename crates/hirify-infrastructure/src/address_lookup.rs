//! Address search against the French national address API.

use async_trait::async_trait;
use hirify_core::{
    address::{AddressLookup, AddressSuggestion, is_searchable},
    config::AddressLookupSettings,
    error::{HirifyError, Result},
};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// GeoJSON response of the search endpoint
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// `[longitude, latitude]`
    coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct Properties {
    label: String,
    #[serde(default)]
    postcode: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    context: String,
}

impl From<Feature> for AddressSuggestion {
    fn from(feature: Feature) -> Self {
        let [longitude, latitude] = feature.geometry.coordinates;
        AddressSuggestion {
            label: feature.properties.label,
            postcode: feature.properties.postcode,
            city: feature.properties.city,
            latitude,
            longitude,
            context: feature.properties.context,
        }
    }
}

/// [`AddressLookup`] backed by `api-adresse.data.gouv.fr`.
pub struct ApiAdresseLookup {
    client: Client,
    settings: AddressLookupSettings,
}

impl ApiAdresseLookup {
    pub fn new(settings: AddressLookupSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| HirifyError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, settings })
    }
}

#[async_trait]
impl AddressLookup for ApiAdresseLookup {
    async fn search(&self, fragment: &str) -> Result<Vec<AddressSuggestion>> {
        if !is_searchable(fragment, self.settings.min_query_chars) {
            return Ok(Vec::new());
        }

        let limit = self.settings.limit.to_string();
        let response = self
            .client
            .get(&self.settings.endpoint)
            .query(&[("q", fragment), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| HirifyError::AddressLookup(e.to_string()))?
            .error_for_status()
            .map_err(|e| HirifyError::AddressLookup(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| HirifyError::AddressLookup(e.to_string()))?;

        let suggestions = parse_suggestions(&body)?;
        tracing::debug!(
            "[AddressLookup] {} suggestion(s) for '{}'",
            suggestions.len(),
            fragment
        );
        Ok(suggestions)
    }
}

/// Parses a GeoJSON feature collection into ranked suggestions.
pub fn parse_suggestions(body: &str) -> Result<Vec<AddressSuggestion>> {
    let collection: FeatureCollection = serde_json::from_str(body)
        .map_err(|e| HirifyError::AddressLookup(format!("Unexpected response: {}", e)))?;

    Ok(collection
        .features
        .into_iter()
        .map(AddressSuggestion::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [2.290084, 49.897443]},
                "properties": {
                    "label": "8 Boulevard du Port 80000 Amiens",
                    "score": 0.49,
                    "postcode": "80000",
                    "city": "Amiens",
                    "context": "80, Somme, Hauts-de-France"
                }
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [4.8357, 45.764]},
                "properties": {"label": "Lyon", "type": "municipality"}
            }
        ]
    }"#;

    #[test]
    fn test_parse_suggestions_swaps_coordinates() {
        let suggestions = parse_suggestions(SAMPLE).unwrap();
        assert_eq!(suggestions.len(), 2);

        let first = &suggestions[0];
        assert_eq!(first.label, "8 Boulevard du Port 80000 Amiens");
        assert_eq!(first.postcode, "80000");
        assert_eq!(first.city, "Amiens");
        assert_eq!(first.latitude, 49.897443);
        assert_eq!(first.longitude, 2.290084);

        assert_eq!(suggestions[1].postcode, "");
    }

    #[test]
    fn test_parse_invalid_body() {
        let err = parse_suggestions("<html>").unwrap_err();
        assert!(matches!(err, HirifyError::AddressLookup(_)));
    }

    #[tokio::test]
    async fn test_short_fragment_skips_request() {
        let lookup = ApiAdresseLookup::new(AddressLookupSettings {
            endpoint: "http://127.0.0.1:9/unreachable".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert!(lookup.search("8 ").await.unwrap().is_empty());
    }
}
