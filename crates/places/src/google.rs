//! Google Places nearby-search client
//!
//! Sends the query as `location`/`radius`(meters)/`type`/`key` parameters
//! and maps the provider's status strings onto `LookupError` kinds. Transient
//! transport failures are retried with exponential backoff; provider
//! rejections are not.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use nearby_agent_config::PlacesConfig;
use nearby_agent_core::{Category, Coordinates, LookupError, PlaceResult, PlacesLookup};

/// Nearby-search relay client
#[derive(Clone)]
pub struct GooglePlacesClient {
    client: Client,
    config: PlacesConfig,
}

impl GooglePlacesClient {
    /// Create a new client
    pub fn new(config: PlacesConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| LookupError::Transport(format!("Failed to create HTTP client: {err}")))?;

        Ok(Self { client, config })
    }

    async fn execute_request(
        &self,
        coords: Coordinates,
        category: Category,
        radius_km: f64,
    ) -> Result<NearbySearchResponse, LookupError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            LookupError::PermissionDenied(Some("API key not configured".to_string()))
        })?;

        // Provider expects meters.
        let radius_m = (radius_km * 1000.0).round() as i64;

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("location", coords.to_string()),
                ("radius", radius_m.to_string()),
                ("type", category.as_str().to_string()),
                ("key", api_key.to_string()),
            ])
            .send()
            .await
            .map_err(|err| LookupError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if status.is_server_error() {
                return Err(LookupError::Transport(format!("Server error {status}: {body}")));
            }
            return Err(LookupError::Unknown(Some(format!("HTTP {status}: {body}"))));
        }

        response
            .json()
            .await
            .map_err(|err| LookupError::Transport(format!("Invalid response body: {err}")))
    }

    fn is_retryable(err: &LookupError) -> bool {
        matches!(err, LookupError::Transport(_))
    }
}

#[async_trait]
impl PlacesLookup for GooglePlacesClient {
    async fn lookup_places(
        &self,
        coords: Coordinates,
        category: Category,
        radius_km: f64,
    ) -> Result<Vec<PlaceResult>, LookupError> {
        let mut backoff = Duration::from_millis(self.config.initial_backoff_ms);
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::warn!(
                    "Places request failed, retrying in {:?} (attempt {}/{})",
                    backoff,
                    attempt,
                    self.config.max_retries
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }

            match self.execute_request(coords, category, radius_km).await {
                Ok(response) => {
                    tracing::debug!(
                        status = %response.status,
                        results = response.results.len(),
                        "Nearby search completed"
                    );
                    return map_response(response, coords);
                }
                Err(err) if Self::is_retryable(&err) => last_error = Some(err),
                Err(err) => return Err(err),
            }
        }

        Err(last_error.unwrap_or(LookupError::Unknown(None)))
    }

    fn name(&self) -> &str {
        "google-places"
    }
}

/// Nearby-search response body
#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbyPlace>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NearbyPlace {
    name: String,
    vicinity: Option<String>,
    rating: Option<f32>,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Map a provider response onto the lookup contract
///
/// Zero results is a successful outcome, not an error.
fn map_response(
    response: NearbySearchResponse,
    origin: Coordinates,
) -> Result<Vec<PlaceResult>, LookupError> {
    match response.status.as_str() {
        "OK" => Ok(response
            .results
            .into_iter()
            .map(|place| to_place_result(place, origin))
            .collect()),
        "ZERO_RESULTS" => Ok(Vec::new()),
        "REQUEST_DENIED" => Err(LookupError::PermissionDenied(response.error_message)),
        "INVALID_REQUEST" => Err(LookupError::InvalidRequest(response.error_message)),
        "OVER_QUERY_LIMIT" => Err(LookupError::RateLimited(response.error_message)),
        other => Err(LookupError::Unknown(Some(
            response
                .error_message
                .unwrap_or_else(|| other.to_string()),
        ))),
    }
}

fn to_place_result(place: NearbyPlace, origin: Coordinates) -> PlaceResult {
    let destination = place.geometry.location;
    PlaceResult {
        name: place.name,
        address: place.vicinity,
        rating: place.rating,
        map_url: format!(
            "https://www.google.com/maps/dir/?api=1&origin={},{}&destination={},{}",
            origin.latitude, origin.longitude, destination.lat, destination.lng
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Coordinates {
        Coordinates::new(12.9716, 77.5946)
    }

    fn response_with_status(status: &str) -> NearbySearchResponse {
        NearbySearchResponse {
            status: status.to_string(),
            results: Vec::new(),
            error_message: Some("detail from provider".to_string()),
        }
    }

    #[test]
    fn test_ok_response_maps_results() {
        let body = serde_json::json!({
            "status": "OK",
            "results": [{
                "name": "Corner House",
                "vicinity": "Residency Road",
                "rating": 4.5,
                "geometry": { "location": { "lat": 12.97, "lng": 77.60 } }
            }, {
                "name": "No Address Diner",
                "geometry": { "location": { "lat": 12.98, "lng": 77.61 } }
            }]
        });
        let response: NearbySearchResponse = serde_json::from_value(body).unwrap();

        let places = map_response(response, origin()).unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].name, "Corner House");
        assert_eq!(places[0].rating, Some(4.5));
        assert!(places[0]
            .map_url
            .contains("origin=12.9716,77.5946&destination=12.97,77.6"));
        assert_eq!(places[1].address, None);
    }

    #[test]
    fn test_zero_results_is_success() {
        let places = map_response(response_with_status("ZERO_RESULTS"), origin()).unwrap();
        assert!(places.is_empty());
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            map_response(response_with_status("REQUEST_DENIED"), origin()),
            Err(LookupError::PermissionDenied(Some(_)))
        ));
        assert!(matches!(
            map_response(response_with_status("INVALID_REQUEST"), origin()),
            Err(LookupError::InvalidRequest(Some(_)))
        ));
        assert!(matches!(
            map_response(response_with_status("OVER_QUERY_LIMIT"), origin()),
            Err(LookupError::RateLimited(Some(_)))
        ));
        assert!(matches!(
            map_response(response_with_status("UNKNOWN_ERROR"), origin()),
            Err(LookupError::Unknown(Some(_)))
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_permission_denied() {
        let client = GooglePlacesClient::new(PlacesConfig::default()).unwrap();
        let err = client
            .lookup_places(origin(), Category::Cafe, 2.0)
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::PermissionDenied(Some(_))));
    }
}
