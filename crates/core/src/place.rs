//! Place records returned by the lookup collaborator

use serde::{Deserialize, Serialize};

/// A single place returned by the lookup provider
///
/// Opaque pass-through: the conversation engine renders `name` and `address`
/// and carries the rest untouched for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    /// Place name
    pub name: String,
    /// Street address / vicinity, when the provider has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Provider rating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    /// Directions link from the search origin to the place
    pub map_url: String,
}
