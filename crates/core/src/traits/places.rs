//! Places lookup trait

use async_trait::async_trait;

use crate::category::Category;
use crate::error::LookupError;
use crate::geo::Coordinates;
use crate::place::PlaceResult;

/// Lookup collaborator contract
///
/// Implementations:
/// - `GooglePlacesClient` (crates/places) - HTTP relay to the nearby-search API
/// - test mocks with canned results
///
/// # Example
///
/// ```ignore
/// let places: Arc<dyn PlacesLookup> = Arc::new(GooglePlacesClient::new(config)?);
/// let results = places
///     .lookup_places(coords, Category::Cafe, 3.0)
///     .await?;
/// ```
#[async_trait]
pub trait PlacesLookup: Send + Sync {
    /// Find places of `category` within `radius_km` of `coords`
    ///
    /// An empty result list is a successful outcome, distinct from any
    /// `LookupError`.
    async fn lookup_places(
        &self,
        coords: Coordinates,
        category: Category,
        radius_km: f64,
    ) -> Result<Vec<PlaceResult>, LookupError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
