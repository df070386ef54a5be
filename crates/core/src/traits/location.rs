//! Location provider trait

use async_trait::async_trait;

use crate::error::LocationError;
use crate::geo::Coordinates;

/// Geolocation collaborator contract
///
/// The engine asks for a fix once per session and caches it; failures route
/// the conversation to the location-permission path instead of a dispatch.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Acquire the user's current coordinates
    async fn request_location(&self) -> Result<Coordinates, LocationError>;
}
