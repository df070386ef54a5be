//! Collaborator traits
//!
//! The conversation engine only depends on these contracts:
//! - `PlacesLookup`: the backend + map-provider pair that resolves a
//!   fully-filled query into place records
//! - `LocationProvider`: geolocation acquisition and its permission flow
//!
//! Both are trait objects at the seam so tests can substitute mocks and the
//! relay implementation can be swapped without touching the engine.

mod location;
mod places;

pub use location::LocationProvider;
pub use places::PlacesLookup;
