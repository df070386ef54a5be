//! Places lookup relay
//!
//! Thin client that forwards a fully-resolved `(coords, category, radius)`
//! query to the places-search provider and maps its responses onto the
//! `PlacesLookup` contract. No conversation logic lives here.

pub mod google;

pub use google::GooglePlacesClient;
