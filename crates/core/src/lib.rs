//! Core types and traits for the nearby-places assistant
//!
//! This crate provides the foundational types used across all other crates:
//! - `Category`: the closed set of place kinds
//! - Conversation turn types (append-only log elements)
//! - Geographic and place-record types
//! - Typed collaborator failures
//! - Collaborator traits (`PlacesLookup`, `LocationProvider`)

pub mod category;
pub mod conversation;
pub mod error;
pub mod geo;
pub mod place;
pub mod traits;

pub use category::Category;
pub use conversation::{ConversationTurn, TurnRole};
pub use error::{LocationError, LookupError};
pub use geo::Coordinates;
pub use place::PlaceResult;
pub use traits::{LocationProvider, PlacesLookup};
