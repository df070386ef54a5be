//! Conversation turn types
//!
//! The conversation log is an append-only ordered sequence of turns consumed
//! by a presentation layer outside this core. Turns are never edited or
//! removed; a greeting logically restarts the flow but keeps history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::place::PlaceResult;

/// Role of the speaker in a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// User message (typed text or a synthetic echo of a button click)
    User,
    /// Assistant message
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single turn in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Role of the speaker
    pub role: TurnRole,
    /// Content of the turn
    pub text: String,
    /// When the turn occurred
    pub timestamp: DateTime<Utc>,
    /// Places rendered with this turn, for result turns only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub places: Option<Vec<PlaceResult>>,
}

impl ConversationTurn {
    /// Create a new turn
    pub fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
            places: None,
        }
    }

    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(TurnRole::User, text)
    }

    /// Create an assistant turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, text)
    }

    /// Attach the places rendered with this turn
    pub fn with_places(mut self, places: Vec<PlaceResult>) -> Self {
        self.places = Some(places);
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == TurnRole::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_constructors() {
        let turn = ConversationTurn::user("find cafes within 2 km");
        assert!(turn.is_user());
        assert!(turn.places.is_none());

        let turn = ConversationTurn::assistant("Here you go").with_places(vec![PlaceResult {
            name: "Third Wave".to_string(),
            address: Some("Indiranagar".to_string()),
            rating: Some(4.4),
            map_url: "https://maps.example/dir".to_string(),
        }]);
        assert_eq!(turn.role, TurnRole::Assistant);
        assert_eq!(turn.places.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_role_serde_names() {
        assert_eq!(serde_json::to_string(&TurnRole::User).unwrap(), "\"user\"");
        assert_eq!(TurnRole::Assistant.to_string(), "assistant");
    }
}
