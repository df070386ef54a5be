//! Dialog state and events
//!
//! The conversation's mutable state is one tagged union, owned exclusively
//! by the agent. Prompt visibility is derived from it rather than tracked in
//! separate booleans, so unintended flag combinations are unrepresentable.

use nearby_agent_core::{Category, PlaceResult};
use serde::{Deserialize, Serialize};

/// Greeting phrases accepted as a conversation (re)start
///
/// Matched case-insensitively, either the exact phrase or the phrase
/// followed by a space and trailing words ("Hello there", not "Hellothere").
const GREETINGS: [&str; 8] = [
    "hi",
    "hello",
    "hey",
    "hola",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
];

/// Check whether an utterance is a greeting
pub fn is_greeting(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    GREETINGS
        .iter()
        .any(|greeting| lowered == *greeting || lowered.starts_with(&format!("{greeting} ")))
}

/// Current dialog state of one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum DialogState {
    /// Waiting for a user event
    ///
    /// `quick_actions` is true at session start and after a greeting; after
    /// a completed turn the nudge invites a greeting to bring them back.
    AwaitingInput { quick_actions: bool },
    /// Category pinned by a quick action, waiting for a radius choice
    AwaitingRadius { category: Category },
    /// Both slots known, lookup in flight; input is disabled
    Dispatching { category: Category, radius_km: f64 },
}

impl DialogState {
    /// Initial state: fresh session, quick actions offered
    pub fn initial() -> Self {
        DialogState::AwaitingInput {
            quick_actions: true,
        }
    }

    /// Is the quick-action prompt visible
    pub fn quick_actions_visible(&self) -> bool {
        matches!(
            self,
            DialogState::AwaitingInput {
                quick_actions: true
            }
        )
    }

    /// Is the radius prompt visible
    pub fn radius_prompt_visible(&self) -> bool {
        matches!(self, DialogState::AwaitingRadius { .. })
    }

    /// Can the input surface accept a new event
    pub fn input_enabled(&self) -> bool {
        !matches!(self, DialogState::Dispatching { .. })
    }
}

/// Events emitted by the agent for the presentation layer
#[derive(Debug, Clone)]
pub enum DialogEvent {
    /// Assistant reply appended to the conversation log
    Reply(String),
    /// Typing indicator preceding a paced reply
    Typing,
    /// Quick-action prompt visibility changed
    QuickActions(bool),
    /// Radius prompt visibility changed
    RadiusPrompt(bool),
    /// Places rendered with the latest reply
    Results(Vec<PlaceResult>),
    /// The location-permission prompt should be surfaced
    LocationPrompt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_detection() {
        assert!(is_greeting("hi"));
        assert!(is_greeting("Hello"));
        assert!(is_greeting("HELLO THERE"));
        assert!(is_greeting("good morning everyone"));
        assert!(is_greeting("  hey  "));

        assert!(!is_greeting("Hellothere"));
        assert!(!is_greeting("goodbye"));
        assert!(!is_greeting("find restaurants"));
        assert!(!is_greeting(""));
    }

    #[test]
    fn test_prompt_visibility_is_mutually_exclusive() {
        let states = [
            DialogState::initial(),
            DialogState::AwaitingInput {
                quick_actions: false,
            },
            DialogState::AwaitingRadius {
                category: Category::Hospital,
            },
            DialogState::Dispatching {
                category: Category::Hospital,
                radius_km: 5.0,
            },
        ];
        for state in states {
            assert!(
                !(state.quick_actions_visible() && state.radius_prompt_visible()),
                "both prompts visible in {state:?}"
            );
        }
    }

    #[test]
    fn test_input_disabled_only_while_dispatching() {
        assert!(DialogState::initial().input_enabled());
        assert!(DialogState::AwaitingRadius {
            category: Category::Cafe
        }
        .input_enabled());
        assert!(!DialogState::Dispatching {
            category: Category::Cafe,
            radius_km: 2.0
        }
        .input_enabled());
    }
}
