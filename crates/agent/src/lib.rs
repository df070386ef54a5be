//! Conversational slot-filling engine for nearby-places search
//!
//! Features:
//! - Keyword lexicon with fuzzy matching (typos, plurals, a few foreign terms)
//! - Intent parsing into a `(category, radius)` query
//! - Turn-based dialog state machine (quick actions, radius prompt,
//!   clarifying questions, dispatch)
//! - Per-session state ownership and lifecycle

pub mod agent;
pub mod dialog;
pub mod fuzzy;
pub mod lexicon;
pub mod parser;
pub mod session;

pub use agent::{AgentConfig, NearbyAgent};
pub use dialog::{is_greeting, DialogEvent, DialogState};
pub use lexicon::Lexicon;
pub use parser::{IntentParser, ParseResult};
pub use session::{Session, SessionManager};

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Session error: {0}")]
    Session(String),
}
