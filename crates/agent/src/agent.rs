//! Nearby-places conversational agent
//!
//! Drives the dialog state machine: free text runs through the intent
//! parser, quick actions pin a category, and once both slots are known the
//! query is dispatched to the lookup collaborator. Every failure path ends
//! in a friendly reply and a return to `AwaitingInput`; nothing here is
//! fatal to the process.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::{broadcast, Mutex};

use nearby_agent_config::{DialogConfig, ParserConfig, Settings};
use nearby_agent_core::{
    Category, ConversationTurn, Coordinates, LocationError, LocationProvider, LookupError,
    PlaceResult, PlacesLookup,
};

use crate::dialog::{is_greeting, DialogEvent, DialogState};
use crate::parser::{IntentParser, ParseResult};

const WELCOME: &str = "Hi! I'm your Nearby Finder assistant. I can help you discover places \
around you like restaurants, hospitals, ATMs, and more.\n\n\
Try asking: 'Find restaurants within 2 km' or use the quick actions below!";

const RESTART_NUDGE: &str = "Say hi whenever you want to start a new search.";

const CLARIFY_RADIUS: &str =
    "How far should I search? You can say something like 'within 5 km'.";
const CLARIFY_CATEGORY: &str =
    "What kind of place are you looking for? Restaurants, hospitals, ATMs - just say the word.";
const CLARIFY_BOTH: &str =
    "Tell me what you're looking for and how far to search, like 'cafes within 3 km'.";

/// Agent configuration
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    /// Intent parser tuning
    pub parser: ParserConfig,
    /// Dialog pacing and rendering
    pub dialog: DialogConfig,
}

impl From<&Settings> for AgentConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            parser: settings.parser.clone(),
            dialog: settings.dialog.clone(),
        }
    }
}

/// Conversational agent for one session
///
/// Owns the session's dialog state, conversation log and cached location
/// fix. All user events are serialized through one internal mutex: an event
/// is processed to completion (including a suspended lookup call) before the
/// next is admitted, so at most one lookup is ever in flight.
pub struct NearbyAgent {
    session_id: String,
    parser: IntentParser,
    config: DialogConfig,
    places: Arc<dyn PlacesLookup>,
    location: Arc<dyn LocationProvider>,
    state: RwLock<DialogState>,
    turns: RwLock<Vec<ConversationTurn>>,
    coords: RwLock<Option<Coordinates>>,
    event_tx: broadcast::Sender<DialogEvent>,
    turn_gate: Mutex<()>,
}

impl NearbyAgent {
    /// Create a new agent
    pub fn new(
        session_id: impl Into<String>,
        config: AgentConfig,
        places: Arc<dyn PlacesLookup>,
        location: Arc<dyn LocationProvider>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(100);

        Self {
            session_id: session_id.into(),
            parser: IntentParser::new(config.parser),
            config: config.dialog,
            places,
            location,
            state: RwLock::new(DialogState::initial()),
            turns: RwLock::new(Vec::new()),
            coords: RwLock::new(None),
            event_tx,
            turn_gate: Mutex::new(()),
        }
    }

    /// Subscribe to dialog events
    pub fn subscribe(&self) -> broadcast::Receiver<DialogEvent> {
        self.event_tx.subscribe()
    }

    /// Session identifier
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Current dialog state
    pub fn state(&self) -> DialogState {
        *self.state.read()
    }

    /// Snapshot of the conversation log
    pub fn turns(&self) -> Vec<ConversationTurn> {
        self.turns.read().clone()
    }

    /// Number of turns in the log
    pub fn turn_count(&self) -> usize {
        self.turns.read().len()
    }

    /// Radius choices the radius prompt should offer, in km
    pub fn radius_options_km(&self) -> &[f64] {
        &self.config.radius_options_km
    }

    /// Open the conversation with the welcome message and quick actions
    pub async fn greet(&self) {
        let _turn = self.turn_gate.lock().await;
        self.restart_with_welcome();
    }

    /// Handle free text typed by the user
    pub async fn handle_text(&self, text: &str) {
        let _turn = self.turn_gate.lock().await;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.push_user(trimmed);

        // A greeting restarts the flow from any state; history is kept.
        if is_greeting(trimmed) {
            self.pace().await;
            self.restart_with_welcome();
            return;
        }

        self.transition(DialogState::AwaitingInput {
            quick_actions: false,
        });

        let parsed = self.parser.parse(trimmed);
        match (parsed.category, parsed.radius_km) {
            (Some(category), Some(radius_km)) => self.dispatch(category, radius_km).await,
            _ => {
                self.pace().await;
                self.push_assistant(clarify_reply(&parsed));
            }
        }
    }

    /// Handle a quick-action button click
    pub async fn select_category(&self, category: Category) {
        let _turn = self.turn_gate.lock().await;

        tracing::debug!(session_id = %self.session_id, %category, "Quick action selected");
        self.transition(DialogState::AwaitingRadius { category });
        self.push_assistant(format!(
            "Great! You selected {}. Now, please choose your preferred search radius.",
            category.display_name()
        ));
    }

    /// Handle a radius button click
    pub async fn select_radius(&self, radius_km: f64) {
        let _turn = self.turn_gate.lock().await;

        let category = match self.state() {
            DialogState::AwaitingRadius { category } => category,
            _ => {
                tracing::warn!(
                    session_id = %self.session_id,
                    "Radius selected without a pinned category"
                );
                self.push_assistant(CLARIFY_CATEGORY);
                return;
            }
        };

        self.push_user(format!(
            "Find {} within {} km",
            category.plural(),
            format_km(radius_km)
        ));
        self.dispatch(category, radius_km).await;
    }

    /// Welcome message plus quick actions, from any state
    fn restart_with_welcome(&self) {
        self.transition(DialogState::AwaitingInput {
            quick_actions: true,
        });
        self.push_assistant(WELCOME);
    }

    /// Run a fully-filled query against the lookup collaborator
    async fn dispatch(&self, category: Category, radius_km: f64) {
        self.transition(DialogState::Dispatching {
            category,
            radius_km,
        });

        // Never call the collaborator without a resolved fix; route to the
        // location-permission path instead.
        let coords = match self.resolve_location().await {
            Ok(coords) => coords,
            Err(err) => {
                tracing::warn!(
                    session_id = %self.session_id,
                    error = %err,
                    "Location unavailable, dispatch aborted"
                );
                self.emit(DialogEvent::LocationPrompt);
                self.push_assistant(location_reply(err));
                self.transition(DialogState::AwaitingInput {
                    quick_actions: false,
                });
                return;
            }
        };

        self.pace().await;

        let (text, places) = match self.places.lookup_places(coords, category, radius_km).await {
            Ok(results) if results.is_empty() => (no_results_reply(category, radius_km), None),
            Ok(mut results) => {
                results.truncate(self.config.max_results);
                (results_reply(category, radius_km, &results), Some(results))
            }
            Err(err) => {
                tracing::warn!(
                    session_id = %self.session_id,
                    error = %err,
                    detail = ?err.detail(),
                    "Places lookup failed"
                );
                (lookup_failure_reply(&err), None)
            }
        };

        match places {
            Some(places) => {
                self.emit(DialogEvent::Results(places.clone()));
                self.emit(DialogEvent::Reply(text.clone()));
                self.turns
                    .write()
                    .push(ConversationTurn::assistant(text).with_places(places));
            }
            None => self.push_assistant(text),
        }

        self.transition(DialogState::AwaitingInput {
            quick_actions: false,
        });
    }

    /// Cached fix, or a fresh request; last known fix wins for the session
    async fn resolve_location(&self) -> Result<Coordinates, LocationError> {
        if let Some(coords) = *self.coords.read() {
            return Ok(coords);
        }
        let coords = self.location.request_location().await?;
        *self.coords.write() = Some(coords);
        Ok(coords)
    }

    /// Typing indicator plus the configured artificial delay
    async fn pace(&self) {
        self.emit(DialogEvent::Typing);
        if self.config.typing_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.typing_delay_ms)).await;
        }
    }

    /// Move to `next`, emitting prompt-visibility changes
    fn transition(&self, next: DialogState) {
        let previous = {
            let mut state = self.state.write();
            std::mem::replace(&mut *state, next)
        };
        if previous == next {
            return;
        }
        tracing::debug!(
            session_id = %self.session_id,
            ?previous,
            ?next,
            "Dialog state transition"
        );
        if previous.quick_actions_visible() != next.quick_actions_visible() {
            self.emit(DialogEvent::QuickActions(next.quick_actions_visible()));
        }
        if previous.radius_prompt_visible() != next.radius_prompt_visible() {
            self.emit(DialogEvent::RadiusPrompt(next.radius_prompt_visible()));
        }
    }

    fn push_user(&self, text: impl Into<String>) {
        self.turns.write().push(ConversationTurn::user(text));
    }

    fn push_assistant(&self, text: impl Into<String>) {
        let text = text.into();
        self.emit(DialogEvent::Reply(text.clone()));
        self.turns.write().push(ConversationTurn::assistant(text));
    }

    fn emit(&self, event: DialogEvent) {
        // Nobody listening is fine; the log still records everything.
        let _ = self.event_tx.send(event);
    }
}

/// Pick the clarifying question for a partial parse
fn clarify_reply(parsed: &ParseResult) -> &'static str {
    match (parsed.category, parsed.radius_km) {
        (Some(_), None) => CLARIFY_RADIUS,
        (None, Some(_)) => CLARIFY_CATEGORY,
        _ => CLARIFY_BOTH,
    }
}

/// One fixed sentence per lookup failure kind; raw detail stays in the logs
fn lookup_failure_reply(err: &LookupError) -> String {
    let sentence = match err {
        LookupError::PermissionDenied(_) => {
            "The places service turned down our request. Please try again later."
        }
        LookupError::InvalidRequest(_) => {
            "I couldn't run that search. Try a different category or radius."
        }
        LookupError::RateLimited(_) => {
            "I'm handling too many requests right now. Give me a moment and try again."
        }
        LookupError::Transport(_) => {
            "Oops! Something went wrong while fetching nearby places. Please try again."
        }
        LookupError::Unknown(_) => {
            "Something unexpected went wrong on the places service. Please try again."
        }
    };
    format!("{sentence}\n\n{RESTART_NUDGE}")
}

fn location_reply(err: LocationError) -> &'static str {
    match err {
        LocationError::Unsupported => {
            "Geolocation is not supported on this device, so I can't search nearby places."
        }
        LocationError::PermissionDenied => {
            "Location permission is required to find nearby places. Please enable location access."
        }
        LocationError::Unavailable => {
            "Failed to get your location. Please check your device settings and try again."
        }
    }
}

fn no_results_reply(category: Category, radius_km: f64) -> String {
    format!(
        "Sorry, I couldn't find any {} within {} km of your location. Try increasing \
         the search radius or searching for a different category.\n\n{RESTART_NUDGE}",
        category.plural(),
        format_km(radius_km)
    )
}

fn results_reply(category: Category, radius_km: f64, places: &[PlaceResult]) -> String {
    let mut reply = format!(
        "Here are the top {} within {} km:\n",
        category.plural(),
        format_km(radius_km)
    );
    for (index, place) in places.iter().enumerate() {
        reply.push_str(&format!(
            "\n{}. {}\n   {}",
            index + 1,
            place.name,
            place.address.as_deref().unwrap_or("Address not available")
        ));
    }
    reply.push_str(&format!("\n\n{RESTART_NUDGE}"));
    reply
}

/// Render a radius without a trailing ".0" for whole numbers
fn format_km(radius_km: f64) -> String {
    if radius_km.fract() == 0.0 {
        format!("{}", radius_km as i64)
    } else {
        format!("{radius_km}")
    }
}
