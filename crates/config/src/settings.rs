//! Application settings
//!
//! All fields carry serde defaults so an empty configuration is valid; a
//! TOML file and `NEARBY_AGENT_` environment variables layer on top.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Intent parser tuning
    #[serde(default)]
    pub parser: ParserConfig,

    /// Dialog pacing and rendering
    #[serde(default)]
    pub dialog: DialogConfig,

    /// Places lookup provider
    #[serde(default)]
    pub places: PlacesConfig,
}

/// Intent parser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Maximum edit distance for a keyword variant to count as a match
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: usize,

    /// Lower bound of the bare-number radius fallback (inclusive, km)
    #[serde(default = "default_bare_number_min")]
    pub bare_number_min: f64,

    /// Upper bound of the bare-number radius fallback (inclusive, km)
    #[serde(default = "default_bare_number_max")]
    pub bare_number_max: f64,
}

fn default_fuzzy_threshold() -> usize {
    2
}
fn default_bare_number_min() -> f64 {
    2.0
}
fn default_bare_number_max() -> f64 {
    20.0
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: default_fuzzy_threshold(),
            bare_number_min: default_bare_number_min(),
            bare_number_max: default_bare_number_max(),
        }
    }
}

/// Dialog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogConfig {
    /// Artificial typing delay before assistant replies (milliseconds)
    ///
    /// Presentation pacing only; set to zero for synchronous tests.
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    /// Maximum places rendered per result message
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Radius choices offered by the radius prompt (km)
    #[serde(default = "default_radius_options_km")]
    pub radius_options_km: Vec<f64>,
}

fn default_typing_delay_ms() -> u64 {
    1500
}
fn default_max_results() -> usize {
    5
}
fn default_radius_options_km() -> Vec<f64> {
    vec![2.0, 3.0, 5.0, 7.0, 10.0, 20.0]
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: default_typing_delay_ms(),
            max_results: default_max_results(),
            radius_options_km: default_radius_options_km(),
        }
    }
}

/// Places provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Nearby-search endpoint
    #[serde(default = "default_places_endpoint")]
    pub endpoint: String,

    /// Provider API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry attempts for transient transport failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry backoff (milliseconds, doubles each attempt)
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

fn default_places_endpoint() -> String {
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_max_retries() -> u32 {
    2
}
fn default_initial_backoff_ms() -> u64 {
    200
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            endpoint: default_places_endpoint(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
        }
    }
}

/// Load settings from defaults, an optional file, and the environment
///
/// Environment variables use the `NEARBY_AGENT_` prefix with `__` as the
/// section separator, e.g. `NEARBY_AGENT_PLACES__API_KEY`.
pub fn load_settings(file: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = file {
        builder = builder.add_source(config::File::with_name(path));
    }

    let raw = builder
        .add_source(config::Environment::with_prefix("NEARBY_AGENT").separator("__"))
        .build()?;

    let settings: Settings = raw.try_deserialize()?;

    tracing::info!(
        typing_delay_ms = settings.dialog.typing_delay_ms,
        fuzzy_threshold = settings.parser.fuzzy_threshold,
        "Settings loaded"
    );

    Ok(settings)
}
