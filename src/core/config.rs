//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.hacker-stories/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::Variant;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StoriesConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub paged: PagedConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub variant: Option<Variant>,
    pub default_search: Option<String>,
    pub storage_key: Option<String>,
    pub storage_file: Option<String>,
    pub discard_stale_responses: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PagedConfig {
    pub results_per_page: Option<Vec<usize>>,
    pub default_results_per_page: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub endpoint: Option<String>,
    pub hits_per_page: Option<u32>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ENDPOINT: &str = "https://hn.algolia.com/api/v1/search";
pub const DEFAULT_SEARCH: &str = "Redux";
pub const DEFAULT_STORAGE_KEY: &str = "search";
pub const DEFAULT_STORAGE_FILE: &str = "storage.json";
pub const DEFAULT_RESULTS_PER_PAGE: [usize; 4] = [5, 10, 15, 20];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub variant: Variant,
    pub default_search: String,
    pub storage_key: String,
    /// `None` when there is no home directory; the app keeps state in memory.
    pub storage_path: Option<PathBuf>,
    pub discard_stale_responses: bool,
    /// Never empty, never contains 0.
    pub results_per_page: Vec<usize>,
    /// Always one of `results_per_page`.
    pub default_results_per_page: usize,
    pub endpoint: Url,
    pub hits_per_page: Option<u32>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            default_search: DEFAULT_SEARCH.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_path: None,
            discard_stale_responses: true,
            results_per_page: DEFAULT_RESULTS_PER_PAGE.to_vec(),
            default_results_per_page: DEFAULT_RESULTS_PER_PAGE[0],
            endpoint: default_endpoint(),
            hits_per_page: None,
        }
    }
}

fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).expect("DEFAULT_ENDPOINT is a valid URL")
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.hacker-stories/`.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".hacker-stories"))
}

/// Returns the path to `~/.hacker-stories/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.hacker-stories/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `StoriesConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<StoriesConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(StoriesConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(StoriesConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: StoriesConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Hacker Stories Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# variant = "classic"                # "classic" or "paged"
# default_search = "Redux"           # Used when nothing is persisted yet
# storage_key = "search"
# storage_file = "storage.json"      # Path relative to ~/.hacker-stories/
# discard_stale_responses = true     # false = last response to arrive wins

# [paged]
# results_per_page = [5, 10, 15, 20] # Client-side cap, not sent to the API
# default_results_per_page = 5

# [api]
# endpoint = "https://hn.algolia.com/api/v1/search"  # Or set HN_SEARCH_ENDPOINT
# hits_per_page = 20                 # Sent as hitsPerPage when set
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_variant` and `cli_endpoint` are from CLI flags (None = not specified).
pub fn resolve(
    config: &StoriesConfig,
    cli_variant: Option<Variant>,
    cli_endpoint: Option<&str>,
) -> ResolvedConfig {
    // Variant: CLI → env → config → default
    let variant = cli_variant
        .or_else(|| {
            std::env::var("HACKER_STORIES_VARIANT")
                .ok()
                .and_then(|s| parse_variant(&s))
        })
        .or(config.general.variant)
        .unwrap_or_default();

    // Endpoint: CLI → env → config → default
    let endpoint = cli_endpoint
        .map(|s| s.to_string())
        .or_else(|| std::env::var("HN_SEARCH_ENDPOINT").ok())
        .or_else(|| config.api.endpoint.clone())
        .map(|raw| match Url::parse(&raw) {
            Ok(url) => url,
            Err(e) => {
                warn!("Invalid search endpoint '{}': {}, using default", raw, e);
                default_endpoint()
            }
        })
        .unwrap_or_else(default_endpoint);

    let (results_per_page, default_results_per_page) = resolve_results_per_page(&config.paged);

    let storage_file = config
        .general
        .storage_file
        .clone()
        .unwrap_or_else(|| DEFAULT_STORAGE_FILE.to_string());

    ResolvedConfig {
        variant,
        default_search: config
            .general
            .default_search
            .clone()
            .unwrap_or_else(|| DEFAULT_SEARCH.to_string()),
        storage_key: config
            .general
            .storage_key
            .clone()
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
        storage_path: app_dir().map(|d| d.join(storage_file)),
        discard_stale_responses: config.general.discard_stale_responses.unwrap_or(true),
        results_per_page,
        default_results_per_page,
        endpoint,
        hits_per_page: config.api.hits_per_page,
    }
}

fn parse_variant(raw: &str) -> Option<Variant> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "classic" => Some(Variant::Classic),
        "paged" => Some(Variant::Paged),
        other => {
            warn!("Ignoring unknown HACKER_STORIES_VARIANT '{}'", other);
            None
        }
    }
}

/// Drops zero entries; an empty list falls back to the defaults, and a
/// default not in the list falls back to the first option.
fn resolve_results_per_page(paged: &PagedConfig) -> (Vec<usize>, usize) {
    let mut options: Vec<usize> = paged
        .results_per_page
        .clone()
        .unwrap_or_default()
        .into_iter()
        .filter(|n| *n > 0)
        .collect();
    if options.is_empty() {
        options = DEFAULT_RESULTS_PER_PAGE.to_vec();
    }

    let default = match paged.default_results_per_page {
        Some(n) if options.contains(&n) => n,
        Some(n) => {
            warn!("default_results_per_page {} is not an option, using {}", n, options[0]);
            options[0]
        }
        None => options[0],
    };
    (options, default)
}
