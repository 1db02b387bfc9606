use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::error::ApiError;

/// Production backend endpoint.
pub const DEFAULT_BASE_URL: &str = "https://clinical-trial-copilot.fly.dev";

/// Runtime-mutable backend endpoint configuration.
///
/// The base URL can be changed at any time before a request is issued
/// (e.g., switching to a local backend during development); every request
/// reads the current value rather than capturing it at client creation.
pub struct BackendConfig {
    base_url: RwLock<Url>,
}

impl BackendConfig {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL).expect("default backend URL is valid")
    }

    pub fn with_base_url(input: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: RwLock::new(parse_base_url(input)?),
        })
    }

    /// The currently configured base URL.
    pub fn base_url(&self) -> Url {
        self.base_url.read().unwrap().clone()
    }

    /// Replace the base URL. Rejects malformed or non-hierarchical URLs
    /// without touching the current value.
    pub fn set_base_url(&self, input: &str) -> Result<(), ApiError> {
        let url = parse_base_url(input)?;
        info!("Backend base URL set to {}", url);
        *self.base_url.write().unwrap() = url;
        Ok(())
    }

    /// Session-scoped resource URL: `<base>/api/sessions/<id>/<leaf>`.
    pub fn session_url(&self, session_id: &str, leaf: &str) -> Url {
        let mut url = self.base_url();
        url.path_segments_mut()
            .expect("base URL validated as hierarchical")
            .pop_if_empty()
            .extend(["api", "sessions", session_id, leaf]);
        url
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_base_url(input: &str) -> Result<Url, ApiError> {
    let url = Url::parse(input).map_err(|e| ApiError::InvalidUrl {
        input: input.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl {
            input: input.to_string(),
            reason: "not a hierarchical URL".to_string(),
        });
    }
    Ok(url)
}

/// Persisted client preferences, stored as a JSON file in the app data
/// directory and restored at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    #[serde(default)]
    pub backend_base_url: Option<String>,
}

impl Preferences {
    /// Default preferences location: `<data dir>/TrialMate/preferences.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("TrialMate").join("preferences.json"))
    }

    /// Load preferences, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Preferences {
        match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring malformed preferences file {:?}: {}", path, e);
                Preferences::default()
            }),
            Err(_) => Preferences::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create preferences dir: {}", e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize preferences: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write preferences: {}", e))
    }

    /// Apply stored settings to a live config, as done at app start.
    /// A stored URL that no longer parses is skipped with a warning.
    pub fn apply(&self, config: &BackendConfig) {
        if let Some(ref url) = self.backend_base_url {
            if let Err(e) = config.set_base_url(url) {
                warn!("Ignoring stored backend URL: {}", e);
            }
        }
    }
}
