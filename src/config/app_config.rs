//! Application Configuration - server, storage and NASA settings
//!
//! Every struct implements `Default`, so a missing file or a partial file
//! behaves like the built-in settings for whatever it leaves out.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

/// Environment variable pointing at a TOML config file.
pub const CONFIG_PATH_VAR: &str = "IMPACT_SIM_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "impact_sim.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `AppConfig::load()` which searches:
/// 1. `$IMPACT_SIM_CONFIG` env var
/// 2. `./impact_sim.toml`
/// 3. Built-in defaults
///
/// and then applies environment overrides on top.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub nasa: NasaConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: defaults::DEFAULT_BIND_ADDRESS.to_string(),
            cors_origins: Vec::new(),
        }
    }
}

/// Which [`crate::storage::ImpactStore`] implementation to open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Single JSON array file
    #[default]
    Json,
    /// Embedded sled database
    Sled,
    /// Process memory only
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "sled" => Ok(Self::Sled),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown storage backend '{other}' (expected json, sled or memory)"
            )),
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Sled => write!(f, "sled"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Record storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// File (json) or directory (sled). Defaults depend on the backend.
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// The configured path, or the backend's default location.
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| match self.backend {
            StorageBackend::Sled => PathBuf::from(defaults::DEFAULT_SLED_STORE_PATH),
            StorageBackend::Json | StorageBackend::Memory => {
                PathBuf::from(defaults::DEFAULT_JSON_STORE_PATH)
            }
        })
    }
}

/// NASA NeoWs settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NasaConfig {
    /// API key. Never written back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// NeoWs root, e.g. `https://api.nasa.gov/neo/rest/v1`
    pub base_url: String,
    /// Request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for NasaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: defaults::NASA_NEO_BASE_URL.to_string(),
            timeout_secs: defaults::NASA_HTTP_TIMEOUT_SECS,
        }
    }
}

impl NasaConfig {
    /// The key, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

// ============================================================================
// Loading
// ============================================================================

impl AppConfig {
    /// Load from file (see type docs) and apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_file_or_default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    fn load_file_or_default() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from {}", CONFIG_PATH_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", CONFIG_PATH_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_PATH_VAR);
            }
        }

        // 2. Check ./impact_sim.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{}", LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found: using built-in defaults", LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Serialize to TOML (API key omitted).
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Blank values are ignored. Unparseable values log a warning and leave
    /// the current setting alone.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(defaults::NASA_API_KEY_VAR) {
            self.nasa.api_key = Some(key.trim().to_string());
        }
        if let Some(url) = get("NASA_API_BASE_URL") {
            self.nasa.base_url = url.trim().to_string();
        }
        if let Some(addr) = get("IMPACT_SIM_ADDR") {
            self.server.bind_address = addr.trim().to_string();
        }
        if let Some(origins) = get("IMPACT_SIM_CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(backend) = get("IMPACT_SIM_STORE") {
            match backend.parse() {
                Ok(b) => self.storage.backend = b,
                Err(e) => warn!(error = %e, "Ignoring IMPACT_SIM_STORE"),
            }
        }
        if let Some(path) = get("IMPACT_SIM_DATA_PATH") {
            self.storage.path = Some(PathBuf::from(path.trim()));
        }
    }

    /// Check settings for internal consistency, reporting every problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.server.bind_address.trim().is_empty() {
            errors.push("server.bind_address must not be empty".to_string());
        }
        if self.nasa.timeout_secs == 0 {
            errors.push("nasa.timeout_secs must be greater than 0".to_string());
        }
        if !(self.nasa.base_url.starts_with("http://") || self.nasa.base_url.starts_with("https://")) {
            errors.push(format!(
                "nasa.base_url = '{}' must be an http(s) URL",
                self.nasa.base_url
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, std::io::Error),
    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, toml::de::Error),
    #[error("Config serialization error: {0}")]
    Serialize(toml::ser::Error),
    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}
