// Application settings
// Loaded from ~/.config/taxcheck/config.toml

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_AUTHORITY_NAME: &str = "ITIS";
pub const DEFAULT_ENDPOINT: &str =
    "https://www.itis.gov/ITISWebService/jsonservice/searchByScientificName";
pub const DEFAULT_SEARCH_PARAM: &str = "srchKey";
pub const DEFAULT_CANDIDATES_FIELD: &str = "scientificNames";
pub const DEFAULT_DISPLAY_FIELD: &str = "combinedName";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid setting {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Name authority connection and payload shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthoritySettings {
    /// Shown in status labels ("Coincide en ITIS")
    pub name: String,

    /// Search URL; the name goes in `search_param`
    pub endpoint: String,

    pub search_param: String,

    /// Field holding the candidate list in a success payload
    pub candidates_field: String,

    /// Field of each candidate holding its display name
    pub display_field: String,

    /// Per-request timeout, seconds
    pub timeout_secs: u64,
}

impl Default for AuthoritySettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_AUTHORITY_NAME.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            search_param: DEFAULT_SEARCH_PARAM.to_string(),
            candidates_field: DEFAULT_CANDIDATES_FIELD.to_string(),
            display_field: DEFAULT_DISPLAY_FIELD.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    /// Pause after each lookup, milliseconds. Values under 500 are raised to 500.
    pub delay_ms: u64,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self { delay_ms: 500 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// WHATWG encoding label used when none is given on the command line
    pub encoding: String,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            encoding: "utf-8".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub authority: AuthoritySettings,
    pub lookup: LookupSettings,
    pub input: InputSettings,
}

impl Settings {
    /// Default settings file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("taxcheck")
            .join("config.toml")
    }

    /// Load settings.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// if present, otherwise defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let settings = Self::from_toml(&contents).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        settings.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(settings)
    }

    /// Reject values that would make every lookup fail.
    ///
    /// Run again after command-line overrides are applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.authority.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "authority.timeout_secs",
                message: "must be at least 1 second".to_string(),
            });
        }
        if self.authority.search_param.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "authority.search_param",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| e.to_string())
    }
}
