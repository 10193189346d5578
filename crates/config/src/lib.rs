// Configuration loading

pub mod settings;

pub use settings::{
    AuthoritySettings, ConfigError, InputSettings, LookupSettings, Settings, DEFAULT_AUTHORITY_NAME,
    DEFAULT_CANDIDATES_FIELD, DEFAULT_DISPLAY_FIELD, DEFAULT_ENDPOINT, DEFAULT_SEARCH_PARAM,
    DEFAULT_TIMEOUT_SECS,
};
