//! Run configuration.
//!
//! Two sources feed a run: a properties file holding the directions API
//! credentials and origin, and command-line flags (with environment
//! fallbacks) for everything else. Both are loaded once in `main` and passed
//! down explicitly.

mod cli;
mod error;
mod properties;

use std::path::Path;

use tracing::debug;

pub use cli::{Cli, RunConfig};
pub use error::ConfigError;
pub use properties::Properties;

/// Properties key holding the directions API key.
pub const API_KEY: &str = "api.key";

/// Properties key holding the fixed origin address.
pub const FROM_ADDRESS: &str = "from.address";

/// Credentials and origin for directions queries.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Directions API key. Never blank.
    pub api_key: String,
    /// Origin address for every query. Never blank.
    pub origin_address: String,
}

impl ApiConfig {
    /// Load from a properties file.
    ///
    /// Fails if the file can't be read or either required key is blank.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        // Properties files are traditionally Latin-1; accept UTF-8 first.
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => encoding_rs::WINDOWS_1252
                .decode_without_bom_handling(e.as_bytes())
                .0
                .into_owned(),
        };

        let props = Properties::parse(&text);
        debug!(path = %path.display(), keys = props.len(), "loaded properties");

        Self::from_properties(&props, path)
    }

    /// Build from already-parsed properties. `source` is only used in errors.
    pub fn from_properties(props: &Properties, source: &Path) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            props
                .get_non_blank(key)
                .map(str::to_string)
                .ok_or_else(|| ConfigError::MissingKey {
                    key,
                    path: source.to_path_buf(),
                })
        };

        Ok(Self {
            api_key: required(API_KEY)?,
            origin_address: required(FROM_ADDRESS)?,
        })
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"<redacted>")
            .field("origin_address", &self.origin_address)
            .finish()
    }
}
