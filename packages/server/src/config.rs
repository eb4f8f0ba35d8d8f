//! Server configuration read from the environment.

use std::path::PathBuf;

use sigact_map_ingest::parse_delimiter;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `PORT` was not a valid port number.
    #[error("Invalid PORT value '{value}'")]
    InvalidPort {
        /// The rejected value.
        value: String,
    },

    /// `SIGACT_DELIMITER` was not a single ASCII character.
    #[error("Invalid SIGACT_DELIMITER value '{value}': expected a single ASCII character")]
    InvalidDelimiter {
        /// The rejected value.
        value: String,
    },
}

/// Everything the server needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Delimited incident record file.
    pub data_path: PathBuf,
    /// Optional province boundary GeoJSON file.
    pub boundary_path: Option<PathBuf>,
    /// Field delimiter of the record file.
    pub delimiter: u8,
    /// Directory of frontend assets served at `/`, if it exists.
    pub static_dir: PathBuf,
    /// Address to bind.
    pub bind_addr: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/sigacts.csv"),
            boundary_path: Some(PathBuf::from("data/provinces.geojson")),
            delimiter: b',',
            static_dir: PathBuf::from("app/dist"),
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `PORT` or `SIGACT_DELIMITER` is set to an
    /// invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// unset keys. An empty `SIGACT_BOUNDARY_PATH` disables the boundary.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `PORT` or `SIGACT_DELIMITER` is set to an
    /// invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => defaults.port,
        };

        let delimiter = match lookup("SIGACT_DELIMITER") {
            Some(value) => {
                parse_delimiter(&value).ok_or(ConfigError::InvalidDelimiter { value })?
            }
            None => defaults.delimiter,
        };

        let boundary_path = match lookup("SIGACT_BOUNDARY_PATH") {
            Some(value) if value.trim().is_empty() => None,
            Some(value) => Some(PathBuf::from(value)),
            None => defaults.boundary_path,
        };

        Ok(Self {
            data_path: lookup("SIGACT_DATA_PATH").map_or(defaults.data_path, PathBuf::from),
            boundary_path,
            delimiter,
            static_dir: lookup("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port,
        })
    }
}
