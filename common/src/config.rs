use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable pointing at an explicit client configuration file
pub const CONFIG_ENV_VAR: &str = "PLASMA_CLIENT_CONFIG";

/// Default API base URLs of the published plasma operators
pub mod defaults {
    pub const MAINNET_API: &str = "https://plasma.thematter.io/api/v1";
    pub const TESTNET_API: &str = "https://plasma-testnet.thematter.io/api/v1";
}

/// Error type for client configuration operations
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which plasma operator the client talks to
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

/// API base URL per network
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EndpointConfig {
    pub mainnet: String,
    pub testnet: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            mainnet: defaults::MAINNET_API.to_string(),
            testnet: defaults::TESTNET_API.to_string(),
        }
    }
}

/// Client configuration handed to the networking layer. Holds plain values
/// only; nothing here is process-wide state.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ClientConfig {
    pub network: Network,
    pub endpoints: EndpointConfig,
}

impl ClientConfig {
    /// Loads the configuration from the default location, falling back to
    /// built-in defaults when no file exists.
    pub fn load_default() -> ConfigResult<Self> {
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                debug!(path = %path.display(), "No client config found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Loads the configuration from a specific path
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&contents)?;
        info!(path = %path.as_ref().display(), network = %config.network, "Loaded client config");
        Ok(config)
    }

    /// Parses and validates a TOML document
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: ClientConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Determines the default configuration path
    fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("plasma").join("client.toml"))
    }

    /// Validates the configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, url) in [
            ("mainnet", &self.endpoints.mainnet),
            ("testnet", &self.endpoints.testnet),
        ] {
            if url.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{} endpoint cannot be empty",
                    name
                )));
            }
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::Validation(format!(
                    "{} endpoint must be an http or https URL, got {}",
                    name, url
                )));
            }
        }
        Ok(())
    }

    /// API base URL of the active network
    pub fn api_base(&self) -> &str {
        match self.network {
            Network::Mainnet => &self.endpoints.mainnet,
            Network::Testnet => &self.endpoints.testnet,
        }
    }

    /// URL of the operator's UTXO listing endpoint for the active network
    pub fn list_utxos_url(&self) -> String {
        format!("{}/listUTXOs", self.api_base().trim_end_matches('/'))
    }
}
