//! Configuration Management
//!
//! Explicit client configuration. The library only ever reads a [`Config`]
//! handed to it; loading from disk or the environment is left to callers such
//! as the CLI.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MIN_TIMEOUT_SECS: u64 = 1;

/// Environment variable holding the personal (user) API key
pub const ENV_API_KEY: &str = "NEW_RELIC_API_KEY";
/// Environment variable holding the admin API key used by REST v2
pub const ENV_ADMIN_API_KEY: &str = "NEW_RELIC_ADMIN_API_KEY";
/// Environment variable selecting the region
pub const ENV_REGION: &str = "NEW_RELIC_REGION";

/// New Relic data center region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Us,
    Eu,
    Staging,
}

impl Region {
    /// REST v2 base URL for this region
    pub fn rest_base_url(self) -> &'static str {
        match self {
            Region::Us => "https://api.newrelic.com/v2",
            Region::Eu => "https://api.eu.newrelic.com/v2",
            Region::Staging => "https://staging-api.newrelic.com/v2",
        }
    }

    /// NerdGraph endpoint for this region
    pub fn nerdgraph_url(self) -> &'static str {
        match self {
            Region::Us => "https://api.newrelic.com/graphql",
            Region::Eu => "https://api.eu.newrelic.com/graphql",
            Region::Staging => "https://staging-api.newrelic.com/graphql",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::Us => "us",
            Region::Eu => "eu",
            Region::Staging => "staging",
        };
        f.write_str(name)
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" => Ok(Region::Us),
            "eu" => Ok(Region::Eu),
            "staging" => Ok(Region::Staging),
            other => Err(Error::Config(format!("unknown region: {}", other))),
        }
    }
}

/// Client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Personal (user) API key, used for NerdGraph and as REST fallback
    #[serde(default)]
    pub personal_api_key: Option<String>,
    /// Admin API key, preferred for REST v2 calls
    #[serde(default)]
    pub admin_api_key: Option<String>,
    #[serde(default)]
    pub region: Region,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Sent as `NewRelic-Requesting-Services`
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Overrides the region's REST base URL
    #[serde(default)]
    pub base_url: Option<String>,
    /// Overrides the region's NerdGraph endpoint
    #[serde(default)]
    pub nerdgraph_url: Option<String>,
}

fn default_user_agent() -> String {
    format!("newrelic-client/{}", env!("CARGO_PKG_VERSION"))
}

fn default_service_name() -> String {
    "newrelic-client".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            personal_api_key: None,
            admin_api_key: None,
            region: Region::default(),
            user_agent: default_user_agent(),
            service_name: default_service_name(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: None,
            nerdgraph_url: None,
        }
    }
}

// Security: never print key material
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("personal_api_key", &self.personal_api_key.as_ref().map(|_| "***"))
            .field("admin_api_key", &self.admin_api_key.as_ref().map(|_| "***"))
            .field("region", &self.region)
            .field("user_agent", &self.user_agent)
            .field("service_name", &self.service_name)
            .field("timeout_secs", &self.timeout_secs)
            .field("base_url", &self.base_url)
            .field("nerdgraph_url", &self.nerdgraph_url)
            .finish()
    }
}

impl Config {
    /// Create a configuration with a personal API key and defaults for the rest
    pub fn new(personal_api_key: impl Into<String>) -> Self {
        Self {
            personal_api_key: Some(personal_api_key.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_admin_api_key(mut self, key: impl Into<String>) -> Self {
        self.admin_api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout, rounded up to whole seconds (minimum 1s)
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_millis().div_ceil(1000);
        self.timeout_secs = u64::try_from(secs).unwrap_or(u64::MAX).max(MIN_TIMEOUT_SECS);
        self
    }

    /// Point REST calls at a custom base URL (proxies, mock servers)
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Point NerdGraph calls at a custom endpoint
    #[must_use]
    pub fn with_nerdgraph_url(mut self, url: impl Into<String>) -> Self {
        self.nerdgraph_url = Some(url.into());
        self
    }

    /// Effective REST base URL (override > region)
    pub fn rest_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.region.rest_base_url())
    }

    /// Effective NerdGraph endpoint (override > region)
    pub fn nerdgraph_endpoint(&self) -> &str {
        self.nerdgraph_url
            .as_deref()
            .unwrap_or_else(|| self.region.nerdgraph_url())
    }

    /// Effective request timeout; a zero value from a config file is raised to 1s
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(MIN_TIMEOUT_SECS))
    }

    /// Default config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("newrelic-client").join("config.json"))
    }

    /// Load configuration from the default path, falling back to defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Could not read config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("cannot create {:?}: {}", parent, e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| Error::Config(format!("cannot write {:?}: {}", path, e)))?;

        Ok(())
    }

    /// Overlay values from a variable lookup (env > file)
    ///
    /// Takes the lookup as a function so callers decide where values come from.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.is_empty()) {
            self.personal_api_key = Some(key);
        }
        if let Some(key) = lookup(ENV_ADMIN_API_KEY).filter(|k| !k.is_empty()) {
            self.admin_api_key = Some(key);
        }
        if let Some(region) = lookup(ENV_REGION) {
            match region.parse() {
                Ok(region) => self.region = region,
                Err(_) => tracing::warn!("Ignoring invalid {} value", ENV_REGION),
            }
        }
        self
    }
}
