//! API key authentication
//!
//! REST v2 accepts an admin key (`X-Api-Key`) or a personal key (`Api-Key`);
//! NerdGraph only accepts the personal key.

use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::RequestBuilder;
use std::fmt;

/// Header carrying an admin API key
pub const ADMIN_KEY_HEADER: &str = "X-Api-Key";
/// Header carrying a personal (user) API key
pub const PERSONAL_KEY_HEADER: &str = "Api-Key";

/// API keys holder
#[derive(Clone, Default)]
pub struct ApiCredentials {
    personal_api_key: Option<String>,
    admin_api_key: Option<String>,
}

impl ApiCredentials {
    pub fn new(personal_api_key: Option<String>, admin_api_key: Option<String>) -> Self {
        Self {
            personal_api_key: personal_api_key.filter(|k| !k.is_empty()),
            admin_api_key: admin_api_key.filter(|k| !k.is_empty()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.personal_api_key.clone(), config.admin_api_key.clone())
    }

    /// Header name and value used for REST v2 calls (admin key preferred)
    pub fn rest_header(&self) -> Result<(&'static str, &str)> {
        if let Some(key) = self.admin_api_key.as_deref() {
            return Ok((ADMIN_KEY_HEADER, key));
        }
        if let Some(key) = self.personal_api_key.as_deref() {
            return Ok((PERSONAL_KEY_HEADER, key));
        }
        Err(Error::Config(
            "an admin or personal API key is required for REST calls".to_string(),
        ))
    }

    /// Header name and value used for NerdGraph calls
    pub fn nerdgraph_header(&self) -> Result<(&'static str, &str)> {
        self.personal_api_key
            .as_deref()
            .map(|key| (PERSONAL_KEY_HEADER, key))
            .ok_or_else(|| {
                Error::Config("a personal API key is required for NerdGraph calls".to_string())
            })
    }

    /// Attach REST credentials to a request
    pub fn authorize_rest(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let (name, value) = self.rest_header()?;
        Ok(builder.header(name, value))
    }

    /// Attach NerdGraph credentials to a request
    pub fn authorize_nerdgraph(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let (name, value) = self.nerdgraph_header()?;
        Ok(builder.header(name, value))
    }
}

// Security: keys must not end up in logs via {:?}
impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("personal_api_key", &self.personal_api_key.is_some())
            .field("admin_api_key", &self.admin_api_key.is_some())
            .finish()
    }
}
