//! API access key types mirroring the NerdGraph schema

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Kind of API access key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiAccessKeyType {
    Ingest,
    User,
}

impl fmt::Display for ApiAccessKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ApiAccessKeyType::Ingest => "INGEST",
            ApiAccessKeyType::User => "USER",
        })
    }
}

impl FromStr for ApiAccessKeyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INGEST" => Ok(ApiAccessKeyType::Ingest),
            "USER" => Ok(ApiAccessKeyType::User),
            other => Err(Error::InvalidInput(format!("unknown key type: {}", other))),
        }
    }
}

/// Kind of ingest key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiAccessIngestKeyType {
    Browser,
    License,
}

/// An ingest or user key; variant-specific fields are optional
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAccessKey {
    pub id: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub key_type: ApiAccessKeyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingest_type: Option<ApiAccessIngestKeyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAccessCreateIngestKeyInput {
    pub account_id: u64,
    pub ingest_type: ApiAccessIngestKeyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAccessCreateUserKeyInput {
    pub account_id: u64,
    pub user_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Keys to create; both lists may target several accounts at once
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiAccessCreateInput {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingest: Vec<ApiAccessCreateIngestKeyInput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user: Vec<ApiAccessCreateUserKeyInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAccessUpdateKeyInput {
    pub key_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiAccessUpdateInput {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingest: Vec<ApiAccessUpdateKeyInput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user: Vec<ApiAccessUpdateKeyInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAccessDeleteInput {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingest_key_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_key_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiAccessDeletedKey {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAccessKeySearchScope {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub account_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingest_types: Vec<ApiAccessIngestKeyType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_ids: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiAccessKeySearchQuery {
    #[serde(default)]
    pub scope: ApiAccessKeySearchScope,
    pub types: Vec<ApiAccessKeyType>,
}

/// Per-key error reported inside a mutation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAccessKeyError {
    pub message: String,
    #[serde(rename = "type")]
    pub key_type: ApiAccessKeyType,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub account_id: Option<u64>,
    #[serde(default)]
    pub ingest_type: Option<ApiAccessIngestKeyType>,
    #[serde(default)]
    pub ingest_error_type: Option<String>,
    #[serde(default)]
    pub user_error_type: Option<String>,
    #[serde(default)]
    pub user_id: Option<u64>,
}
