use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A workload collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workload {
    pub guid: String,
    pub id: u64,
    pub account_id: u64,
    pub name: String,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub scope_accounts: Option<ScopeAccounts>,
    #[serde(default)]
    pub entity_search_queries: Vec<EntitySearchQuery>,
    /// Combined query NerdGraph derives from the entity search queries
    #[serde(default)]
    pub entity_search_query: Option<String>,
    #[serde(default)]
    pub entities: Vec<EntityRef>,
    #[serde(default)]
    pub created_by: Option<UserReference>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeAccounts {
    #[serde(default)]
    pub account_ids: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySearchQuery {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    pub query: String,
    #[serde(default)]
    pub created_by: Option<UserReference>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub guid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReference {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeAccountsInput {
    pub account_ids: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySearchQueryInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub query: String,
}

/// Input for `workloadCreate`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_guids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_search_queries: Vec<EntitySearchQueryInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_accounts: Option<ScopeAccountsInput>,
}

/// Input for `workloadUpdate`; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_guids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_search_queries: Option<Vec<EntitySearchQueryInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_accounts: Option<ScopeAccountsInput>,
}

/// Copy an existing workload, optionally under a new name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateInput {
    pub source_guid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
