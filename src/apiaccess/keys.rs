//! API access key queries and mutations

use super::types::{
    ApiAccessCreateInput, ApiAccessDeleteInput, ApiAccessDeletedKey, ApiAccessKey,
    ApiAccessKeyError, ApiAccessKeySearchQuery, ApiAccessKeyType, ApiAccessUpdateInput,
};
use super::ApiAccess;
use crate::error::{Error, Result};
use crate::pagination::{paginate_cursor, CursorPage};
use serde::Deserialize;
use serde_json::json;
use std::fmt::Write;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateKeysPayload {
    #[serde(default)]
    created_keys: Vec<ApiAccessKey>,
    #[serde(default)]
    errors: Vec<ApiAccessKeyError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateKeysPayload {
    #[serde(default)]
    updated_keys: Vec<ApiAccessKey>,
    #[serde(default)]
    errors: Vec<ApiAccessKeyError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteKeysPayload {
    #[serde(default)]
    deleted_keys: Vec<ApiAccessDeletedKey>,
    #[serde(default)]
    errors: Vec<ApiAccessKeyError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeySearchPage {
    #[serde(default)]
    keys: Vec<ApiAccessKey>,
    #[serde(default)]
    next_cursor: Option<String>,
}

/// One `"{type}: {message}"` line per mutation error
pub fn format_mutation_errors(errors: &[ApiAccessKeyError]) -> String {
    let mut out = String::new();
    for e in errors {
        let _ = writeln!(out, "{}: {}", e.key_type, e.message);
    }
    out
}

fn check_mutation_errors(errors: &[ApiAccessKeyError]) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    tracing::warn!("API access mutation reported {} errors", errors.len());
    Err(Error::Mutation(format_mutation_errors(errors)))
}

impl ApiAccess {
    /// Create keys, possibly for several accounts at once
    pub async fn create_api_access_keys(
        &self,
        keys: &ApiAccessCreateInput,
    ) -> Result<Vec<ApiAccessKey>> {
        let payload: CreateKeysPayload = self
            .client
            .query_at(API_ACCESS_CREATE_KEYS, json!({ "keys": keys }), "/apiAccessCreateKeys")
            .await?;
        check_mutation_errors(&payload.errors)?;
        Ok(payload.created_keys)
    }

    pub async fn get_api_access_key(
        &self,
        key_id: &str,
        key_type: ApiAccessKeyType,
    ) -> Result<ApiAccessKey> {
        let vars = json!({
            "id": key_id,
            "keyType": key_type,
        });
        let key: Option<ApiAccessKey> = self
            .client
            .query_at(API_ACCESS_GET_KEY, vars, "/actor/apiAccess/key")
            .await?;
        key.ok_or_else(|| Error::NotFound(format!("no {} key found for id {}", key_type, key_id)))
    }

    /// Search keys visible to the current user, following `nextCursor`
    pub async fn search_api_access_keys(
        &self,
        query: &ApiAccessKeySearchQuery,
    ) -> Result<Vec<ApiAccessKey>> {
        paginate_cursor(|cursor| async move {
            let vars = json!({
                "cursor": cursor,
                "query": query,
            });
            let page: KeySearchPage = self
                .client
                .query_at(API_ACCESS_KEY_SEARCH, vars, "/actor/apiAccess/keySearch")
                .await?;
            Ok(CursorPage::new(page.keys, page.next_cursor))
        })
        .await
    }

    /// Update keys, possibly for several accounts at once
    pub async fn update_api_access_keys(
        &self,
        keys: &ApiAccessUpdateInput,
    ) -> Result<Vec<ApiAccessKey>> {
        let payload: UpdateKeysPayload = self
            .client
            .query_at(API_ACCESS_UPDATE_KEYS, json!({ "keys": keys }), "/apiAccessUpdateKeys")
            .await?;
        check_mutation_errors(&payload.errors)?;
        Ok(payload.updated_keys)
    }

    pub async fn delete_api_access_keys(
        &self,
        keys: &ApiAccessDeleteInput,
    ) -> Result<Vec<ApiAccessDeletedKey>> {
        let payload: DeleteKeysPayload = self
            .client
            .query_at(API_ACCESS_DELETE_KEYS, json!({ "keys": keys }), "/apiAccessDeleteKeys")
            .await?;
        check_mutation_errors(&payload.errors)?;
        Ok(payload.deleted_keys)
    }
}

macro_rules! key_fields {
    () => {
        r#"
      id
      key
      name
      notes
      type
      ... on ApiAccessIngestKey {
        accountId
        createdAt
        ingestType
      }
      ... on ApiAccessUserKey {
        accountId
        createdAt
        userId
      }"#
    };
}

macro_rules! key_error_fields {
    () => {
        r#"
    errors {
      message
      type
      ... on ApiAccessIngestKeyError {
        id
        ingestErrorType: errorType
        accountId
        ingestType
      }
      ... on ApiAccessUserKeyError {
        id
        accountId
        userErrorType: errorType
        userId
      }
    }"#
    };
}

const API_ACCESS_CREATE_KEYS: &str = concat!(
    "mutation($keys: ApiAccessCreateInput!) {\n  apiAccessCreateKeys(keys: $keys) {\n    createdKeys {",
    key_fields!(),
    "\n    }",
    key_error_fields!(),
    "\n  }\n}"
);

const API_ACCESS_UPDATE_KEYS: &str = concat!(
    "mutation($keys: ApiAccessUpdateInput!) {\n  apiAccessUpdateKeys(keys: $keys) {\n    updatedKeys {",
    key_fields!(),
    "\n    }",
    key_error_fields!(),
    "\n  }\n}"
);

const API_ACCESS_DELETE_KEYS: &str = concat!(
    "mutation($keys: ApiAccessDeleteInput!) {\n  apiAccessDeleteKeys(keys: $keys) {\n    deletedKeys {\n      id\n    }",
    key_error_fields!(),
    "\n  }\n}"
);

const API_ACCESS_GET_KEY: &str = concat!(
    "query($id: ID!, $keyType: ApiAccessKeyType!) {\n  actor {\n    apiAccess {\n      key(id: $id, keyType: $keyType) {",
    key_fields!(),
    "\n      }\n    }\n  }\n}"
);

const API_ACCESS_KEY_SEARCH: &str = concat!(
    "query($cursor: String, $query: ApiAccessKeySearchQuery!) {\n  actor {\n    apiAccess {\n      keySearch(cursor: $cursor, query: $query) {\n        nextCursor\n        keys {",
    key_fields!(),
    "\n        }\n      }\n    }\n  }\n}"
);
