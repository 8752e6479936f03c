use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Who a NerdStorage document belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageScope {
    /// Shared by everyone in an account
    Account(u64),
    /// Private to the user owning the API key
    User,
    /// Attached to an entity GUID
    Entity(String),
}

impl StorageScope {
    /// Scope name as NerdGraph spells it
    pub fn name(&self) -> &'static str {
        match self {
            StorageScope::Account(_) => "ACCOUNT",
            StorageScope::User => "USER",
            StorageScope::Entity(_) => "ENTITY",
        }
    }
}

impl fmt::Display for StorageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageScope::Account(id) => write!(f, "account {}", id),
            StorageScope::User => f.write_str("user"),
            StorageScope::Entity(guid) => write!(f, "entity {}", guid),
        }
    }
}

/// `NerdStorageScopeInput` sent with writes and deletes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ScopeInput {
    pub id: String,
    pub name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCollectionInput {
    pub package_id: Uuid,
    pub collection: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDocumentInput {
    pub package_id: Uuid,
    pub collection: String,
    pub document_id: String,
}

/// A document to store; `document` is any serializable payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteDocumentInput<D> {
    pub package_id: Uuid,
    pub collection: String,
    pub document_id: String,
    pub document: D,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDocumentInput {
    pub package_id: Uuid,
    pub collection: String,
    pub document_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCollectionInput {
    pub package_id: Uuid,
    pub collection: String,
}

/// One entry of a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDocument {
    pub id: String,
    pub document: Value,
}
