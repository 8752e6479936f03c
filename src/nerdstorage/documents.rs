//! NerdStorage queries and mutations

use super::types::{
    CollectionDocument, DeleteCollectionInput, DeleteDocumentInput, GetCollectionInput,
    GetDocumentInput, ScopeInput, StorageScope, WriteDocumentInput,
};
use super::NerdStorage;
use crate::error::{Error, Result};
use crate::transport::graphql::{pluck, GraphQlRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// Header naming the Nerdpack that owns the stored data
pub const PACKAGE_ID_HEADER: &str = "NewRelic-Package-Id";

impl NerdStorage {
    pub async fn get_collection(
        &self,
        scope: &StorageScope,
        input: &GetCollectionInput,
    ) -> Result<Vec<CollectionDocument>> {
        let (query, pointer) = match scope {
            StorageScope::Account(_) => {
                (ACCOUNT_COLLECTION, "/actor/account/nerdStorage/collection")
            }
            StorageScope::User => (USER_COLLECTION, "/actor/nerdStorage/collection"),
            StorageScope::Entity(_) => {
                (ENTITY_COLLECTION, "/actor/entity/nerdStorage/collection")
            }
        };
        let mut vars = read_variables(scope);
        vars.insert("collection".into(), json!(input.collection));

        let data = self.send(input.package_id, query, Value::Object(vars)).await?;
        let documents: Option<Vec<CollectionDocument>> = pluck(&data, pointer)?;
        Ok(documents.unwrap_or_default())
    }

    /// Read a document and decode it into `T`
    ///
    /// Missing documents come back as `null`, so use `Option<T>` or `Value`
    /// when absence is expected.
    pub async fn get_document<T: DeserializeOwned>(
        &self,
        scope: &StorageScope,
        input: &GetDocumentInput,
    ) -> Result<T> {
        let (query, pointer) = match scope {
            StorageScope::Account(_) => (ACCOUNT_DOCUMENT, "/actor/account/nerdStorage/document"),
            StorageScope::User => (USER_DOCUMENT, "/actor/nerdStorage/document"),
            StorageScope::Entity(_) => (ENTITY_DOCUMENT, "/actor/entity/nerdStorage/document"),
        };
        let mut vars = read_variables(scope);
        vars.insert("collection".into(), json!(input.collection));
        vars.insert("documentId".into(), json!(input.document_id));

        let data = self.send(input.package_id, query, Value::Object(vars)).await?;
        pluck(&data, pointer)
    }

    /// Store a document, returning it as NerdStorage saved it
    pub async fn write_document<D: Serialize>(
        &self,
        scope: &StorageScope,
        input: &WriteDocumentInput<D>,
    ) -> Result<Value> {
        let scope = self.scope_input(scope).await?;
        let vars = json!({
            "collection": input.collection,
            "document": input.document,
            "documentId": input.document_id,
            "scope": scope,
        });

        let data = self.send(input.package_id, WRITE_DOCUMENT, vars).await?;
        pluck(&data, "/nerdStorageWriteDocument")
    }

    /// Delete a document; `true` when something was removed
    pub async fn delete_document(
        &self,
        scope: &StorageScope,
        input: &DeleteDocumentInput,
    ) -> Result<bool> {
        let scope = self.scope_input(scope).await?;
        let vars = json!({
            "collection": input.collection,
            "documentId": input.document_id,
            "scope": scope,
        });

        let data = self.send(input.package_id, DELETE_DOCUMENT, vars).await?;
        let deleted: u64 = pluck(&data, "/nerdStorageDeleteDocument/deleted")?;
        Ok(deleted > 0)
    }

    /// Delete a whole collection; `true` when something was removed
    pub async fn delete_collection(
        &self,
        scope: &StorageScope,
        input: &DeleteCollectionInput,
    ) -> Result<bool> {
        let scope = self.scope_input(scope).await?;
        let vars = json!({
            "collection": input.collection,
            "scope": scope,
        });

        let data = self.send(input.package_id, DELETE_COLLECTION, vars).await?;
        let deleted: u64 = pluck(&data, "/nerdStorageDeleteCollection/deleted")?;
        Ok(deleted > 0)
    }

    async fn send(&self, package_id: Uuid, query: &str, vars: Value) -> Result<Value> {
        let request = GraphQlRequest::new(query, vars)
            .with_header(PACKAGE_ID_HEADER, package_id.to_string());
        self.client.send_graphql(request).await
    }

    /// Build `NerdStorageScopeInput`, resolving the user id for user scope
    async fn scope_input(&self, scope: &StorageScope) -> Result<ScopeInput> {
        let id = match scope {
            StorageScope::Account(id) => id.to_string(),
            StorageScope::Entity(guid) => guid.clone(),
            StorageScope::User => {
                let id: Option<u64> = self
                    .client
                    .query_at(CURRENT_USER_ID, json!({}), "/actor/user/id")
                    .await?;
                id.ok_or_else(|| {
                    Error::InvalidResponse("could not resolve the current user id".to_string())
                })?
                .to_string()
            }
        };

        Ok(ScopeInput {
            id,
            name: scope.name(),
        })
    }
}

/// Scope-specific variables for read queries
fn read_variables(scope: &StorageScope) -> Map<String, Value> {
    let mut vars = Map::new();
    match scope {
        StorageScope::Account(id) => {
            vars.insert("accountId".into(), json!(id));
        }
        StorageScope::Entity(guid) => {
            vars.insert("entityGuid".into(), json!(guid));
        }
        StorageScope::User => {}
    }
    vars
}

const CURRENT_USER_ID: &str = "query { actor { user { id } } }";

const ACCOUNT_DOCUMENT: &str = r#"query($accountId: Int!, $collection: String!, $documentId: String!) {
  actor {
    account(id: $accountId) {
      nerdStorage {
        document(collection: $collection, documentId: $documentId)
      }
    }
  }
}"#;

const USER_DOCUMENT: &str = r#"query($collection: String!, $documentId: String!) {
  actor {
    nerdStorage {
      document(collection: $collection, documentId: $documentId)
    }
  }
}"#;

const ENTITY_DOCUMENT: &str = r#"query($entityGuid: EntityGuid!, $collection: String!, $documentId: String!) {
  actor {
    entity(guid: $entityGuid) {
      nerdStorage {
        document(collection: $collection, documentId: $documentId)
      }
    }
  }
}"#;

const ACCOUNT_COLLECTION: &str = r#"query($accountId: Int!, $collection: String!) {
  actor {
    account(id: $accountId) {
      nerdStorage {
        collection(collection: $collection) {
          id
          document
        }
      }
    }
  }
}"#;

const USER_COLLECTION: &str = r#"query($collection: String!) {
  actor {
    nerdStorage {
      collection(collection: $collection) {
        id
        document
      }
    }
  }
}"#;

const ENTITY_COLLECTION: &str = r#"query($entityGuid: EntityGuid!, $collection: String!) {
  actor {
    entity(guid: $entityGuid) {
      nerdStorage {
        collection(collection: $collection) {
          id
          document
        }
      }
    }
  }
}"#;

const WRITE_DOCUMENT: &str = r#"mutation($collection: String!, $document: NerdStorageDocument!, $documentId: String!, $scope: NerdStorageScopeInput!) {
  nerdStorageWriteDocument(collection: $collection, document: $document, documentId: $documentId, scope: $scope)
}"#;

const DELETE_DOCUMENT: &str = r#"mutation($collection: String!, $documentId: String!, $scope: NerdStorageScopeInput!) {
  nerdStorageDeleteDocument(collection: $collection, documentId: $documentId, scope: $scope) {
    deleted
  }
}"#;

const DELETE_COLLECTION: &str = r#"mutation($collection: String!, $scope: NerdStorageScopeInput!) {
  nerdStorageDeleteCollection(collection: $collection, scope: $scope) {
    deleted
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_variables_per_scope() {
        assert_eq!(
            Value::Object(read_variables(&StorageScope::Account(7))),
            json!({ "accountId": 7 })
        );
        assert_eq!(
            Value::Object(read_variables(&StorageScope::Entity("MXxBUE18".to_string()))),
            json!({ "entityGuid": "MXxBUE18" })
        );
        assert!(read_variables(&StorageScope::User).is_empty());
    }

    #[test]
    fn test_scope_input_shape() {
        let input = ScopeInput {
            id: "7".to_string(),
            name: StorageScope::Account(7).name(),
        };
        assert_eq!(
            serde_json::to_value(input).unwrap(),
            json!({ "id": "7", "name": "ACCOUNT" })
        );
    }
}
