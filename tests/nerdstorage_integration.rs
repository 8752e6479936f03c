//! Integration tests for NerdStorage using wiremock

mod common;

use common::{client_for, graphql_data, ACCOUNT_ID};
use newrelic_client::nerdstorage::{
    DeleteCollectionInput, DeleteDocumentInput, GetCollectionInput, GetDocumentInput,
    NerdStorage, StorageScope, WriteDocumentInput, PACKAGE_ID_HEADER,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PACKAGE_ID: &str = "ecaeb28c-7b3f-4932-9e33-7385980efa1c";

fn package_id() -> Uuid {
    Uuid::parse_str(PACKAGE_ID).unwrap()
}

fn storage(server: &MockServer) -> NerdStorage {
    NerdStorage::new(client_for(server))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Prefs {
    theme: String,
    columns: u32,
}

#[tokio::test]
async fn test_get_account_document_sends_package_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header(PACKAGE_ID_HEADER, PACKAGE_ID))
        .and(body_partial_json(json!({
            "variables": { "accountId": ACCOUNT_ID, "collection": "prefs", "documentId": "main" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "actor": {
                "account": { "nerdStorage": { "document": { "theme": "dark", "columns": 3 } } }
            }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let input = GetDocumentInput {
        package_id: package_id(),
        collection: "prefs".to_string(),
        document_id: "main".to_string(),
    };
    let prefs: Prefs = storage(&server)
        .get_document(&StorageScope::Account(ACCOUNT_ID), &input)
        .await
        .unwrap();
    assert_eq!(
        prefs,
        Prefs {
            theme: "dark".to_string(),
            columns: 3
        }
    );
}

#[tokio::test]
async fn test_missing_document_decodes_as_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "actor": { "nerdStorage": { "document": null } }
        }))))
        .mount(&server)
        .await;

    let input = GetDocumentInput {
        package_id: package_id(),
        collection: "prefs".to_string(),
        document_id: "absent".to_string(),
    };
    let prefs: Option<Prefs> = storage(&server)
        .get_document(&StorageScope::User, &input)
        .await
        .unwrap();
    assert!(prefs.is_none());
}

#[tokio::test]
async fn test_get_entity_collection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header(PACKAGE_ID_HEADER, PACKAGE_ID))
        .and(body_partial_json(json!({
            "variables": { "entityGuid": "ENTITY-1", "collection": "notes" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "actor": { "entity": { "nerdStorage": { "collection": [
                { "id": "a", "document": { "text": "first" } },
                { "id": "b", "document": { "text": "second" } }
            ] } } }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let input = GetCollectionInput {
        package_id: package_id(),
        collection: "notes".to_string(),
    };
    let documents = storage(&server)
        .get_collection(&StorageScope::Entity("ENTITY-1".to_string()), &input)
        .await
        .unwrap();

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].id, "a");
    assert_eq!(documents[1].document, json!({ "text": "second" }));
}

#[tokio::test]
async fn test_empty_collection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "actor": { "account": { "nerdStorage": { "collection": null } } }
        }))))
        .mount(&server)
        .await;

    let input = GetCollectionInput {
        package_id: package_id(),
        collection: "empty".to_string(),
    };
    let documents = storage(&server)
        .get_collection(&StorageScope::Account(ACCOUNT_ID), &input)
        .await
        .unwrap();
    assert!(documents.is_empty());
}

#[tokio::test]
async fn test_write_account_document() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header(PACKAGE_ID_HEADER, PACKAGE_ID))
        .and(body_string_contains("nerdStorageWriteDocument"))
        .and(body_partial_json(json!({
            "variables": {
                "collection": "prefs",
                "documentId": "main",
                "document": { "theme": "light", "columns": 2 },
                "scope": { "id": ACCOUNT_ID.to_string(), "name": "ACCOUNT" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "nerdStorageWriteDocument": { "theme": "light", "columns": 2 }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let input = WriteDocumentInput {
        package_id: package_id(),
        collection: "prefs".to_string(),
        document_id: "main".to_string(),
        document: Prefs {
            theme: "light".to_string(),
            columns: 2,
        },
    };
    let saved = storage(&server)
        .write_document(&StorageScope::Account(ACCOUNT_ID), &input)
        .await
        .unwrap();
    assert_eq!(saved, json!({ "theme": "light", "columns": 2 }));
}

/// User scope looks up the current user id before mutating
#[tokio::test]
async fn test_user_scope_resolves_user_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("user { id }"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "actor": { "user": { "id": 42 } }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("nerdStorageDeleteDocument"))
        .and(body_partial_json(json!({
            "variables": { "scope": { "id": "42", "name": "USER" }, "documentId": "main" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "nerdStorageDeleteDocument": { "deleted": 1 }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let input = DeleteDocumentInput {
        package_id: package_id(),
        collection: "prefs".to_string(),
        document_id: "main".to_string(),
    };
    let deleted = storage(&server)
        .delete_document(&StorageScope::User, &input)
        .await
        .unwrap();
    assert!(deleted);
}

#[tokio::test]
async fn test_delete_collection_reports_nothing_removed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("nerdStorageDeleteCollection"))
        .and(body_partial_json(json!({
            "variables": { "collection": "old", "scope": { "id": "ENTITY-1", "name": "ENTITY" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "nerdStorageDeleteCollection": { "deleted": 0 }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let input = DeleteCollectionInput {
        package_id: package_id(),
        collection: "old".to_string(),
    };
    let deleted = storage(&server)
        .delete_collection(&StorageScope::Entity("ENTITY-1".to_string()), &input)
        .await
        .unwrap();
    assert!(!deleted);
}
