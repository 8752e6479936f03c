//! Integration tests for workloads using wiremock

mod common;

use common::{graphql_data, newrelic_for, ACCOUNT_ID};
use newrelic_client::workloads::{
    CreateInput, DuplicateInput, EntitySearchQueryInput, ScopeAccountsInput, UpdateInput,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GUID: &str = "MjUwODI1OXxOUjF8V09SS0xPQUR8MTIzNA";

fn workload(guid: &str, name: &str) -> serde_json::Value {
    json!({
        "guid": guid,
        "id": 1234,
        "accountId": ACCOUNT_ID,
        "name": name,
        "permalink": format!("https://one.newrelic.com/redirect/entity/{}", guid),
        "scopeAccounts": { "accountIds": [ACCOUNT_ID] },
        "entitySearchQueries": [{
            "id": 7,
            "name": "hosts",
            "query": "type = 'HOST'",
            "createdAt": 1_600_000_000_000i64
        }],
        "entitySearchQuery": "(type = 'HOST')",
        "entities": [{ "guid": "ENTITY-1" }],
        "createdBy": { "email": "ops@example.com", "id": 42, "name": "Ops" },
        "createdAt": 1_600_000_000_000i64,
        "updatedAt": 1_600_000_100_000i64
    })
}

#[tokio::test]
async fn test_list_workloads() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": { "accountId": ACCOUNT_ID } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "actor": { "account": { "workload": { "collections": [
                workload(GUID, "Checkout"),
                workload("OTHER", "Search")
            ] } } }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let workloads = newrelic_for(&server)
        .workloads
        .list_workloads(ACCOUNT_ID)
        .await
        .unwrap();

    assert_eq!(workloads.len(), 2);
    let first = &workloads[0];
    assert_eq!(first.name, "Checkout");
    assert_eq!(first.entities[0].guid, "ENTITY-1");
    assert_eq!(first.entity_search_queries[0].query, "type = 'HOST'");
    assert_eq!(first.scope_accounts.as_ref().unwrap().account_ids, vec![ACCOUNT_ID]);
    assert_eq!(first.created_by.as_ref().unwrap().id, Some(42));
    assert_eq!(first.created_at.unwrap().timestamp(), 1_600_000_000);
}

#[tokio::test]
async fn test_list_workloads_null_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "actor": { "account": { "workload": { "collections": null } } }
        }))))
        .mount(&server)
        .await;

    let workloads = newrelic_for(&server)
        .workloads
        .list_workloads(ACCOUNT_ID)
        .await
        .unwrap();
    assert!(workloads.is_empty());
}

#[tokio::test]
async fn test_get_workload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": { "guid": GUID } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "actor": { "account": { "workload": { "collection": workload(GUID, "Checkout") } } }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let workload = newrelic_for(&server)
        .workloads
        .get_workload(ACCOUNT_ID, GUID)
        .await
        .unwrap();
    assert_eq!(workload.guid, GUID);
    assert_eq!(workload.entity_search_query.as_deref(), Some("(type = 'HOST')"));
}

#[tokio::test]
async fn test_get_missing_workload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "actor": { "account": { "workload": { "collection": null } } }
        }))))
        .mount(&server)
        .await;

    let err = newrelic_for(&server)
        .workloads
        .get_workload(ACCOUNT_ID, "missing")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_create_workload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("workloadCreate"))
        .and(body_partial_json(json!({
            "variables": {
                "accountId": ACCOUNT_ID,
                "workload": {
                    "name": "Checkout",
                    "entityGuids": ["ENTITY-1"],
                    "entitySearchQueries": [{ "query": "type = 'HOST'" }],
                    "scopeAccounts": { "accountIds": [ACCOUNT_ID] }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "workloadCreate": workload(GUID, "Checkout")
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let input = CreateInput {
        name: "Checkout".to_string(),
        entity_guids: vec!["ENTITY-1".to_string()],
        entity_search_queries: vec![EntitySearchQueryInput {
            name: None,
            query: "type = 'HOST'".to_string(),
        }],
        scope_accounts: Some(ScopeAccountsInput {
            account_ids: vec![ACCOUNT_ID],
        }),
    };
    let created = newrelic_for(&server)
        .workloads
        .create_workload(ACCOUNT_ID, &input)
        .await
        .unwrap();
    assert_eq!(created.name, input.name);
}

#[tokio::test]
async fn test_duplicate_with_and_without_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("workloadDuplicate"))
        .and(body_partial_json(json!({
            "variables": { "sourceGuid": GUID, "workload": { "name": "Copy" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "workloadDuplicate": workload("COPY", "Copy")
        }))))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": { "sourceGuid": GUID, "workload": null }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "workloadDuplicate": workload("COPY2", "Checkout copy")
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = newrelic_for(&server);
    let named = client
        .workloads
        .duplicate_workload(
            ACCOUNT_ID,
            &DuplicateInput {
                source_guid: GUID.to_string(),
                name: Some("Copy".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(named.guid, "COPY");

    let unnamed = client
        .workloads
        .duplicate_workload(
            ACCOUNT_ID,
            &DuplicateInput {
                source_guid: GUID.to_string(),
                name: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(unnamed.guid, "COPY2");
}

#[tokio::test]
async fn test_update_only_sends_given_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("workloadUpdate"))
        .and(body_partial_json(json!({
            "variables": { "guid": GUID, "workload": { "name": "Renamed" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "workloadUpdate": workload(GUID, "Renamed")
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let input = UpdateInput {
        name: Some("Renamed".to_string()),
        ..UpdateInput::default()
    };
    assert_eq!(
        serde_json::to_value(&input).unwrap(),
        json!({ "name": "Renamed" })
    );

    let updated = newrelic_for(&server)
        .workloads
        .update_workload(GUID, &input)
        .await
        .unwrap();
    assert_eq!(updated.name, "Renamed");
}

#[tokio::test]
async fn test_delete_workload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("workloadDelete"))
        .and(body_partial_json(json!({ "variables": { "guid": GUID } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "workloadDelete": workload(GUID, "Checkout")
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = newrelic_for(&server)
        .workloads
        .delete_workload(GUID)
        .await
        .unwrap();
    assert_eq!(deleted.guid, GUID);
}
