//! Workload queries and mutations

use super::types::{CreateInput, DuplicateInput, UpdateInput, Workload};
use super::Workloads;
use crate::error::{Error, Result};
use serde_json::json;

impl Workloads {
    /// List every workload in an account
    pub async fn list_workloads(&self, account_id: u64) -> Result<Vec<Workload>> {
        let workloads: Option<Vec<Workload>> = self
            .client
            .query_at(
                WORKLOAD_LIST,
                json!({ "accountId": account_id }),
                "/actor/account/workload/collections",
            )
            .await?;
        Ok(workloads.unwrap_or_default())
    }

    pub async fn get_workload(&self, account_id: u64, guid: &str) -> Result<Workload> {
        let vars = json!({
            "accountId": account_id,
            "guid": guid,
        });
        let workload: Option<Workload> = self
            .client
            .query_at(WORKLOAD_GET, vars, "/actor/account/workload/collection")
            .await?;
        workload.ok_or_else(|| Error::NotFound(format!("no workload found for guid {}", guid)))
    }

    pub async fn create_workload(&self, account_id: u64, input: &CreateInput) -> Result<Workload> {
        let vars = json!({
            "accountId": account_id,
            "workload": input,
        });
        self.client
            .query_at(WORKLOAD_CREATE, vars, "/workloadCreate")
            .await
    }

    /// Copy the workload `input.source_guid` into `account_id`
    pub async fn duplicate_workload(
        &self,
        account_id: u64,
        input: &DuplicateInput,
    ) -> Result<Workload> {
        let workload = match &input.name {
            Some(name) => json!({ "name": name }),
            None => json!(null),
        };
        let vars = json!({
            "accountId": account_id,
            "sourceGuid": input.source_guid,
            "workload": workload,
        });
        self.client
            .query_at(WORKLOAD_DUPLICATE, vars, "/workloadDuplicate")
            .await
    }

    pub async fn update_workload(&self, guid: &str, input: &UpdateInput) -> Result<Workload> {
        let vars = json!({
            "guid": guid,
            "workload": input,
        });
        self.client
            .query_at(WORKLOAD_UPDATE, vars, "/workloadUpdate")
            .await
    }

    /// Delete a workload, returning it as it was before deletion
    pub async fn delete_workload(&self, guid: &str) -> Result<Workload> {
        self.client
            .query_at(WORKLOAD_DELETE, json!({ "guid": guid }), "/workloadDelete")
            .await
    }
}

macro_rules! workload_fields {
    () => {
        r#"
      accountId
      createdAt
      createdBy {
        email
        id
        name
      }
      entities {
        guid
      }
      entitySearchQueries {
        createdAt
        createdBy {
          email
          id
          name
        }
        id
        name
        query
        updatedAt
      }
      entitySearchQuery
      guid
      id
      name
      permalink
      scopeAccounts {
        accountIds
      }
      updatedAt"#
    };
}

const WORKLOAD_LIST: &str = concat!(
    "query($accountId: Int!) {\n  actor {\n    account(id: $accountId) {\n      workload {\n        collections {",
    workload_fields!(),
    "\n        }\n      }\n    }\n  }\n}"
);

const WORKLOAD_GET: &str = concat!(
    "query($accountId: Int!, $guid: EntityGuid!) {\n  actor {\n    account(id: $accountId) {\n      workload {\n        collection(guid: $guid) {",
    workload_fields!(),
    "\n        }\n      }\n    }\n  }\n}"
);

const WORKLOAD_CREATE: &str = concat!(
    "mutation($accountId: Int!, $workload: WorkloadCreateInput!) {\n  workloadCreate(accountId: $accountId, workload: $workload) {",
    workload_fields!(),
    "\n  }\n}"
);

const WORKLOAD_DUPLICATE: &str = concat!(
    "mutation($accountId: Int!, $sourceGuid: EntityGuid!, $workload: WorkloadDuplicateInput) {\n  workloadDuplicate(accountId: $accountId, sourceGuid: $sourceGuid, workload: $workload) {",
    workload_fields!(),
    "\n  }\n}"
);

const WORKLOAD_UPDATE: &str = concat!(
    "mutation($guid: EntityGuid!, $workload: WorkloadUpdateInput!) {\n  workloadUpdate(guid: $guid, workload: $workload) {",
    workload_fields!(),
    "\n  }\n}"
);

const WORKLOAD_DELETE: &str = concat!(
    "mutation($guid: EntityGuid!) {\n  workloadDelete(guid: $guid) {",
    workload_fields!(),
    "\n  }\n}"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workloads::{EntitySearchQueryInput, ScopeAccountsInput};

    #[test]
    fn test_create_input_wire_shape() {
        let input = CreateInput {
            name: "checkout".to_string(),
            entity_search_queries: vec![EntitySearchQueryInput {
                name: Some("hosts".to_string()),
                query: "name like 'checkout'".to_string(),
            }],
            scope_accounts: Some(ScopeAccountsInput {
                account_ids: vec![2508259],
            }),
            ..CreateInput::default()
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "name": "checkout",
                "entitySearchQueries": [{ "name": "hosts", "query": "name like 'checkout'" }],
                "scopeAccounts": { "accountIds": [2508259] }
            })
        );
    }

    #[test]
    fn test_update_input_omits_unset_fields() {
        let input = UpdateInput {
            name: Some("renamed".to_string()),
            ..UpdateInput::default()
        };
        assert_eq!(serde_json::to_value(&input).unwrap(), json!({ "name": "renamed" }));
    }

    #[test]
    fn test_queries_are_balanced() {
        for query in [
            WORKLOAD_LIST,
            WORKLOAD_GET,
            WORKLOAD_CREATE,
            WORKLOAD_DUPLICATE,
            WORKLOAD_UPDATE,
            WORKLOAD_DELETE,
        ] {
            assert_eq!(query.matches('{').count(), query.matches('}').count());
        }
    }
}
