//! Command dispatch
//!
//! Maps parsed CLI commands onto client calls and returns the result as JSON
//! for the output writer.

use crate::cli::{
    Command, KeyCommand, OutputFormat, PolicyCommand, StorageCommand, WorkloadCommand,
};
use anyhow::{Context, Result};
use newrelic_client::alerts::{AlertsPoliciesSearchCriteriaInput, ListPoliciesParams, Policy};
use newrelic_client::apiaccess::{
    ApiAccessDeleteInput, ApiAccessKeySearchQuery, ApiAccessKeySearchScope, ApiAccessKeyType,
};
use newrelic_client::nerdstorage::{
    DeleteCollectionInput, DeleteDocumentInput, GetCollectionInput, GetDocumentInput,
    WriteDocumentInput,
};
use newrelic_client::workloads::DuplicateInput;
use newrelic_client::NewRelic;
use serde::Serialize;
use serde_json::{json, Value};

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).context("Failed to serialize result")
}

/// Execute a command against the API
pub async fn run(client: &NewRelic, command: Command) -> Result<Value> {
    match command {
        Command::Policies(cmd) => run_policies(client, cmd).await,
        Command::Keys(cmd) => run_keys(client, cmd).await,
        Command::Workloads(cmd) => run_workloads(client, cmd).await,
        Command::Storage(cmd) => run_storage(client, cmd).await,
    }
}

async fn run_policies(client: &NewRelic, cmd: PolicyCommand) -> Result<Value> {
    let alerts = &client.alerts;
    match cmd {
        PolicyCommand::List { name } => {
            let params = ListPoliciesParams { name };
            to_json(alerts.list_policies(Some(&params)).await?)
        }
        PolicyCommand::Get { id } => to_json(alerts.get_policy(id).await?),
        PolicyCommand::Create {
            name,
            incident_preference,
        } => {
            let policy = Policy {
                name,
                incident_preference: Some(incident_preference),
                ..Policy::default()
            };
            to_json(alerts.create_policy(&policy).await?)
        }
        PolicyCommand::Update {
            id,
            name,
            incident_preference,
        } => {
            let mut policy = alerts.get_policy(id).await?;
            if let Some(name) = name {
                policy.name = name;
            }
            if incident_preference.is_some() {
                policy.incident_preference = incident_preference;
            }
            policy.created_at = None;
            policy.updated_at = None;
            to_json(alerts.update_policy(&policy).await?)
        }
        PolicyCommand::Delete { id } => to_json(alerts.delete_policy(id).await?),
        PolicyCommand::Search { account_id, ids } => {
            let criteria = AlertsPoliciesSearchCriteriaInput { ids };
            to_json(alerts.query_policy_search(account_id, &criteria).await?)
        }
    }
}

async fn run_keys(client: &NewRelic, cmd: KeyCommand) -> Result<Value> {
    let api_access = &client.api_access;
    match cmd {
        KeyCommand::Search { account_ids, types } => {
            let types = if types.is_empty() {
                vec![ApiAccessKeyType::Ingest, ApiAccessKeyType::User]
            } else {
                types
            };
            let query = ApiAccessKeySearchQuery {
                scope: ApiAccessKeySearchScope {
                    account_ids,
                    ..ApiAccessKeySearchScope::default()
                },
                types,
            };
            to_json(api_access.search_api_access_keys(&query).await?)
        }
        KeyCommand::Get { id, key_type } => {
            to_json(api_access.get_api_access_key(&id, key_type).await?)
        }
        KeyCommand::Delete {
            ingest_key_ids,
            user_key_ids,
        } => {
            if ingest_key_ids.is_empty() && user_key_ids.is_empty() {
                anyhow::bail!("Pass at least one --ingest or --user key id");
            }
            let input = ApiAccessDeleteInput {
                ingest_key_ids,
                user_key_ids,
            };
            to_json(api_access.delete_api_access_keys(&input).await?)
        }
    }
}

async fn run_workloads(client: &NewRelic, cmd: WorkloadCommand) -> Result<Value> {
    let workloads = &client.workloads;
    match cmd {
        WorkloadCommand::List { account_id } => {
            to_json(workloads.list_workloads(account_id).await?)
        }
        WorkloadCommand::Get { account_id, guid } => {
            to_json(workloads.get_workload(account_id, &guid).await?)
        }
        WorkloadCommand::Duplicate {
            account_id,
            source_guid,
            name,
        } => {
            let input = DuplicateInput { source_guid, name };
            to_json(workloads.duplicate_workload(account_id, &input).await?)
        }
        WorkloadCommand::Delete { guid } => to_json(workloads.delete_workload(&guid).await?),
    }
}

async fn run_storage(client: &NewRelic, cmd: StorageCommand) -> Result<Value> {
    let storage = &client.nerdstorage;
    match cmd {
        StorageCommand::GetDocument {
            scope,
            package_id,
            collection,
            document_id,
        } => {
            let input = GetDocumentInput {
                package_id,
                collection,
                document_id,
            };
            storage
                .get_document::<Value>(&scope.scope(), &input)
                .await
                .map_err(Into::into)
        }
        StorageCommand::GetCollection {
            scope,
            package_id,
            collection,
        } => {
            let input = GetCollectionInput {
                package_id,
                collection,
            };
            to_json(storage.get_collection(&scope.scope(), &input).await?)
        }
        StorageCommand::WriteDocument {
            scope,
            package_id,
            collection,
            document_id,
            document,
        } => {
            let document: Value =
                serde_json::from_str(&document).context("--document must be valid JSON")?;
            let input = WriteDocumentInput {
                package_id,
                collection,
                document_id,
                document,
            };
            Ok(storage.write_document(&scope.scope(), &input).await?)
        }
        StorageCommand::DeleteDocument {
            scope,
            package_id,
            collection,
            document_id,
        } => {
            let input = DeleteDocumentInput {
                package_id,
                collection,
                document_id,
            };
            let deleted = storage.delete_document(&scope.scope(), &input).await?;
            Ok(json!({ "deleted": deleted }))
        }
        StorageCommand::DeleteCollection {
            scope,
            package_id,
            collection,
        } => {
            let input = DeleteCollectionInput {
                package_id,
                collection,
            };
            let deleted = storage.delete_collection(&scope.scope(), &input).await?;
            Ok(json!({ "deleted": deleted }))
        }
    }
}

/// Render a result in the requested format
pub fn render(value: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).context("Failed to render JSON"),
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to render YAML"),
    }
}
