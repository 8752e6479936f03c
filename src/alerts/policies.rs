//! Alert Policies
//!
//! REST v2 CRUD plus the equivalent NerdGraph queries and mutations.

use super::Alerts;
use crate::error::{Error, Result};
use crate::pagination::{paginate_cursor, CursorPage};
use crate::serialization::string_id;
use crate::transport::http::HttpResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

const POLICIES_PATH: &str = "/alerts_policies.json";

/// Rollup setting controlling how violations are grouped into incidents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentPreference {
    PerPolicy,
    PerCondition,
    PerConditionAndTarget,
}

impl IncidentPreference {
    pub fn as_str(self) -> &'static str {
        match self {
            IncidentPreference::PerPolicy => "PER_POLICY",
            IncidentPreference::PerCondition => "PER_CONDITION",
            IncidentPreference::PerConditionAndTarget => "PER_CONDITION_AND_TARGET",
        }
    }
}

impl fmt::Display for IncidentPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncidentPreference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PER_POLICY" => Ok(IncidentPreference::PerPolicy),
            "PER_CONDITION" => Ok(IncidentPreference::PerCondition),
            "PER_CONDITION_AND_TARGET" => Ok(IncidentPreference::PerConditionAndTarget),
            other => Err(Error::InvalidInput(format!("unknown incident preference: {}", other))),
        }
    }
}

/// REST v2 alert policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_preference: Option<IncidentPreference>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
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

/// NerdGraph alert policy; IDs come back as strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPolicy {
    #[serde(with = "string_id")]
    pub id: u64,
    pub incident_preference: IncidentPreference,
    pub name: String,
    pub account_id: u64,
}

/// Input for `alertsPolicyCreate` and `alertsPolicyUpdate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPolicyInput {
    pub incident_preference: IncidentPreference,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertsPoliciesSearchCriteriaInput {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<u64>,
}

/// Filters for listing REST v2 policies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListPoliciesParams {
    #[serde(rename = "filter[name]", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PoliciesResponse {
    #[serde(default)]
    policies: Vec<Policy>,
}

#[derive(Debug, Deserialize)]
struct PolicyResponse {
    policy: Policy,
}

#[derive(Debug, Serialize)]
struct PolicyRequestBody<'a> {
    policy: &'a Policy,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoliciesSearchPage {
    #[serde(default)]
    next_cursor: Option<String>,
    #[serde(default)]
    policies: Vec<QueryPolicy>,
}

#[derive(Debug, Deserialize)]
struct DeletedPolicy {
    #[serde(with = "string_id")]
    id: u64,
}

impl Alerts {
    // =========================================================================
    // REST v2
    // =========================================================================

    /// List all alert policies, following `Link` pagination
    pub async fn list_policies(&self, params: Option<&ListPoliciesParams>) -> Result<Vec<Policy>> {
        let mut policies = Vec::new();
        let mut next_url = Some(self.client.rest_url(POLICIES_PATH)?);
        let mut query = params;
        let mut fetched = HashSet::new();

        while let Some(url) = next_url.take() {
            if !fetched.insert(url.clone()) {
                return Err(Error::InvalidResponse(format!(
                    "pagination link revisits {}",
                    url
                )));
            }

            let response: HttpResponse<PoliciesResponse> = self.client.get(&url, query).await?;
            policies.extend(response.body.policies);

            // Later pages carry the filters in the server-provided URL
            query = None;
            next_url = self.pager.parse(&response.headers).next;
        }

        tracing::debug!("Listed {} alert policies", policies.len());
        Ok(policies)
    }

    /// Get a policy by ID (searches the full listing)
    pub async fn get_policy(&self, id: u64) -> Result<Policy> {
        self.list_policies(None)
            .await?
            .into_iter()
            .find(|p| p.id == Some(id))
            .ok_or_else(|| Error::NotFound(format!("no alert policy found for id {}", id)))
    }

    pub async fn create_policy(&self, policy: &Policy) -> Result<Policy> {
        let response: HttpResponse<PolicyResponse> = self
            .client
            .post(POLICIES_PATH, &PolicyRequestBody { policy })
            .await?;
        Ok(response.body.policy)
    }

    /// Update a policy; `policy.id` selects the target
    pub async fn update_policy(&self, policy: &Policy) -> Result<Policy> {
        let id = policy
            .id
            .ok_or_else(|| Error::InvalidInput("policy id is required for update".to_string()))?;
        let response: HttpResponse<PolicyResponse> = self
            .client
            .put(&policy_path(id), &PolicyRequestBody { policy })
            .await?;
        Ok(response.body.policy)
    }

    /// Delete a policy, returning it as it was before deletion
    pub async fn delete_policy(&self, id: u64) -> Result<Policy> {
        let response: HttpResponse<PolicyResponse> = self.client.delete(&policy_path(id)).await?;
        Ok(response.body.policy)
    }

    // =========================================================================
    // NerdGraph
    // =========================================================================

    pub async fn create_policy_mutation(
        &self,
        account_id: u64,
        policy: &QueryPolicyInput,
    ) -> Result<QueryPolicy> {
        let vars = json!({
            "accountID": account_id,
            "policy": policy,
        });
        self.client
            .query_at(ALERTS_POLICY_CREATE, vars, "/alertsPolicyCreate")
            .await
    }

    pub async fn update_policy_mutation(
        &self,
        account_id: u64,
        policy_id: u64,
        policy: &QueryPolicyInput,
    ) -> Result<QueryPolicy> {
        let vars = json!({
            "accountID": account_id,
            "policyID": policy_id.to_string(),
            "policy": policy,
        });
        self.client
            .query_at(ALERTS_POLICY_UPDATE, vars, "/alertsPolicyUpdate")
            .await
    }

    /// Query a single policy by account and policy ID
    pub async fn query_policy(&self, account_id: u64, id: u64) -> Result<QueryPolicy> {
        let vars = json!({
            "accountID": account_id,
            "policyID": id.to_string(),
        });
        let policy: Option<QueryPolicy> = self
            .client
            .query_at(ALERTS_POLICY_QUERY, vars, "/actor/account/alerts/policy")
            .await?;
        policy.ok_or_else(|| {
            Error::NotFound(format!(
                "no alert policy found for id {} in account {}",
                id, account_id
            ))
        })
    }

    /// Search policies, following `nextCursor` until exhausted
    pub async fn query_policy_search(
        &self,
        account_id: u64,
        criteria: &AlertsPoliciesSearchCriteriaInput,
    ) -> Result<Vec<QueryPolicy>> {
        paginate_cursor(|cursor| async move {
            let vars = json!({
                "accountID": account_id,
                "cursor": cursor,
                "searchCriteria": criteria,
            });
            let page: PoliciesSearchPage = self
                .client
                .query_at(
                    ALERTS_POLICY_SEARCH,
                    vars,
                    "/actor/account/alerts/policiesSearch",
                )
                .await?;
            Ok(CursorPage::new(page.policies, page.next_cursor))
        })
        .await
    }

    /// Delete a policy, returning the ID the server reports as deleted
    pub async fn delete_policy_mutation(&self, account_id: u64, id: u64) -> Result<u64> {
        let vars = json!({
            "accountID": account_id,
            "policyID": id.to_string(),
        });
        let deleted: DeletedPolicy = self
            .client
            .query_at(ALERTS_POLICY_DELETE, vars, "/alertsPolicyDelete")
            .await?;
        Ok(deleted.id)
    }
}

fn policy_path(id: u64) -> String {
    format!("/alerts_policies/{}.json", id)
}

const ALERTS_POLICY_QUERY: &str = r#"query($accountID: Int!, $policyID: ID!) {
  actor {
    account(id: $accountID) {
      alerts {
        policy(id: $policyID) {
          id
          name
          incidentPreference
          accountId
        }
      }
    }
  }
}"#;

const ALERTS_POLICY_SEARCH: &str = r#"query($accountID: Int!, $cursor: String, $searchCriteria: AlertsPoliciesSearchCriteriaInput) {
  actor {
    account(id: $accountID) {
      alerts {
        policiesSearch(cursor: $cursor, searchCriteria: $searchCriteria) {
          nextCursor
          totalCount
          policies {
            accountId
            id
            incidentPreference
            name
          }
        }
      }
    }
  }
}"#;

const ALERTS_POLICY_CREATE: &str = r#"mutation CreatePolicy($accountID: Int!, $policy: AlertsPolicyInput!) {
  alertsPolicyCreate(accountId: $accountID, policy: $policy) {
    id
    name
    incidentPreference
    accountId
  }
}"#;

const ALERTS_POLICY_UPDATE: &str = r#"mutation UpdatePolicy($accountID: Int!, $policyID: ID!, $policy: AlertsPolicyUpdateInput!) {
  alertsPolicyUpdate(accountId: $accountID, id: $policyID, policy: $policy) {
    id
    name
    incidentPreference
    accountId
  }
}"#;

const ALERTS_POLICY_DELETE: &str = r#"mutation DeletePolicy($accountID: Int!, $policyID: ID!) {
  alertsPolicyDelete(accountId: $accountID, id: $policyID) {
    id
  }
}"#;
