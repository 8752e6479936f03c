//! Alerts
//!
//! Alert policy management over REST v2 and NerdGraph.
//!
//! # Example
//!
//! ```no_run
//! use newrelic_client::alerts::{Alerts, ListPoliciesParams};
//! use newrelic_client::{transport::Client, Config};
//!
//! # async fn example() -> newrelic_client::Result<()> {
//! let alerts = Alerts::new(Client::new(&Config::new("NRAK-...").with_admin_api_key("..."))?);
//! let params = ListPoliciesParams { name: Some("Production".to_string()) };
//! for policy in alerts.list_policies(Some(&params)).await? {
//!     println!("{:?} {}", policy.id, policy.name);
//! }
//! # Ok(())
//! # }
//! ```

mod policies;

pub use policies::{
    AlertsPoliciesSearchCriteriaInput, IncidentPreference, ListPoliciesParams, Policy,
    QueryPolicy, QueryPolicyInput,
};

use crate::transport::{Client, LinkHeaderPager, Pager};
use std::sync::Arc;

/// Alert policies client
#[derive(Clone)]
pub struct Alerts {
    client: Client,
    pager: Arc<dyn Pager>,
}

impl Alerts {
    pub fn new(client: Client) -> Self {
        Self::with_pager(client, Arc::new(LinkHeaderPager))
    }

    /// Use a custom pager for REST list endpoints
    pub fn with_pager(client: Client, pager: Arc<dyn Pager>) -> Self {
        Self { client, pager }
    }
}
