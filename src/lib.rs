//! Typed client for the New Relic REST v2 and NerdGraph APIs.
//!
//! Each resource area gets its own client sharing one transport:
//!
//! - [`alerts`] - alert policies (REST v2 CRUD and NerdGraph mutations)
//! - [`apiaccess`] - ingest and user API keys
//! - [`workloads`] - workload collections
//! - [`nerdstorage`] - NerdStorage documents and collections
//!
//! # Example
//!
//! ```no_run
//! use newrelic_client::{Config, NewRelic, Region};
//!
//! # async fn example() -> newrelic_client::Result<()> {
//! let config = Config::new(std::env::var("NEW_RELIC_API_KEY").unwrap_or_default())
//!     .with_region(Region::Eu);
//! let client = NewRelic::new(config)?;
//!
//! for workload in client.workloads.list_workloads(12345678).await? {
//!     println!("{} {}", workload.guid, workload.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return [`Result<T>`]; lookups that find nothing return
//! [`Error::NotFound`]:
//!
//! ```no_run
//! # use newrelic_client::{Config, Error, NewRelic};
//! # async fn example() -> newrelic_client::Result<()> {
//! # let client = NewRelic::new(Config::new("key"))?;
//! match client.alerts.get_policy(42).await {
//!     Ok(policy) => println!("Found: {}", policy.name),
//!     Err(Error::NotFound(msg)) => println!("{}", msg),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod alerts;
pub mod apiaccess;
pub mod config;
pub mod error;
pub mod nerdstorage;
pub mod pagination;
pub mod serialization;
pub mod transport;
pub mod workloads;

pub use config::{Config, Region};
pub use error::{Error, Result};

use alerts::Alerts;
use apiaccess::ApiAccess;
use nerdstorage::NerdStorage;
use workloads::Workloads;

/// All resource clients built from one configuration
#[derive(Clone)]
pub struct NewRelic {
    pub alerts: Alerts,
    pub api_access: ApiAccess,
    pub workloads: Workloads,
    pub nerdstorage: NerdStorage,
}

impl NewRelic {
    pub fn new(config: Config) -> Result<Self> {
        let client = transport::Client::new(&config)?;
        tracing::debug!(
            "New Relic client ready (region: {}, rest: {}, nerdgraph: {})",
            config.region,
            client.rest_base_url(),
            client.nerdgraph_url()
        );

        Ok(Self {
            alerts: Alerts::new(client.clone()),
            api_access: ApiAccess::new(client.clone()),
            workloads: Workloads::new(client.clone()),
            nerdstorage: NerdStorage::new(client),
        })
    }
}
