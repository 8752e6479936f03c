//! API access keys
//!
//! NerdGraph management of ingest (license/browser) and user keys.

mod keys;
mod types;

pub use keys::format_mutation_errors;
pub use types::*;

use crate::transport::Client;

/// API access keys client
#[derive(Debug, Clone)]
pub struct ApiAccess {
    client: Client,
}

impl ApiAccess {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}
