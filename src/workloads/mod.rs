//! Workloads
//!
//! Entity groupings managed through NerdGraph.

mod collections;
mod types;

pub use types::*;

use crate::transport::Client;

/// Workloads client
#[derive(Debug, Clone)]
pub struct Workloads {
    client: Client,
}

impl Workloads {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}
