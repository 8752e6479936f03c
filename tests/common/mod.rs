//! Shared helpers for the wiremock-backed integration tests

#![allow(dead_code)]

use newrelic_client::transport::Client;
use newrelic_client::{Config, NewRelic};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const PERSONAL_KEY: &str = "NRAK-TEST";
pub const ADMIN_KEY: &str = "ADMIN-TEST";
pub const ACCOUNT_ID: u64 = 2508259;

/// Config pointing both REST (`/v2`) and NerdGraph (`/graphql`) at the mock server
pub fn config_for(server: &MockServer) -> Config {
    Config::new(PERSONAL_KEY)
        .with_base_url(format!("{}/v2", server.uri()))
        .with_nerdgraph_url(format!("{}/graphql", server.uri()))
}

pub fn client_for(server: &MockServer) -> Client {
    Client::new(&config_for(server)).unwrap()
}

pub fn newrelic_for(server: &MockServer) -> NewRelic {
    NewRelic::new(config_for(server)).unwrap()
}

/// NerdGraph success envelope
pub fn graphql_data(data: Value) -> Value {
    json!({ "data": data })
}
