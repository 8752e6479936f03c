//! New Relic API transport
//!
//! This module provides the plumbing shared by every resource client.
//!
//! # Module Structure
//!
//! - [`auth`] - API key header injection
//! - [`client`] - Transport façade for REST v2 and NerdGraph calls
//! - [`graphql`] - NerdGraph request/response envelopes and generic decoding
//! - [`http`] - HTTP utilities, status mapping and log sanitizing
//! - [`pager`] - `Link` header pagination metadata
//!
//! # Example
//!
//! ```no_run
//! use newrelic_client::{transport::Client, Config};
//! use serde_json::json;
//!
//! # async fn example() -> newrelic_client::Result<()> {
//! let client = Client::new(&Config::new("NRAK-..."))?;
//! let user_id: u64 = client
//!     .query_at("query { actor { user { id } } }", json!({}), "/actor/user/id")
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod graphql;
pub mod http;
pub mod pager;

pub use client::Client;
pub use pager::{LinkHeaderPager, Pager, Paging};
