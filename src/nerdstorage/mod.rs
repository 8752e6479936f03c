//! NerdStorage
//!
//! Document storage keyed by package, collection and document ID. Each
//! document lives in a [`StorageScope`]: an account, the current user, or an
//! entity.
//!
//! # Example
//!
//! ```no_run
//! use newrelic_client::nerdstorage::{GetDocumentInput, NerdStorage, StorageScope, WriteDocumentInput};
//! use newrelic_client::{transport::Client, Config};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Settings {
//!     theme: String,
//! }
//!
//! # async fn example() -> newrelic_client::Result<()> {
//! let storage = NerdStorage::new(Client::new(&Config::new("NRAK-..."))?);
//! let scope = StorageScope::Account(12345678);
//! let package_id = "ecaeb28c-7b3f-4932-9e33-7385980efa1c".parse().unwrap();
//!
//! storage
//!     .write_document(&scope, &WriteDocumentInput {
//!         package_id,
//!         collection: "prefs".to_string(),
//!         document_id: "ui".to_string(),
//!         document: Settings { theme: "dark".to_string() },
//!     })
//!     .await?;
//!
//! let settings: Option<Settings> = storage
//!     .get_document(&scope, &GetDocumentInput {
//!         package_id,
//!         collection: "prefs".to_string(),
//!         document_id: "ui".to_string(),
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod documents;
mod types;

pub use documents::PACKAGE_ID_HEADER;
pub use types::{
    CollectionDocument, DeleteCollectionInput, DeleteDocumentInput, GetCollectionInput,
    GetDocumentInput, StorageScope, WriteDocumentInput,
};

use crate::transport::Client;

/// NerdStorage client
#[derive(Debug, Clone)]
pub struct NerdStorage {
    client: Client,
}

impl NerdStorage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}
