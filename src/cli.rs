//! Command line definitions

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use newrelic_client::alerts::IncidentPreference;
use newrelic_client::apiaccess::ApiAccessKeyType;
use newrelic_client::nerdstorage::StorageScope;
use newrelic_client::Region;
use tracing::Level;
use uuid::Uuid;

/// Command line client for New Relic alert policies, API keys, workloads and NerdStorage
#[derive(Parser, Debug)]
#[command(name = "newrelic", version, about, long_about = None)]
pub struct Args {
    /// Data center region (us, eu, staging)
    #[arg(short, long, global = true)]
    pub region: Option<Region>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    pub log_level: LogLevel,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Alert policies
    #[command(subcommand)]
    Policies(PolicyCommand),
    /// API access keys
    #[command(subcommand)]
    Keys(KeyCommand),
    /// Workloads
    #[command(subcommand)]
    Workloads(WorkloadCommand),
    /// NerdStorage documents
    #[command(subcommand)]
    Storage(StorageCommand),
}

#[derive(Subcommand, Debug)]
pub enum PolicyCommand {
    /// List policies (REST)
    List {
        /// Filter by policy name
        #[arg(long)]
        name: Option<String>,
    },
    /// Get a policy by ID (REST)
    Get { id: u64 },
    /// Create a policy (REST)
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "PER_POLICY")]
        incident_preference: IncidentPreference,
    },
    /// Update a policy (REST)
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        incident_preference: Option<IncidentPreference>,
    },
    /// Delete a policy (REST)
    Delete { id: u64 },
    /// Search policies in an account (NerdGraph)
    Search {
        #[arg(long)]
        account_id: u64,
        /// Restrict to these policy IDs
        #[arg(long = "id")]
        ids: Vec<u64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum KeyCommand {
    /// Search keys visible to the current user
    Search {
        #[arg(long = "account-id")]
        account_ids: Vec<u64>,
        /// Key types to include (defaults to both)
        #[arg(long = "type")]
        types: Vec<ApiAccessKeyType>,
    },
    /// Get one key
    Get {
        id: String,
        #[arg(long = "type")]
        key_type: ApiAccessKeyType,
    },
    /// Delete keys
    Delete {
        #[arg(long = "ingest")]
        ingest_key_ids: Vec<String>,
        #[arg(long = "user")]
        user_key_ids: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum WorkloadCommand {
    /// List workloads in an account
    List {
        #[arg(long)]
        account_id: u64,
    },
    /// Get a workload by GUID
    Get {
        #[arg(long)]
        account_id: u64,
        guid: String,
    },
    /// Copy a workload
    Duplicate {
        #[arg(long)]
        account_id: u64,
        #[arg(long)]
        source_guid: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a workload by GUID
    Delete { guid: String },
}

/// Where a document lives; defaults to the current user
#[derive(ClapArgs, Debug, Clone)]
pub struct ScopeArgs {
    #[arg(long, conflicts_with = "entity_guid")]
    pub account_id: Option<u64>,
    #[arg(long)]
    pub entity_guid: Option<String>,
}

impl ScopeArgs {
    pub fn scope(&self) -> StorageScope {
        match (self.account_id, &self.entity_guid) {
            (Some(id), _) => StorageScope::Account(id),
            (None, Some(guid)) => StorageScope::Entity(guid.clone()),
            (None, None) => StorageScope::User,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum StorageCommand {
    /// Read one document
    GetDocument {
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long)]
        package_id: Uuid,
        #[arg(long)]
        collection: String,
        #[arg(long)]
        document_id: String,
    },
    /// Read a whole collection
    GetCollection {
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long)]
        package_id: Uuid,
        #[arg(long)]
        collection: String,
    },
    /// Write a JSON document
    WriteDocument {
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long)]
        package_id: Uuid,
        #[arg(long)]
        collection: String,
        #[arg(long)]
        document_id: String,
        /// Document body as JSON
        #[arg(long)]
        document: String,
    },
    /// Delete one document
    DeleteDocument {
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long)]
        package_id: Uuid,
        #[arg(long)]
        collection: String,
        #[arg(long)]
        document_id: String,
    },
    /// Delete a whole collection
    DeleteCollection {
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long)]
        package_id: Uuid,
        #[arg(long)]
        collection: String,
    },
}
