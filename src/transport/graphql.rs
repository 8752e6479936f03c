//! NerdGraph envelopes
//!
//! Request/response shapes for the GraphQL endpoint and a generic decoder
//! that pulls a typed value out of the `data` tree by JSON pointer.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// `errorClass` value NerdGraph uses for missing resources
const NOT_FOUND_CLASS: &str = "NOT_FOUND";

/// A GraphQL operation plus any extra per-request headers
#[derive(Debug, Clone)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
    pub headers: Vec<(&'static str, String)>,
}

impl<'a> GraphQlRequest<'a> {
    pub fn new(query: &'a str, variables: Value) -> Self {
        Self {
            query,
            variables,
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Wire body: `{"query": ..., "variables": ...}`
    pub(crate) fn body(&self) -> RequestBody<'_> {
        RequestBody {
            query: self.query,
            variables: &self.variables,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestBody<'a> {
    query: &'a str,
    variables: &'a Value,
}

/// Raw NerdGraph response
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

impl GraphQlResponse {
    /// Turn the envelope into `data`, or the errors it carries
    pub fn into_data(self) -> Result<Value> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let errors = GraphQlErrors(errors);
            if let Some(not_found) = errors.not_found_message() {
                return Err(Error::NotFound(not_found));
            }
            return Err(Error::GraphQl(errors));
        }

        self.data
            .ok_or_else(|| Error::InvalidResponse("NerdGraph response has no data".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlErrorLocation {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlErrorExtensions {
    #[serde(default)]
    pub error_class: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

/// A single entry of the GraphQL `errors` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub locations: Vec<GraphQlErrorLocation>,
    #[serde(default)]
    pub path: Vec<Value>,
    #[serde(default)]
    pub extensions: Option<GraphQlErrorExtensions>,
}

impl GraphQlError {
    fn error_class(&self) -> Option<&str> {
        self.extensions.as_ref()?.error_class.as_deref()
    }
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_class() {
            Some(class) => write!(f, "{} ({})", self.message, class),
            None => f.write_str(&self.message),
        }
    }
}

/// The full `errors` array of a response
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQlErrors(pub Vec<GraphQlError>);

impl GraphQlErrors {
    pub fn iter(&self) -> impl Iterator<Item = &GraphQlError> {
        self.0.iter()
    }

    /// Combined message when every entry is `NOT_FOUND`
    fn not_found_message(&self) -> Option<String> {
        let all_not_found = self.iter().all(|e| e.error_class() == Some(NOT_FOUND_CLASS));
        if self.0.is_empty() || !all_not_found {
            return None;
        }
        let messages: Vec<&str> = self.iter().map(|e| e.message.as_str()).collect();
        Some(messages.join("; "))
    }
}

impl fmt::Display for GraphQlErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NerdGraph error: ")?;
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

/// Decode the node at `pointer` (RFC 6901) inside `data`
///
/// A missing node decodes as `null`, so `Option<T>` targets yield `None` when
/// an intermediate object is absent.
pub fn pluck<T: DeserializeOwned>(data: &Value, pointer: &str) -> Result<T> {
    let node = data.pointer(pointer).cloned().unwrap_or(Value::Null);
    serde_json::from_value(node).map_err(Error::from)
}
