//! New Relic Client
//!
//! Main transport for the resource clients, combining credentials, HTTP
//! and the configured REST/NerdGraph endpoints.

use super::auth::ApiCredentials;
use super::graphql::{self, GraphQlRequest, GraphQlResponse};
use super::http::{HttpClient, HttpResponse};
use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Shared transport client
#[derive(Debug, Clone)]
pub struct Client {
    pub credentials: ApiCredentials,
    pub http: HttpClient,
    rest_base_url: String,
    nerdgraph_url: String,
}

impl Client {
    /// Create a new client
    pub fn new(config: &Config) -> Result<Self> {
        let rest_base_url = validate_url(config.rest_base_url())?;
        let nerdgraph_url = validate_url(config.nerdgraph_endpoint())?;

        Ok(Self {
            credentials: ApiCredentials::from_config(config),
            http: HttpClient::new(config)?,
            rest_base_url,
            nerdgraph_url,
        })
    }

    pub fn rest_base_url(&self) -> &str {
        &self.rest_base_url
    }

    pub fn nerdgraph_url(&self) -> &str {
        &self.nerdgraph_url
    }

    // =========================================================================
    // REST v2
    // =========================================================================

    /// Build a REST URL
    ///
    /// Absolute URLs (pagination links) pass through only when they share the
    /// base URL's origin, so credentials never leave the configured host.
    pub fn rest_url(&self, path: &str) -> Result<String> {
        if path.starts_with("http://") || path.starts_with("https://") {
            let target = url::Url::parse(path)
                .map_err(|e| Error::InvalidUrl(format!("{}: {}", path, e)))?;
            let base = url::Url::parse(&self.rest_base_url)
                .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.rest_base_url, e)))?;
            if target.origin() != base.origin() {
                tracing::warn!(
                    "Refusing REST URL outside {}: {}",
                    base.origin().ascii_serialization(),
                    target.origin().ascii_serialization()
                );
                return Err(Error::InvalidUrl(format!(
                    "{} is not on the REST host {}",
                    path,
                    base.origin().ascii_serialization()
                )));
            }
            return Ok(path.to_string());
        }
        Ok(format!(
            "{}/{}",
            self.rest_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }

    /// Make a GET request, optionally with query parameters
    pub async fn get<T, Q>(&self, path: &str, params: Option<&Q>) -> Result<HttpResponse<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut request = self.rest_request(Method::GET, path)?;
        if let Some(params) = params {
            request = request.query(params);
        }
        self.http.send(request).await
    }

    /// Make a POST request with a JSON body
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<HttpResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.rest_request(Method::POST, path)?.json(body);
        self.http.send(request).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<HttpResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.rest_request(Method::PUT, path)?.json(body);
        self.http.send(request).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<HttpResponse<T>> {
        let request = self.rest_request(Method::DELETE, path)?;
        self.http.send(request).await
    }

    fn rest_request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder> {
        let url = self.rest_url(path)?;
        self.credentials
            .authorize_rest(self.http.request(method, &url))
    }

    // =========================================================================
    // NerdGraph
    // =========================================================================

    /// Run a GraphQL operation and return its `data` tree
    pub async fn send_graphql(&self, request: GraphQlRequest<'_>) -> Result<Value> {
        let mut builder = self
            .credentials
            .authorize_nerdgraph(self.http.request(Method::POST, &self.nerdgraph_url))?
            .json(&request.body());
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response: HttpResponse<GraphQlResponse> = self.http.send(builder).await?;
        response.body.into_data()
    }

    /// Run a query and decode the whole `data` tree
    pub async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let data = self.send_graphql(GraphQlRequest::new(query, variables)).await?;
        serde_json::from_value(data).map_err(Error::from)
    }

    /// Run a query and decode the node at `pointer` inside `data`
    pub async fn query_at<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        pointer: &str,
    ) -> Result<T> {
        let data = self.send_graphql(GraphQlRequest::new(query, variables)).await?;
        graphql::pluck(&data, pointer)
    }
}

fn validate_url(raw: &str) -> Result<String> {
    let parsed = url::Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!(
            "URL must start with http:// or https://, got: {}",
            raw
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> Client {
        Client::new(&Config::new("key").with_base_url(base)).unwrap()
    }

    #[test]
    fn test_rest_url_building() {
        let client = client("https://api.newrelic.com/v2");
        assert_eq!(
            client.rest_url("/alerts_policies.json").unwrap(),
            "https://api.newrelic.com/v2/alerts_policies.json"
        );
        assert_eq!(
            client.rest_url("alerts_policies/5.json").unwrap(),
            "https://api.newrelic.com/v2/alerts_policies/5.json"
        );
    }

    #[test]
    fn test_rest_url_trailing_slash() {
        let client = client("http://localhost:8080/v2/");
        assert_eq!(
            client.rest_url("/alerts_policies.json").unwrap(),
            "http://localhost:8080/v2/alerts_policies.json"
        );
    }

    #[test]
    fn test_absolute_urls_pass_through() {
        let client = client("https://api.newrelic.com/v2");
        let next = "https://api.newrelic.com/v2/alerts_policies.json?page=2";
        assert_eq!(client.rest_url(next).unwrap(), next);
    }

    #[test]
    fn test_foreign_absolute_urls_are_rejected() {
        let client = client("https://api.newrelic.com/v2");
        for next in [
            "https://evil.example.com/v2/alerts_policies.json?page=2",
            "http://api.newrelic.com/v2/alerts_policies.json?page=2",
            "https://api.newrelic.com:8443/v2/alerts_policies.json?page=2",
        ] {
            assert!(
                matches!(client.rest_url(next), Err(Error::InvalidUrl(_))),
                "accepted {}",
                next
            );
        }
    }

    #[test]
    fn test_region_endpoints_by_default() {
        let config = Config::new("key").with_region(crate::config::Region::Eu);
        let client = Client::new(&config).unwrap();
        assert_eq!(client.rest_base_url(), "https://api.eu.newrelic.com/v2");
        assert_eq!(client.nerdgraph_url(), "https://api.eu.newrelic.com/graphql");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            Client::new(&Config::new("key").with_base_url("not-a-url")),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            Client::new(&Config::new("key").with_nerdgraph_url("ftp://example.com")),
            Err(Error::InvalidUrl(_))
        ));
    }
}
