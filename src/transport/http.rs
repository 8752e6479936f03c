//! HTTP utilities for New Relic API calls

use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Header identifying the calling service to New Relic
pub const REQUESTING_SERVICES_HEADER: &str = "NewRelic-Requesting-Services";

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// REST v2 error body: `{"error": {"title": "..."}}`
#[derive(Debug, Deserialize)]
struct RestErrorBody {
    error: RestErrorDetail,
}

#[derive(Debug, Deserialize)]
struct RestErrorDetail {
    title: String,
}

/// Extract a human-readable message from an error body
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<RestErrorBody>(body) {
        return parsed.error.title;
    }
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string();
    }
    sanitize_for_log(body)
}

/// Decoded response with the headers needed for paging
#[derive(Debug)]
pub struct HttpResponse<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: T,
}

/// HTTP client wrapper for New Relic API calls
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let service = HeaderValue::from_str(&config.service_name)
            .map_err(|_| Error::Config("service name is not a valid header value".to_string()))?;
        headers.insert(REQUESTING_SERVICES_HEADER, service);

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client })
    }

    /// Start a request
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send a request and decode its JSON body
    ///
    /// Non-success statuses become [`Error::NotFound`] (404) or
    /// [`Error::UnexpectedStatus`]. An empty body decodes as `null`.
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<HttpResponse<T>> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!("{} {}{}", method, url.origin().ascii_serialization(), url.path());

        let response = self.client.execute(request).await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!(
                "API error: {} {} - {} - {}",
                method,
                url.path(),
                status,
                sanitize_for_log(&body)
            );
            let message = error_message(status, &body);
            if status == StatusCode::NOT_FOUND {
                return Err(Error::NotFound(message));
            }
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body = if body.trim().is_empty() {
            serde_json::from_str("null")?
        } else {
            serde_json::from_str(&body).map_err(|e| {
                tracing::error!("Failed to parse response JSON: {}", e);
                Error::Deserialize(e)
            })?
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Format an API error for display
/// Security: Sanitizes error messages to avoid leaking sensitive API details
pub fn format_api_error(error: &Error) -> String {
    match error {
        Error::NotFound(message) => return format!("Not found: {}", message),
        Error::Config(message) => return format!("Configuration error: {}", message),
        Error::Mutation(message) => return format!("Mutation failed: {}", message.trim_end()),
        _ => {}
    }

    match error.status() {
        Some(401) => return "Authentication failed. Check your New Relic API key.".to_string(),
        Some(403) => {
            return "Permission denied. The API key lacks access to this resource.".to_string()
        }
        Some(429) => return "Rate limit exceeded. Please try again later.".to_string(),
        Some(400) | Some(422) => return "Invalid request. Check your parameters.".to_string(),
        Some(status) if status >= 500 => {
            return "New Relic service temporarily unavailable. Please try again.".to_string()
        }
        _ => {}
    }

    if matches!(error, Error::Http(_)) {
        return "Request failed. Check your network connection and try again.".to_string();
    }

    let error_str = error.to_string();
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(120)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates() {
        let long = "x".repeat(500);
        let sanitized = sanitize_for_log(&long);
        assert!(sanitized.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(sanitized.contains("500 bytes total"));
    }

    #[test]
    fn test_sanitize_respects_char_boundaries() {
        let body = "é".repeat(150);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("bytes total"));
    }

    #[test]
    fn test_error_message_prefers_title() {
        let body = r#"{"error":{"title":"Policy name is required"}}"#;
        assert_eq!(
            error_message(StatusCode::UNPROCESSABLE_ENTITY, body),
            "Policy name is required"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream\ndown"), "upstreamdown");
    }

    #[test]
    fn test_format_api_error() {
        let unauthorized = Error::UnexpectedStatus {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        assert!(format_api_error(&unauthorized).contains("Authentication failed"));

        let server = Error::UnexpectedStatus {
            status: 503,
            message: "down".to_string(),
        };
        assert!(format_api_error(&server).contains("temporarily unavailable"));

        let missing = Error::NotFound("no alert policy found for id 7".to_string());
        assert_eq!(format_api_error(&missing), "Not found: no alert policy found for id 7");

        let mutation = Error::Mutation("INGEST: bad\n".to_string());
        assert_eq!(format_api_error(&mutation), "Mutation failed: INGEST: bad");
    }
}
