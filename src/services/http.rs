// JSON-over-HTTP client used by the live backends
//
// Every request goes to `{base_url}{endpoint}` and carries
// `Content-Type: application/json`. Failures are normalized into three
// variants of CaseDeskError:
// - no response at all            -> Network (underlying reqwest error kept)
// - non-2xx response              -> Api (body `message`, else status line)
// - 2xx with an unparseable body  -> Parse

use crate::error::{CaseDeskError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// One outgoing request: method, endpoint path, optional JSON body, headers
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    endpoint: String,
    body: Option<Value>,
    headers: HeaderMap,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Add a header; `Content-Type` is always overridden to JSON on send
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn bearer(self, token: &str) -> Result<Self> {
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| CaseDeskError::Config(format!("Invalid auth token: {e}")))?;
        Ok(self.header(AUTHORIZATION, value))
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Thin reqwest wrapper bound to one base URL
///
/// Never retries; every failure is returned to the caller.
///
/// Usage:
///     let client = ApiClient::new("http://localhost:3000/api");
///     let cases: Vec<Case> = client.send_as(ApiRequest::get("/cases")).await?;
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Send and parse the success body as JSON
    pub async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = self.url(&request.endpoint);
        let response = self.execute(request).await?;

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(%url, error = %e, "response body is not valid JSON");
            CaseDeskError::Parse(format!("Invalid JSON from {url}: {e}"))
        })
    }

    /// Send and deserialize the success body into `T`
    pub async fn send_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let url = self.url(&request.endpoint);
        let value = self.send(request).await?;

        serde_json::from_value(value).map_err(|e| {
            tracing::warn!(%url, error = %e, "response body has unexpected shape");
            CaseDeskError::Parse(format!("Unexpected response from {url}: {e}"))
        })
    }

    /// Send and ignore the success body, whatever its shape (or absence)
    pub async fn send_discarding_body(&self, request: ApiRequest) -> Result<()> {
        self.execute(request).await.map(drop)
    }

    async fn execute(&self, request: ApiRequest) -> Result<Response> {
        let ApiRequest {
            method,
            endpoint,
            body,
            mut headers,
        } = request;
        let url = self.url(&endpoint);

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(%method, %url, "sending request");

        let mut builder = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(serde_json::to_vec(&body)?);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "request failed before a response");
            CaseDeskError::Network(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(status, &response.text().await.unwrap_or_default());
        tracing::warn!(%method, %url, status = status.as_u16(), %message, "request rejected");

        Err(CaseDeskError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// `message` from a JSON error body, else a line built from the status
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| {
            format!(
                "HTTP error {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_endpoint() {
        let client = ApiClient::new("http://localhost:3000/api/");
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(client.url("/cases/7"), "http://localhost:3000/api/cases/7");
    }

    #[test]
    fn test_error_message_prefers_body_message() {
        let msg = error_message(StatusCode::BAD_REQUEST, r#"{"message":"title is required"}"#);
        assert_eq!(msg, "title is required");
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        assert_eq!(
            error_message(StatusCode::SERVICE_UNAVAILABLE, "<html>down</html>"),
            "HTTP error 503: Service Unavailable"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"error":"nope"}"#),
            "HTTP error 404: Not Found"
        );
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message":42}"#),
            "HTTP error 400: Bad Request"
        );
    }

    #[test]
    fn test_request_builder_collects_parts() {
        let request = ApiRequest::put("/clients/3")
            .json(&serde_json::json!({ "name": "Ada" }))
            .unwrap()
            .bearer("abc")
            .unwrap();

        assert_eq!(request.method(), &Method::PUT);
        assert_eq!(request.endpoint(), "/clients/3");
        assert_eq!(request.headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert_eq!(request.body, Some(serde_json::json!({ "name": "Ada" })));
    }
}
