//! Transport seam between the typed client and the wire.
//!
//! [`Transport`] is the only thing that touches the network, so tests can
//! swap in an in-memory fake and exercise the full client surface without
//! a backend. The production [`HttpTransport`] wraps [`reqwest::Client`],
//! attaches the bearer token, and performs no retries — transient failures
//! surface to the caller, which is the store's job to record.

use async_trait::async_trait;

use crate::config::Credentials;
use crate::ApiError;

/// HTTP method for an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read a collection or record.
    Get,
    /// Create a record.
    Post,
    /// Update a record.
    Put,
    /// Delete a record.
    Delete,
}

impl Method {
    /// The method's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A request as seen by the transport: method, path relative to the API
/// base, flat query pairs, and an optional JSON body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the API base URL (leading slash).
    pub path: String,
    /// Flat key→value query parameters. No nesting — the API takes only
    /// primitive params.
    pub query: Vec<(String, String)>,
    /// JSON request body, for `POST`/`PUT`.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Creates a `GET` request for the given path.
    #[must_use]
    pub fn get(path: &str) -> Self {
        Self {
            method: Method::Get,
            path: path.to_owned(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a `POST` request with a JSON body.
    #[must_use]
    pub fn post(path: &str, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.to_owned(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Creates a `PUT` request with a JSON body.
    #[must_use]
    pub fn put(path: &str, body: serde_json::Value) -> Self {
        Self {
            method: Method::Put,
            path: path.to_owned(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Creates a `DELETE` request for the given path.
    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self {
            method: Method::Delete,
            path: path.to_owned(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_owned(), value.to_owned()));
        self
    }

    /// Appends all pairs from an iterator of query parameters.
    #[must_use]
    pub fn with_params<I>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query.extend(params);
        self
    }
}

/// A settled response: HTTP status plus the parsed JSON body.
///
/// An empty body (e.g., from a `DELETE`) is represented as
/// [`serde_json::Value::Null`].
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body, `Null` when the body was empty.
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Executes API requests. The seam for in-memory fakes in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes one request and returns the settled response.
    ///
    /// Non-2xx statuses are **not** errors at this layer — they come back
    /// as an [`ApiResponse`] so the client can extract the backend's
    /// `message` field. Only transport-level failures (connection, TLS,
    /// body transfer) are `Err`.
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Production transport over [`reqwest::Client`].
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl HttpTransport {
    /// Creates a transport for the given API base URL and credentials.
    #[must_use]
    pub fn new(base_url: &str, credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            credentials,
        }
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(request);
        log::debug!("{} {url}", request.method.as_str());

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        builder = builder
            .header(reqwest::header::AUTHORIZATION, self.credentials.header_value())
            .query(&request.query);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| ApiError::Decode {
                message: format!("invalid JSON body (status={status}): {e}"),
            })?
        };

        Ok(ApiResponse { status, body })
    }
}
