#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Authenticated HTTP client for the RoadWatch backend.
//!
//! The backend is a JSON/REST service. Every list endpoint accepts `page`,
//! `limit`, and resource-specific filter params and responds with a
//! `{ success, data: { <items>, total, page, limit } }` envelope where the
//! items field name varies per resource (`reports`, `payments`, ...). That
//! variation is normalized here, at the client boundary, via the
//! [`endpoints`] registry — callers only ever see
//! [`roadwatch_api_models::ResourceList`].
//!
//! The client performs no retries and keeps no cache; the store crate owns
//! all cached state.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod transport;

pub use client::ApiClient;
pub use config::{ClientConfig, ConfigError, Credentials, GeocoderConfig, MediaConfig};
pub use endpoints::EndpointDef;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

/// Fallback message when a failed response body carries none.
pub const GENERIC_REQUEST_ERROR: &str = "Request failed. Please try again.";

/// Errors from API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (connection, TLS, body transfer).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status. `message` is the
    /// body's `message` field when present, else a generic fallback, and
    /// is shown to users verbatim.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// User-facing message.
        message: String,
    },

    /// The backend answered 2xx but flagged the operation unsuccessful.
    #[error("{message}")]
    Rejected {
        /// User-facing message from the envelope.
        message: String,
    },

    /// The response body did not match the expected envelope shape.
    #[error("Response decode error: {message}")]
    Decode {
        /// Description of what failed to decode.
        message: String,
    },
}

impl ApiError {
    /// The user-facing message for this error, matching the propagation
    /// policy: backend-supplied text verbatim where available.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } | Self::Rejected { message } => message.clone(),
            Self::Http(_) | Self::Decode { .. } => GENERIC_REQUEST_ERROR.to_owned(),
        }
    }
}
