//! Civic information API client.
//!
//! Fetching is kept apart from decoding: implementations of
//! [`CivicInfoClient`] only produce the parsed JSON document, and the
//! provided [`CivicInfoClient::lookup_representatives`] runs it through
//! [`decode`]. There is no retry or caching at this layer.
//!
//! # Example
//!
//! ```ignore
//! use civicinfo::civic::{CivicInfoClient, HttpCivicInfoClient};
//!
//! let client = HttpCivicInfoClient::new("https://www.googleapis.com/civicinfo/v2", "my-api-key");
//! let response = client.lookup_representatives("2145 Whisper Way Reston, VA").await?;
//! println!("{} divisions", response.divisions.len());
//! ```

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::decode::{decode, DecodeError};
use super::types::RepresentativeInfoResponse;
use super::FailureKind;

/// Errors from moving the response over the wire.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response without a JSON body to classify
    #[error("HTTP error: {status} - {message}")]
    Status { status: u16, message: String },

    /// 2xx response whose body is not JSON
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Errors from a full lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl LookupError {
    /// The classified failure, or `None` for transport problems.
    #[must_use]
    pub const fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Transport(_) => None,
            Self::Decode(err) => Some(err.kind()),
        }
    }
}

/// Source of raw representative lookup documents.
#[async_trait]
pub trait CivicInfoClient: Send + Sync {
    /// Fetch the parsed response document for an address.
    async fn fetch_representatives(&self, address: &str) -> Result<Value, TransportError>;

    /// Fetch and decode the representatives for an address.
    async fn lookup_representatives(
        &self,
        address: &str,
    ) -> Result<RepresentativeInfoResponse, LookupError> {
        let doc = self.fetch_representatives(address).await?;
        Ok(decode(&doc)?)
    }
}

/// HTTP-based implementation of `CivicInfoClient`.
pub struct HttpCivicInfoClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpCivicInfoClient {
    /// Create a new client with the given base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a client with a custom `reqwest::Client` (timeouts, user agent).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn representatives_url(&self, address: &str) -> String {
        format!(
            "{}/representatives?key={}&address={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.api_key),
            urlencoding::encode(address)
        )
    }
}

#[async_trait]
impl CivicInfoClient for HttpCivicInfoClient {
    async fn fetch_representatives(&self, address: &str) -> Result<Value, TransportError> {
        let url = self.representatives_url(address);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        // Error envelopes arrive with non-2xx codes; hand them to the classifier.
        match serde_json::from_str::<Value>(&body) {
            Ok(doc) if doc.is_object() => {
                tracing::debug!(status = status.as_u16(), "error response carries JSON body");
                Ok(doc)
            }
            _ => Err(TransportError::Status {
                status: status.as_u16(),
                message: body,
            }),
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{CivicInfoClient, TransportError};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Mutex;

    /// Mock implementation of `CivicInfoClient` for unit tests.
    ///
    /// Configure the response with `set_fetch_result` and verify calls with
    /// `fetch_calls()`.
    pub struct MockCivicInfoClient {
        fetch_result: Mutex<Option<Result<Value, TransportError>>>,
        fetch_calls: Mutex<Vec<String>>,
    }

    impl MockCivicInfoClient {
        pub fn new() -> Self {
            Self {
                fetch_result: Mutex::new(None),
                fetch_calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the result for the next `fetch_representatives` call.
        pub fn set_fetch_result(&self, result: Result<Value, TransportError>) {
            *self.fetch_result.lock().unwrap() = Some(result);
        }

        /// Get all addresses passed to `fetch_representatives`.
        pub fn fetch_calls(&self) -> Vec<String> {
            self.fetch_calls.lock().unwrap().clone()
        }
    }

    impl Default for MockCivicInfoClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl CivicInfoClient for MockCivicInfoClient {
        async fn fetch_representatives(&self, address: &str) -> Result<Value, TransportError> {
            self.fetch_calls.lock().unwrap().push(address.to_string());

            self.fetch_result.lock().unwrap().take().unwrap_or_else(|| {
                Err(TransportError::Status {
                    status: 404,
                    message: "no mock response configured".into(),
                })
            })
        }
    }
}
