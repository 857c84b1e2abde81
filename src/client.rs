//! Async client for the OKLink explorer API.

use crate::config::{ClientConfig, ConfigError};
use crate::endpoints::*;
use crate::query::{Endpoint, ValidationError, build_url, params_of};
use crate::types::*;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "Ok-Access-Key";

/// Envelope as it arrives on the wire, before `data` is decoded.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    code: i64,
    msg: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Well-formed explorer response carrying a non-zero `code`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("API error {code}: {message}")]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

/// Client error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request rejected locally; nothing was sent.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Connection, TLS, timeout or body-read failure.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Any status other than `200 OK`. The body is not read.
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    /// Body is not an envelope, or `data` does not match the expected type.
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl Error {
    /// Returns `true` if the request never left the client.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the application code for [`Error::Api`].
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api(err) => Some(err.code),
            _ => None,
        }
    }

    /// Returns the HTTP status for [`Error::HttpStatus`].
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus(status) => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Decode a response body into a successful envelope.
///
/// A non-zero `code` wins over a `data` shape mismatch: the caller gets the
/// explorer's own error instead of a decode failure.
pub fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<Envelope<T>> {
    let raw: RawEnvelope = serde_json::from_slice(body)?;
    if raw.code != 0 {
        return Err(ApiError {
            code: raw.code,
            message: raw.msg,
        }
        .into());
    }

    Ok(Envelope {
        code: raw.code,
        msg: raw.msg,
        data: serde_json::from_value(raw.data)?,
    })
}

/// Async client for the OKLink explorer API.
///
/// Every call performs exactly one GET. Dropping the returned future abandons
/// the request.
///
/// # Example
///
/// ```no_run
/// use oklink_explorer::OklinkClient;
/// use oklink_explorer::endpoints::AddressSummaryRequest;
///
/// #[tokio::main]
/// async fn main() -> oklink_explorer::client::Result<()> {
///     let client = OklinkClient::klaytn();
///     let summary = client
///         .address_summary(AddressSummaryRequest::new("0x85c6627c4ed773cb7c32644b041f58a058b00d30"))
///         .await?;
///     println!("Balance: {} {}", summary.data.balance, summary.data.balance_symbol);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OklinkClient {
    client: Client,
    config: ClientConfig,
}

impl OklinkClient {
    /// Create a new client from an explicit configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Create a client for KLAYTN on the public endpoint.
    pub fn klaytn() -> Self {
        Self::new(ClientConfig::new(Chain::KLAYTN))
    }

    /// Create a client for `chain` on the public endpoint.
    pub fn for_chain(chain: Chain) -> Self {
        Self::new(ClientConfig::new(chain))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the URL `request` would be sent to, without sending it.
    pub fn endpoint_url<E: Endpoint>(&self, request: &E) -> Result<Url> {
        let params = params_of(request)?;
        build_url(
            self.config.explorer_root(),
            E::PATH,
            self.config.chain(),
            &params,
        )
        .map_err(|e| Error::Config(ConfigError::from(e)))
    }

    /// Send `request` and decode `data` into the endpoint's output type.
    pub async fn execute<E: Endpoint>(&self, request: &E) -> Result<Envelope<E::Output>> {
        self.execute_as(request).await
    }

    /// Send `request` and decode `data` into a caller-chosen type.
    pub async fn execute_as<E: Endpoint, T: DeserializeOwned>(
        &self,
        request: &E,
    ) -> Result<Envelope<T>> {
        let url = self.endpoint_url(request)?;
        self.fetch(url).await
    }

    /// GET `url` and decode its envelope.
    pub async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<Envelope<T>> {
        tracing::debug!(path = url.path(), "sending explorer request");

        let mut request = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.config.timeout());
        if let Some(key) = self.config.api_key() {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .inspect_err(|e| tracing::debug!("explorer request failed: {e}"))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(status = status.as_u16(), "explorer returned HTTP error");
            return Err(Error::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        decode_envelope(&body)
            .inspect_err(|e| tracing::debug!("explorer response rejected: {e}"))
    }
}

impl Default for OklinkClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

// One method per row of `endpoints.json`, grouped Address / Transaction / Token / Batch.
include!(concat!(env!("OUT_DIR"), "/client_methods.rs"));
