//! Client configuration: where requests go and which chain they target.

use std::time::Duration;

use url::Url;

use crate::types::Chain;

/// Public OKLink endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.oklink.com/";

/// Environment variable overriding [`DEFAULT_BASE_URL`] in [`ClientConfig::from_env`].
pub const BASE_URL_ENV: &str = "OKLINK_BASE_URL";

/// Default timeout for a single request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path of the explorer API below the base URL.
const EXPLORER_PREFIX: &str = "api/v5/explorer/";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("unsupported base URL `{0}`: expected an http(s) URL with a path")]
    UnsupportedBaseUrl(String),
}

/// Immutable settings shared by every request a client makes.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    explorer_root: Url,
    chain: Chain,
    api_key: Option<String>,
    timeout: Duration,
}

impl ClientConfig {
    /// Configuration for `chain` against the public OKLink endpoint.
    pub fn new(chain: Chain) -> Self {
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL");
        let explorer_root = base_url
            .join(EXPLORER_PREFIX)
            .expect("explorer prefix is a valid relative path");
        Self {
            base_url,
            explorer_root,
            chain,
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Like [`ClientConfig::new`], but honours `OKLINK_BASE_URL` when set.
    pub fn from_env(chain: Chain) -> Result<Self, ConfigError> {
        let config = Self::new(chain);
        match std::env::var(BASE_URL_ENV) {
            Ok(base_url) if !base_url.trim().is_empty() => config.with_base_url(base_url.trim()),
            _ => Ok(config),
        }
    }

    /// Point the client at another host, e.g. a proxy or a mock server.
    ///
    /// Any path on `base_url` is kept as a prefix; query and fragment are dropped.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        let mut url = Url::parse(base_url)?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedBaseUrl(base_url.to_string()));
        }
        url.set_query(None);
        url.set_fragment(None);
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        self.explorer_root = url.join(EXPLORER_PREFIX)?;
        self.base_url = url;
        Ok(self)
    }

    /// Send `key` as the `Ok-Access-Key` header on every request.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/api/v5/explorer/`, the root every endpoint path is joined onto.
    pub fn explorer_root(&self) -> &Url {
        &self.explorer_root
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Chain::KLAYTN)
    }
}
