//! Query-string construction shared by every endpoint.
//!
//! Each endpoint writes its parameters into a [`QueryParams`] list in a fixed
//! order. [`build_url`] then prefixes the chain identifier and percent-encodes
//! the whole list onto the explorer root. Validation (batch sizes, empty
//! required values) happens while the list is written, so a bad request is
//! rejected before any network I/O.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use url::Url;

use crate::types::Chain;

/// Delimiter between entries of a batch parameter.
pub const BATCH_DELIMITER: &str = ",";

/// Name of the query parameter carrying [`Chain::short_name`].
pub const CHAIN_PARAM: &str = "chainShortName";

/// Request rejected before it was sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("the maximum number of `{param}` entries is {max}, got {actual}")]
    BatchTooLarge {
        param: &'static str,
        max: usize,
        actual: usize,
    },
    #[error("`{param}` must contain at least one entry")]
    EmptyBatch { param: &'static str },
    #[error("`{param}` entry {index} is empty or contains a `,`")]
    InvalidBatchEntry { param: &'static str, index: usize },
    #[error("`{param}` must not be empty")]
    EmptyValue { param: &'static str },
}

/// An explorer endpoint: a fixed path, a result type, and a way to encode the
/// request's parameters.
///
/// Implementations for every documented endpoint are generated from
/// `endpoints.json`; downstream crates may implement it for endpoints the
/// table does not cover.
pub trait Endpoint {
    /// Decoded type of the envelope's `data` field.
    type Output: DeserializeOwned;

    /// Path below `/api/v5/explorer/`, e.g. `address/address-summary`.
    const PATH: &'static str;

    /// Largest accepted batch, for batch endpoints.
    const BATCH_LIMIT: Option<usize> = None;

    /// Append this request's parameters, validating them on the way.
    fn write_params(&self, params: &mut QueryParams) -> Result<(), ValidationError>;
}

/// Ordered list of encoded query parameters.
///
/// Insertion order is preserved so built URLs are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a required parameter. Values that render as an empty string are rejected.
    pub fn push(&mut self, key: &'static str, value: impl Display) -> Result<(), ValidationError> {
        let value = value.to_string();
        if value.is_empty() {
            return Err(ValidationError::EmptyValue { param: key });
        }
        self.pairs.push((key, value));
        Ok(())
    }

    /// Append an optional parameter; `None` leaves the query untouched.
    pub fn push_opt<T: Display>(&mut self, key: &'static str, value: Option<&T>) {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    /// Append a comma-joined batch parameter after checking it against `max`.
    pub fn push_batch<T: AsRef<str>>(
        &mut self,
        key: &'static str,
        values: &[T],
        max: usize,
    ) -> Result<(), ValidationError> {
        if values.len() > max {
            return Err(ValidationError::BatchTooLarge {
                param: key,
                max,
                actual: values.len(),
            });
        }
        if values.is_empty() {
            return Err(ValidationError::EmptyBatch { param: key });
        }
        if let Some(index) = values.iter().position(|v| {
            let v = v.as_ref();
            v.is_empty() || v.contains(BATCH_DELIMITER)
        }) {
            return Err(ValidationError::InvalidBatchEntry { param: key, index });
        }

        let joined = values
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(BATCH_DELIMITER);
        self.pairs.push((key, joined));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Collect the parameters of `request`, validating them.
pub fn params_of<E: Endpoint>(request: &E) -> Result<QueryParams, ValidationError> {
    let mut params = QueryParams::new();
    request.write_params(&mut params)?;
    Ok(params)
}

/// Build the absolute URL for `path` below `explorer_root`.
///
/// `explorer_root` must end in `/` (see [`ClientConfig`](crate::ClientConfig)),
/// otherwise its last segment is replaced by `path`.
pub fn build_url(
    explorer_root: &Url,
    path: &str,
    chain: &Chain,
    params: &QueryParams,
) -> Result<Url, url::ParseError> {
    let mut url = explorer_root.join(path)?;
    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query.append_pair(CHAIN_PARAM, chain.short_name);
        for (key, value) in params.iter() {
            query.append_pair(key, value);
        }
    }
    Ok(url)
}

/// Split an encoded batch value back into its entries.
pub fn split_batch(value: &str) -> Vec<&str> {
    value
        .split(BATCH_DELIMITER)
        .filter(|entry| !entry.is_empty())
        .collect()
}
