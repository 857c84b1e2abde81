//! Typed async client for the OKLink blockchain explorer REST API.
//!
//! Every explorer endpoint (`/api/v5/explorer/<resource>/<action>`) is exposed as
//! a request struct plus one client method. Both are generated at build time from
//! the declarative table in `endpoints.json`, so adding an endpoint is a table
//! edit rather than new code.
//!
//! # Features
//!
//! - **`types`, `query`, `endpoints`, `config` modules**: parameter types, the
//!   query builder with batch validation, and every request type. Available with
//!   no additional features.
//! - **`client` module** (enabled by default): an async client built on `reqwest`
//!   that performs the GET and decodes the `{code, msg, data}` envelope.
//!
//! # Quick start
//!
//! ```no_run
//! use oklink_explorer::{OklinkClient, endpoints::*};
//!
//! #[tokio::main]
//! async fn main() -> oklink_explorer::client::Result<()> {
//!     let client = OklinkClient::klaytn();
//!     let balances = client
//!         .batch_address_balances(BatchAddressBalancesRequest::new([
//!             "0x85c6627c4ed773cb7c32644b041f58a058b00d30",
//!             "0xc3e7fd3ce8e7bcb0acd6bbd0e21f1b45e4ab9e3f",
//!         ]))
//!         .await?;
//!     println!("{}", balances.data);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod endpoints;
pub mod query;
pub mod types;

pub use config::{ClientConfig, ConfigError};
pub use endpoints::{ENDPOINTS, EndpointInfo};
pub use query::{Endpoint, QueryParams, ValidationError};

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "client")]
pub use client::{ApiError, Error, OklinkClient};

pub use types::*;
