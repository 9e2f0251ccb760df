//! A typed client for the Dwolla payments REST API.
//!
//! Typed resource methods are translated into HTTP requests (path
//! templating, query/header/body assembly, bearer-auth injection) and HTTP
//! responses are translated back into typed models or typed errors.
//!
//! The pipeline performs exactly one attempt per call: no retries, no
//! timeouts, no cancellation. Any retry/backoff policy belongs to the
//! caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use dwolla_sdk::{Configuration, DwollaClient};
//!
//! let config = Configuration::builder()
//!     .host("api-sandbox.dwolla.com")
//!     .access_token("my-oauth-token")
//!     .build();
//! let client = DwollaClient::new(config)?;
//!
//! let document = client.documents().get("abc123").await?;
//! println!("{:?}", document.status);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod request;
pub mod response;

pub use api::{Created, DocumentsApi, DwollaClient, ListOptions, WebhooksApi};
pub use config::{Configuration, ConfigurationBuilder};
pub use error::{DwollaError, Result};
pub use request::{ApiRequest, HttpMethod, RequestBody, RequestOptions};
pub use response::{ApiResponse, DecodedBody};
