//! Resource methods.
//!
//! Each method composes the pipeline for one endpoint: validate the
//! identifier arguments, substitute them into the templated path, build
//! the request, perform the single attempt and hydrate the result.

mod documents;
mod webhooks;

pub use documents::DocumentsApi;
pub use webhooks::{ListOptions, WebhooksApi};

use std::sync::Arc;

use crate::config::Configuration;
use crate::error::DwollaError;

/// Media type the wrapped API speaks on most endpoints.
pub(crate) const HAL_JSON: &str = "application/vnd.dwolla.v1.hal+json";

/// Outcome of a creation endpoint.
///
/// The wrapped API's creation endpoints answer 201 with a `Location`
/// header pointing at the created sub-resource instead of a body; any
/// other success status carries a hydratable body.
#[derive(Debug, Clone, PartialEq)]
pub enum Created<T> {
    /// The `Location` header of a 201 response.
    Location(String),
    /// The hydrated resource for any other success status.
    Resource(T),
}

/// Entry point to the API: owns the configuration and the HTTP transport.
///
/// Cheap to clone; the configuration is shared and read-only once the
/// client is built.
#[derive(Debug, Clone)]
pub struct DwollaClient {
    pub(crate) config: Arc<Configuration>,
    pub(crate) http_client: reqwest::Client,
}

impl DwollaClient {
    /// Build a client from a configuration.
    ///
    /// `verify_ssl = false` disables TLS certificate verification on the
    /// transport.
    pub fn new(config: Configuration) -> Result<Self, DwollaError> {
        let http_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| DwollaError::Config(e.to_string()))?;
        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }

    /// Build a client on an existing transport.
    pub fn with_http_client(config: Configuration, http_client: reqwest::Client) -> Self {
        Self {
            config: Arc::new(config),
            http_client,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Document endpoints.
    pub fn documents(&self) -> DocumentsApi<'_> {
        DocumentsApi { client: self }
    }

    /// Webhook endpoints.
    pub fn webhooks(&self) -> WebhooksApi<'_> {
        WebhooksApi { client: self }
    }
}

/// Reject blank identifier arguments before any I/O happens.
pub(crate) fn require_param<'v>(name: &str, value: &'v str) -> Result<&'v str, DwollaError> {
    if value.trim().is_empty() {
        return Err(DwollaError::MissingArgument(name.to_string()));
    }
    Ok(value)
}

/// Resolve an identifier argument: a full resource URI contributes only
/// its last path segment, a bare id is used verbatim.
pub(crate) fn resource_id(value: &str) -> &str {
    if value.contains("://") {
        value
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(value)
    } else {
        value
    }
}
