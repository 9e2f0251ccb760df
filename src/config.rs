//! Client configuration.
//!
//! `Configuration` carries everything the request pipeline reads: endpoint
//! coordinates, format preferences, credentials and the TLS verification
//! flag. Build it once at startup and hand it to [`crate::DwollaClient`];
//! the pipeline only ever reads it.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

/// Connection and request-shaping settings, read by every request.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// URL scheme (`https` unless overridden).
    pub scheme: String,
    /// API host, optionally with a port, without scheme or path.
    pub host: String,
    /// Path prefix joined in front of every templated path.
    pub base_path: String,
    /// Wire format substituted for `{format}` markers (`json` or `xml`).
    pub format: String,
    /// OAuth2 access token injected by the `oauth2` auth scheme.
    pub access_token: SecretString,
    /// API keys by parameter name.
    pub api_key: HashMap<String, String>,
    /// Optional prefixes (e.g. `Token`) prepended to API keys.
    pub api_key_prefix: HashMap<String, String>,
    /// Value of the default `User-Agent` header.
    pub user_agent: String,
    /// When `false`, the transport accepts invalid TLS certificates.
    pub verify_ssl: bool,
    /// Insert `.{format}` after the first path segment when the path
    /// carries no format marker.
    pub inject_format: bool,
    /// Append `.{format}` to the path when it carries no format marker.
    pub force_ending_format: bool,
    /// Lower-camel-case query parameter names.
    pub camelize_params: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            host: "api.dwolla.com".to_string(),
            base_path: String::new(),
            format: "json".to_string(),
            access_token: SecretString::from(String::new()),
            api_key: HashMap::new(),
            api_key_prefix: HashMap::new(),
            user_agent: concat!("dwolla-sdk-rust/", env!("CARGO_PKG_VERSION")).to_string(),
            verify_ssl: true,
            inject_format: false,
            force_ending_format: true,
            camelize_params: true,
        }
    }
}

impl Configuration {
    /// Returns a builder for constructing `Configuration`
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }

    /// API key for `param_name`, joined with its prefix when one is set.
    pub fn api_key_with_prefix(&self, param_name: &str) -> Option<String> {
        let key = self.api_key.get(param_name)?;
        match self.api_key_prefix.get(param_name) {
            Some(prefix) if !prefix.is_empty() => Some(format!("{prefix} {key}")),
            _ => Some(key.clone()),
        }
    }

    /// The configured access token, exposed for header assembly.
    pub(crate) fn access_token_value(&self) -> &str {
        self.access_token.expose_secret()
    }
}

/// Builder for `Configuration` to construct settings in a unified and safe way
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    scheme: Option<String>,
    host: Option<String>,
    base_path: Option<String>,
    format: Option<String>,
    access_token: Option<String>,
    api_key: HashMap<String, String>,
    api_key_prefix: HashMap<String, String>,
    user_agent: Option<String>,
    verify_ssl: Option<bool>,
    inject_format: Option<bool>,
    force_ending_format: Option<bool>,
    camelize_params: Option<bool>,
}

impl ConfigurationBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheme<S: Into<String>>(mut self, scheme: S) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn base_path<S: Into<String>>(mut self, base_path: S) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Set scheme, host and base path from a single `scheme://host[/path]`
    /// string. Anything unparseable is left at its default.
    pub fn base_url(mut self, url: &str) -> Self {
        if let Some((scheme, rest)) = url.split_once("://") {
            self.scheme = Some(scheme.to_string());
            match rest.split_once('/') {
                Some((host, path)) => {
                    self.host = Some(host.to_string());
                    let path = path.trim_end_matches('/');
                    if !path.is_empty() {
                        self.base_path = Some(format!("/{path}"));
                    }
                }
                None => self.host = Some(rest.to_string()),
            }
        }
        self
    }

    pub fn format<S: Into<String>>(mut self, format: S) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn access_token<S: Into<String>>(mut self, token: S) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn api_key<K: Into<String>, V: Into<String>>(mut self, param_name: K, key: V) -> Self {
        self.api_key.insert(param_name.into(), key.into());
        self
    }

    pub fn api_key_prefix<K: Into<String>, V: Into<String>>(
        mut self,
        param_name: K,
        prefix: V,
    ) -> Self {
        self.api_key_prefix.insert(param_name.into(), prefix.into());
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = Some(verify_ssl);
        self
    }

    pub fn inject_format(mut self, inject_format: bool) -> Self {
        self.inject_format = Some(inject_format);
        self
    }

    pub fn force_ending_format(mut self, force_ending_format: bool) -> Self {
        self.force_ending_format = Some(force_ending_format);
        self
    }

    pub fn camelize_params(mut self, camelize_params: bool) -> Self {
        self.camelize_params = Some(camelize_params);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Configuration {
        let defaults = Configuration::default();
        Configuration {
            scheme: self.scheme.unwrap_or(defaults.scheme),
            host: self.host.unwrap_or(defaults.host),
            base_path: self.base_path.unwrap_or(defaults.base_path),
            format: self.format.unwrap_or(defaults.format),
            access_token: self
                .access_token
                .map(SecretString::from)
                .unwrap_or(defaults.access_token),
            api_key: self.api_key,
            api_key_prefix: self.api_key_prefix,
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            verify_ssl: self.verify_ssl.unwrap_or(defaults.verify_ssl),
            inject_format: self.inject_format.unwrap_or(defaults.inject_format),
            force_ending_format: self
                .force_ending_format
                .unwrap_or(defaults.force_ending_format),
            camelize_params: self.camelize_params.unwrap_or(defaults.camelize_params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_with_prefix_joins_prefix_and_key() {
        let config = Configuration::builder()
            .api_key("api_key", "zzz")
            .api_key_prefix("api_key", "Token")
            .build();
        assert_eq!(
            config.api_key_with_prefix("api_key"),
            Some("Token zzz".to_string())
        );
    }

    #[test]
    fn api_key_without_prefix_returns_bare_key() {
        let config = Configuration::builder().api_key("api_key", "zzz").build();
        assert_eq!(config.api_key_with_prefix("api_key"), Some("zzz".to_string()));
        assert_eq!(config.api_key_with_prefix("other"), None);
    }

    #[test]
    fn base_url_splits_scheme_host_and_base_path() {
        let config = Configuration::builder()
            .base_url("http://127.0.0.1:4545/v1/")
            .build();
        assert_eq!(config.scheme, "http");
        assert_eq!(config.host, "127.0.0.1:4545");
        assert_eq!(config.base_path, "/v1");
    }

    #[test]
    fn base_url_without_path_keeps_base_path_empty() {
        let config = Configuration::builder()
            .base_url("https://api-sandbox.dwolla.com")
            .build();
        assert_eq!(config.host, "api-sandbox.dwolla.com");
        assert_eq!(config.base_path, "");
    }
}
