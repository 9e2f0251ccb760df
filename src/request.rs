//! Request construction and dispatch.
//!
//! Turns a `{method, templated path, options}` triple into a fully
//! resolved URL and a ready-to-send payload, then performs the single
//! HTTP attempt. Path templating, query assembly and body shaping follow
//! the wire contract of the wrapped API exactly; see the individual
//! methods for the quirks that are preserved on purpose.

use std::collections::HashMap;

use tracing::debug;

use crate::config::Configuration;
use crate::error::DwollaError;
use crate::response::ApiResponse;

/// HTTP methods the pipeline accepts.
///
/// The enum is the validation: anything outside
/// GET/POST/PUT/PATCH/DELETE is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether this method carries a request body.
    fn carries_body(&self) -> bool {
        !matches!(self, Self::Get)
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request body payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Pre-serialized payload, sent unchanged.
    Raw(String),
    /// Structured payload. Mapping bodies get their top-level keys
    /// camel-cased before serialization; nested keys are left alone.
    Json(serde_json::Value),
}

/// Per-call options for [`ApiRequest`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query_params: HashMap<String, serde_json::Value>,
    pub headers: HashMap<String, String>,
    pub form_params: HashMap<String, serde_json::Value>,
    pub body: Option<RequestBody>,
    /// Auth scheme identifiers to apply, in order.
    pub auth_names: Vec<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_param<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.query_params.insert(name.into(), value.into());
        self
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn form_param<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.form_params.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn auth<S: Into<String>>(mut self, name: S) -> Self {
        self.auth_names.push(name.into());
        self
    }
}

/// Payload handed to the transport.
#[derive(Debug, Clone, PartialEq)]
enum OutgoingBody {
    /// URL-encoded form fields.
    Form(Vec<(String, String)>),
    /// Serialized text body (JSON or caller-supplied raw string).
    Text(String),
}

/// A single API request, bound to a configuration.
///
/// Construction merges default headers and injects auth; the request is
/// immutable afterwards. [`ApiRequest::execute`] performs exactly one
/// HTTP attempt.
#[derive(Debug)]
pub struct ApiRequest<'a> {
    config: &'a Configuration,
    method: HttpMethod,
    path: String,
    query_params: HashMap<String, serde_json::Value>,
    headers: HashMap<String, String>,
    form_params: HashMap<String, serde_json::Value>,
    body: Option<RequestBody>,
}

impl<'a> ApiRequest<'a> {
    pub fn new(
        config: &'a Configuration,
        method: HttpMethod,
        path: impl Into<String>,
        options: RequestOptions,
    ) -> Self {
        // 1. Default headers; caller-supplied headers win on conflict
        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            format!("application/{}", config.format.to_lowercase()),
        );
        headers.insert("User-Agent".to_string(), config.user_agent.clone());
        headers.extend(options.headers);

        // 2. Auth injection; unknown scheme names are silently ignored
        for auth_name in &options.auth_names {
            if auth_name == "oauth2" {
                headers.insert(
                    "Authorization".to_string(),
                    format!("Bearer {}", config.access_token_value()),
                );
            }
        }

        Self {
            config,
            method,
            path: path.into(),
            query_params: options.query_params,
            headers,
            form_params: options.form_params,
            body: options.body,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Normalized, escaped path: format markers resolved, base path joined
    /// in, repeated slashes collapsed.
    ///
    /// e.g. `/documents/{id}` with the id substituted and
    /// `force_ending_format` set resolves to `/documents/abc123.json`.
    pub fn interpreted_path(&self) -> String {
        let format = self.config.format.to_lowercase();
        let mut path = self.path.clone();

        // Stick a format marker into the path unless it already carries
        // one (an actual `.json`/`.xml` or a `{format}` placeholder).
        if self.config.inject_format && !has_format_marker(&path) {
            path = inject_after_first_segment(&path, &format);
        }
        if self.config.force_ending_format && !has_format_marker(&path) {
            path = format!("{path}.{format}");
        }

        let path = path.replace("{format}", &format);

        let joined = format!("{}/{}", self.config.base_path, path);
        let collapsed = collapse_slashes(&joined);
        escape_path(&collapsed)
    }

    /// Query string built from the query params, without a leading `?`.
    ///
    /// Params whose name appears as a `{name}` placeholder in the path are
    /// path params, not query params, and are skipped. Blank values are
    /// skipped too, except an explicit `false`.
    pub fn query_string(&self) -> String {
        let mut pairs: Vec<(String, String)> = Vec::new();
        for (name, value) in &self.query_params {
            if self.path.contains(&format!("{{{name}}}")) {
                continue;
            }
            if is_blank(value) {
                continue;
            }
            let name = if self.config.camelize_params {
                camelize(name)
            } else {
                name.clone()
            };
            pairs.push((name, stringify(value)));
        }
        if pairs.is_empty() {
            return String::new();
        }
        pairs.sort();
        pairs
            .iter()
            .map(|(name, value)| {
                format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Absolute URL: `scheme://host` + interpreted path + query string.
    pub fn url(&self) -> String {
        let path = self.interpreted_path();
        // An unresolved placeholder here is a programming error in the
        // resource method, not a recoverable failure.
        debug_assert!(
            !path.contains("%7B"),
            "unresolved placeholder in path: {path}"
        );
        let query_string = self.query_string();
        if query_string.is_empty() {
            format!("{}://{}{}", self.config.scheme, self.config.host, path)
        } else {
            format!(
                "{}://{}{}?{}",
                self.config.scheme, self.config.host, path, query_string
            )
        }
    }

    /// Payload for methods that carry a body, shaped by the finalized
    /// `Content-Type`.
    fn outgoing_body(&self) -> Option<OutgoingBody> {
        if self.headers.get("Content-Type").map(String::as_str)
            == Some("application/x-www-form-urlencoded")
        {
            let mut fields: Vec<(String, String)> = self
                .form_params
                .iter()
                .filter(|(_, value)| !is_blank(value))
                .map(|(name, value)| (name.clone(), stringify(value)))
                .collect();
            fields.sort();
            return Some(OutgoingBody::Form(fields));
        }
        match &self.body {
            Some(RequestBody::Raw(text)) => Some(OutgoingBody::Text(text.clone())),
            Some(RequestBody::Json(value)) => {
                Some(OutgoingBody::Text(camelize_top_level(value).to_string()))
            }
            None => None,
        }
    }

    /// Perform the single HTTP attempt and wrap the response.
    ///
    /// No retries and no timeout at this layer; the call resolves when
    /// the transport returns or errors.
    pub async fn execute(self, http_client: &reqwest::Client) -> Result<ApiResponse, DwollaError> {
        let url = self.url();
        debug!(method = self.method.as_str(), %url, "dispatching request");

        let mut builder = http_client.request(self.method.to_reqwest(), &url);
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }
        if self.method.carries_body() {
            match self.outgoing_body() {
                Some(OutgoingBody::Form(fields)) => builder = builder.form(&fields),
                Some(OutgoingBody::Text(text)) => builder = builder.body(text),
                None => {}
            }
        }

        let response = builder
            .send()
            .await
            .map_err(|e| DwollaError::Http(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body_text = response
            .text()
            .await
            .map_err(|e| DwollaError::Http(e.to_string()))?;
        debug!(status, "response received");

        ApiResponse::from_raw(status, headers, &body_text)
    }
}

/// Pick the `Accept` value from an endpoint's advertised media types.
/// A list containing `application/json` collapses to it; otherwise the
/// whole list is joined verbatim.
pub fn select_header_accept(accepts: &[&str]) -> Option<String> {
    if accepts.is_empty() {
        return None;
    }
    if accepts
        .iter()
        .any(|s| s.eq_ignore_ascii_case("application/json"))
    {
        return Some("application/json".to_string());
    }
    Some(accepts.join(","))
}

/// Pick the `Content-Type` from an endpoint's advertised media types,
/// defaulting to `application/json`.
pub fn select_header_content_type(content_types: &[&str]) -> String {
    if content_types.is_empty() {
        return "application/json".to_string();
    }
    if content_types
        .iter()
        .any(|s| s.eq_ignore_ascii_case("application/json"))
    {
        return "application/json".to_string();
    }
    content_types[0].to_string()
}

fn has_format_marker(path: &str) -> bool {
    let lower = path.to_lowercase();
    lower.contains(".json") || lower.contains(".xml") || lower.contains("{format}")
}

/// `/words/blah` with format `json` becomes `/words.json/blah`.
fn inject_after_first_segment(path: &str, format: &str) -> String {
    let body = path.strip_prefix('/').unwrap_or(path);
    let prefix = if path.starts_with('/') { "/" } else { "" };
    match body.split_once('/') {
        Some((first, rest)) => format!("{prefix}{first}.{format}/{rest}"),
        None => format!("{prefix}{body}.{format}"),
    }
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut last_was_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !last_was_slash {
                out.push(c);
            }
            last_was_slash = true;
        } else {
            out.push(c);
            last_was_slash = false;
        }
    }
    out
}

/// Percent-escape every path segment, preserving the separators.
fn escape_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Blank per the skip rule: null, or an empty/whitespace string.
/// Booleans are never blank, so an explicit `false` survives.
fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Stringify a query/form value the way it should appear on the wire:
/// strings verbatim, everything else via its JSON rendering.
fn stringify(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Lower-camel-case a snake_case identifier (`first_name` → `firstName`).
fn camelize(name: &str) -> String {
    let mut parts = name.split('_').filter(|p| !p.is_empty());
    let mut out = String::with_capacity(name.len());
    if let Some(first) = parts.next() {
        let mut chars = first.chars();
        if let Some(c) = chars.next() {
            out.extend(c.to_lowercase());
            out.push_str(chars.as_str());
        }
    }
    for part in parts {
        let mut chars = part.chars();
        if let Some(c) = chars.next() {
            out.extend(c.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Camel-case only the top-level keys of a mapping body. Nested objects
/// are deliberately not recased; the wrapped API's contract is defined in
/// terms of this shallow behavior.
fn camelize_top_level(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let recased = map
                .iter()
                .map(|(key, v)| (camelize(key), v.clone()))
                .collect();
            serde_json::Value::Object(recased)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> Configuration {
        Configuration::builder()
            .host("api.example.com")
            .access_token("test-token")
            .force_ending_format(false)
            .build()
    }

    fn request<'c>(config: &'c Configuration, path: &str, options: RequestOptions) -> ApiRequest<'c> {
        ApiRequest::new(config, HttpMethod::Get, path, options)
    }

    #[test]
    fn default_headers_lose_to_caller_headers() {
        let config = config();
        let req = request(
            &config,
            "/documents/a",
            RequestOptions::new().header("Content-Type", "application/vnd.dwolla.v1.hal+json"),
        );
        assert_eq!(
            req.headers().get("Content-Type").unwrap(),
            "application/vnd.dwolla.v1.hal+json"
        );
        assert!(req.headers().contains_key("User-Agent"));
    }

    #[test]
    fn oauth2_injects_a_bearer_header_and_unknown_schemes_are_ignored() {
        let config = config();
        let req = request(
            &config,
            "/documents/a",
            RequestOptions::new().auth("oauth2").auth("apiKey"),
        );
        assert_eq!(
            req.headers().get("Authorization").unwrap(),
            "Bearer test-token"
        );
    }

    #[test]
    fn interpreted_path_substitutes_the_format_literal() {
        let config = config();
        let req = request(&config, "/word.{format}/cat/entries", RequestOptions::new());
        assert_eq!(req.interpreted_path(), "/word.json/cat/entries");
    }

    #[test]
    fn interpreted_path_injects_format_after_the_first_segment() {
        let config = Configuration::builder()
            .host("api.example.com")
            .inject_format(true)
            .force_ending_format(false)
            .build();
        let req = request(&config, "/documents/abc", RequestOptions::new());
        assert_eq!(req.interpreted_path(), "/documents.json/abc");

        // A path that already carries a format marker is left alone.
        let req = request(&config, "/documents/abc.json", RequestOptions::new());
        assert_eq!(req.interpreted_path(), "/documents/abc.json");
    }

    #[test]
    fn interpreted_path_forces_an_ending_format() {
        let config = Configuration::builder()
            .host("api.example.com")
            .force_ending_format(true)
            .build();
        let req = request(&config, "/documents/abc123", RequestOptions::new());
        assert_eq!(req.interpreted_path(), "/documents/abc123.json");
    }

    #[test]
    fn interpreted_path_joins_base_path_and_collapses_slashes() {
        let config = Configuration::builder()
            .host("api.example.com")
            .base_path("/v1/")
            .force_ending_format(false)
            .build();
        let req = request(&config, "/documents/abc", RequestOptions::new());
        assert_eq!(req.interpreted_path(), "/v1/documents/abc");
    }

    #[test]
    fn interpreted_path_escapes_segments() {
        let config = config();
        let req = request(&config, "/documents/a b", RequestOptions::new());
        assert_eq!(req.interpreted_path(), "/documents/a%20b");
    }

    #[test]
    fn query_string_skips_path_params() {
        let config = config();
        let req = request(
            &config,
            "/words/{word}/entries",
            RequestOptions::new()
                .query_param("word", "cat")
                .query_param("limit", 5),
        );
        assert_eq!(req.query_string(), "limit=5");
    }

    #[test]
    fn query_string_drops_blanks_but_keeps_false() {
        let config = config();
        let req = request(
            &config,
            "/webhooks",
            RequestOptions::new()
                .query_param("empty", "")
                .query_param("missing", serde_json::Value::Null)
                .query_param("active", false),
        );
        assert_eq!(req.query_string(), "active=false");
    }

    #[test]
    fn query_string_is_empty_without_params() {
        let config = config();
        let req = request(&config, "/webhooks", RequestOptions::new());
        assert_eq!(req.query_string(), "");
        assert_eq!(req.url(), "https://api.example.com/webhooks");
    }

    #[test]
    fn query_string_camelizes_keys_when_configured() {
        let config = config();
        let req = request(
            &config,
            "/webhooks",
            RequestOptions::new().query_param("start_date", "2016-01-01"),
        );
        assert_eq!(req.query_string(), "startDate=2016-01-01");

        let config = Configuration::builder()
            .host("api.example.com")
            .camelize_params(false)
            .force_ending_format(false)
            .build();
        let req = request(
            &config,
            "/webhooks",
            RequestOptions::new().query_param("start_date", "2016-01-01"),
        );
        assert_eq!(req.query_string(), "start_date=2016-01-01");
    }

    #[test]
    fn json_bodies_get_top_level_keys_camelized_only() {
        let config = config();
        let req = ApiRequest::new(
            &config,
            HttpMethod::Post,
            "/customers",
            RequestOptions::new().body(RequestBody::Json(json!({
                "first_name": "A",
                "address": {"street_name": "Main"}
            }))),
        );
        let body = match req.outgoing_body().unwrap() {
            OutgoingBody::Text(text) => text,
            other => panic!("unexpected body: {other:?}"),
        };
        let round_tripped: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(round_tripped["firstName"], "A");
        // Nested keys are not recased.
        assert_eq!(round_tripped["address"]["street_name"], "Main");
    }

    #[test]
    fn raw_string_bodies_pass_through_unchanged() {
        let config = config();
        let req = ApiRequest::new(
            &config,
            HttpMethod::Post,
            "/customers",
            RequestOptions::new().body(RequestBody::Raw("exact bytes".to_string())),
        );
        assert_eq!(
            req.outgoing_body(),
            Some(OutgoingBody::Text("exact bytes".to_string()))
        );
    }

    #[test]
    fn form_encoded_requests_send_stringified_non_blank_fields() {
        let config = config();
        let req = ApiRequest::new(
            &config,
            HttpMethod::Post,
            "/transfers",
            RequestOptions::new()
                .header("Content-Type", "application/x-www-form-urlencoded")
                .form_param("amount", 25)
                .form_param("note", "")
                .form_param("metadata", serde_json::Value::Null),
        );
        assert_eq!(
            req.outgoing_body(),
            Some(OutgoingBody::Form(vec![(
                "amount".to_string(),
                "25".to_string()
            )]))
        );
    }

    #[test]
    fn camelize_is_lower_camel() {
        assert_eq!(camelize("first_name"), "firstName");
        assert_eq!(camelize("a_b_c"), "aBC");
        assert_eq!(camelize("already"), "already");
        assert_eq!(camelize("Upper"), "upper");
    }

    #[test]
    fn select_header_accept_prefers_json() {
        assert_eq!(select_header_accept(&[]), None);
        assert_eq!(
            select_header_accept(&["application/vnd.dwolla.v1.hal+json"]).as_deref(),
            Some("application/vnd.dwolla.v1.hal+json")
        );
        assert_eq!(
            select_header_accept(&["application/xml", "application/json"]).as_deref(),
            Some("application/json")
        );
    }

    #[test]
    fn select_header_content_type_defaults_to_json() {
        assert_eq!(select_header_content_type(&[]), "application/json");
        assert_eq!(
            select_header_content_type(&["application/vnd.dwolla.v1.hal+json"]),
            "application/vnd.dwolla.v1.hal+json"
        );
    }
}
