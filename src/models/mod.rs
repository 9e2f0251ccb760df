//! Typed wire models.
//!
//! Plain data structs hydrated from decoded response bodies. The wire
//! contract is camel-cased JSON; unknown fields (HAL `_links` and
//! friends) are ignored.

mod document;
mod webhook;

pub use document::Document;
pub use webhook::{Webhook, WebhookListResponse, WebhookRetry, WebhookRetryListResponse};

use crate::error::DwollaError;
use crate::response::DecodedBody;

/// Hydrate a typed model from a decoded response body.
///
/// A body that failed JSON decoding cannot hydrate anything and is a
/// decode error here (the decode fallback itself never errors; see
/// [`DecodedBody`]).
pub(crate) fn hydrate<T>(body: &DecodedBody) -> Result<T, DwollaError>
where
    T: serde::de::DeserializeOwned,
{
    match body {
        DecodedBody::Json(value) => {
            serde_json::from_value(value.clone()).map_err(|e| DwollaError::Decode(e.to_string()))
        }
        DecodedBody::Raw(raw) => {
            let sample: String = raw.chars().take(200).collect();
            Err(DwollaError::Decode(format!(
                "expected a JSON body, got: {sample}"
            )))
        }
    }
}
