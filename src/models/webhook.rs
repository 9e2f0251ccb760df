use serde::{Deserialize, Serialize};

/// A webhook fired for a subscription event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Webhook {
    pub id: Option<String>,
    /// Event topic, e.g. `transfer_created`.
    pub topic: Option<String>,
    pub account_id: Option<String>,
    pub event_id: Option<String>,
    pub subscription_id: Option<String>,
}

/// Webhooks fired for a subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookListResponse {
    pub total: Option<i64>,
    pub items: Vec<Webhook>,
}

/// A single requested redelivery of a webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookRetry {
    pub id: Option<String>,
    /// ISO-8601 timestamp of the retry request.
    pub timestamp: Option<String>,
}

/// Redeliveries requested for a webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookRetryListResponse {
    pub total: Option<i64>,
    pub items: Vec<WebhookRetry>,
}
