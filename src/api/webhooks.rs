//! Webhook endpoints.

use crate::error::DwollaError;
use crate::models::{self, Webhook, WebhookListResponse, WebhookRetry, WebhookRetryListResponse};
use crate::request::{
    ApiRequest, HttpMethod, RequestOptions, select_header_accept, select_header_content_type,
};

use super::{Created, DwollaClient, HAL_JSON, require_param, resource_id};

/// Optional paging parameters for list endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    /// How many results to return.
    pub limit: Option<i64>,
    /// How many results to skip.
    pub offset: Option<i64>,
}

/// `/webhooks` and `/webhook-subscriptions/{id}/webhooks` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct WebhooksApi<'a> {
    pub(super) client: &'a DwollaClient,
}

impl WebhooksApi<'_> {
    /// Get webhooks fired for a subscription.
    ///
    /// `GET /webhook-subscriptions/{id}/webhooks`
    pub async fn list_for_subscription(
        &self,
        id: &str,
        list: ListOptions,
    ) -> Result<WebhookListResponse, DwollaError> {
        let id = require_param("id", id)?;
        let path = "/webhook-subscriptions/{id}/webhooks".replace("{id}", resource_id(id));

        let mut options = self.base_options();
        if let Some(limit) = list.limit {
            options = options.query_param("limit", limit);
        }
        if let Some(offset) = list.offset {
            options = options.query_param("offset", offset);
        }

        let response = ApiRequest::new(&self.client.config, HttpMethod::Get, path, options)
            .execute(&self.client.http_client)
            .await?;
        models::hydrate(&response.body)
    }

    /// Get a webhook by id or resource URI.
    ///
    /// `GET /webhooks/{id}`
    pub async fn get(&self, id: &str) -> Result<Webhook, DwollaError> {
        let id = require_param("id", id)?;
        let path = "/webhooks/{id}".replace("{id}", resource_id(id));

        let response =
            ApiRequest::new(&self.client.config, HttpMethod::Get, path, self.base_options())
                .execute(&self.client.http_client)
                .await?;
        models::hydrate(&response.body)
    }

    /// Get the retries requested for a webhook.
    ///
    /// `GET /webhooks/{id}/retries`
    pub async fn retries(&self, id: &str) -> Result<WebhookRetryListResponse, DwollaError> {
        let id = require_param("id", id)?;
        let path = "/webhooks/{id}/retries".replace("{id}", resource_id(id));

        let response =
            ApiRequest::new(&self.client.config, HttpMethod::Get, path, self.base_options())
                .execute(&self.client.http_client)
                .await?;
        models::hydrate(&response.body)
    }

    /// Request a redelivery of a webhook.
    ///
    /// `POST /webhooks/{id}/retries` — answers 201 with a `Location`
    /// header pointing at the created retry.
    pub async fn retry(&self, id: &str) -> Result<Created<WebhookRetry>, DwollaError> {
        let id = require_param("id", id)?;
        let path = "/webhooks/{id}/retries".replace("{id}", resource_id(id));

        let response =
            ApiRequest::new(&self.client.config, HttpMethod::Post, path, self.base_options())
                .execute(&self.client.http_client)
                .await?;
        if response.status == 201
            && let Some(location) = response.header("Location")
        {
            return Ok(Created::Location(location.to_string()));
        }
        Ok(Created::Resource(models::hydrate(&response.body)?))
    }

    /// Options shared by every webhook endpoint: oauth2 plus the HAL
    /// accept header. These endpoints advertise no content type, which
    /// selects the `application/json` default.
    fn base_options(&self) -> RequestOptions {
        let mut options = RequestOptions::new().auth("oauth2");
        if let Some(accept) = select_header_accept(&[HAL_JSON]) {
            options = options.header("Accept", accept);
        }
        options.header("Content-Type", select_header_content_type(&[]))
    }
}
