//! Document endpoints.

use crate::error::DwollaError;
use crate::models::{self, Document};
use crate::request::{
    ApiRequest, HttpMethod, RequestOptions, select_header_accept, select_header_content_type,
};

use super::{DwollaClient, HAL_JSON, require_param, resource_id};

/// `/documents` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct DocumentsApi<'a> {
    pub(super) client: &'a DwollaClient,
}

impl DocumentsApi<'_> {
    /// Get a document by id or resource URI.
    ///
    /// `GET /documents/{id}`
    pub async fn get(&self, id: &str) -> Result<Document, DwollaError> {
        let id = require_param("id", id)?;
        let path = "/documents/{id}".replace("{id}", resource_id(id));

        let mut options = RequestOptions::new().auth("oauth2");
        if let Some(accept) = select_header_accept(&[HAL_JSON]) {
            options = options.header("Accept", accept);
        }
        options = options.header("Content-Type", select_header_content_type(&[HAL_JSON]));

        let response = ApiRequest::new(&self.client.config, HttpMethod::Get, path, options)
            .execute(&self.client.http_client)
            .await?;
        models::hydrate(&response.body)
    }
}
