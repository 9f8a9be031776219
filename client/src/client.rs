//! `reqwest`-backed implementation of [`InventoryApi`]

use crate::{
    api::{ApiFuture, InventoryApi},
    config::ApiConfig,
    envelope::{self, Payload},
    error::ApiError,
    types::{AdjustRequest, DEFAULT_USERNAME, InventoryItem, InventoryPatch, ReserveRequest},
};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;

/// HTTP client for the inventory backend
#[derive(Clone, Debug)]
pub struct InventoryClient {
    http: Client,
    base_url: Url,
}

impl InventoryClient {
    /// Create a client for the given configuration
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] if the base URL cannot be resolved or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.resolve()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    /// Absolute base URL every request is built from
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Request(format!("base URL `{}` cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, method: Method, segments: &[&str]) -> Result<Value, ApiError> {
        let url = self.endpoint(segments)?;
        self.execute(self.http.request(method, url)).await
    }

    async fn send_json<B>(&self, method: Method, segments: &[&str], body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(segments)?;
        self.execute(self.http.request(method, url).json(body)).await
    }

    /// Issue the request and normalize the outcome
    async fn execute(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let request = request.build().map_err(|e| ApiError::from_transport(&e))?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(%method, %url, "Sending inventory request");

        let response = self.http.execute(request).await.map_err(|e| {
            let error = ApiError::from_transport(&e);
            tracing::warn!(%method, %url, error = %e, "Inventory request failed without a response");
            error
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "Failed to read inventory response body");
            ApiError::Network(e.to_string())
        })?;
        let body = envelope::parse_body(&text);

        if !status.is_success() {
            let error = ApiError::from_status(status, body);
            tracing::warn!(
                %method,
                %url,
                status = status.as_u16(),
                backend_error = error.is_backend_error(),
                message = %error,
                "Inventory request rejected"
            );
            return Err(error);
        }

        tracing::debug!(%method, %url, status = status.as_u16(), "Inventory request succeeded");
        Ok(match Payload::parse(body) {
            Payload::Wrapped {
                success, data, message,
            } => {
                if !success {
                    tracing::debug!(?message, "Backend wrapped a 2xx response with success=false");
                }
                data
            },
            Payload::Bare(value) => value,
        })
    }
}

impl InventoryApi for InventoryClient {
    fn list_inventory(&self) -> ApiFuture<'_, Vec<InventoryItem>> {
        Box::pin(async move {
            let payload = self.send(Method::GET, &["inventory"]).await?;
            envelope::decode_list(payload)
        })
    }

    fn get_inventory(&self, sku: String) -> ApiFuture<'_, InventoryItem> {
        Box::pin(async move {
            let payload = self.send(Method::GET, &["inventory", sku.as_str()]).await?;
            envelope::decode(payload)
        })
    }

    fn create_inventory(&self, item: InventoryItem) -> ApiFuture<'_, Option<InventoryItem>> {
        Box::pin(async move {
            let payload = self.send_json(Method::POST, &["inventory"], &item).await?;
            envelope::decode_optional(payload)
        })
    }

    fn update_inventory(
        &self,
        sku: String,
        patch: InventoryPatch,
    ) -> ApiFuture<'_, Option<InventoryItem>> {
        Box::pin(async move {
            let body = InventoryPatch {
                sku: Some(sku.clone()),
                ..patch
            };
            let payload = self.send_json(Method::PUT, &["inventory", sku.as_str()], &body).await?;
            envelope::decode_optional(payload)
        })
    }

    fn adjust_inventory(
        &self,
        sku: String,
        quantity: i64,
        username: Option<String>,
    ) -> ApiFuture<'_, Option<InventoryItem>> {
        Box::pin(async move {
            let body = AdjustRequest {
                quantity,
                username: username.as_deref().unwrap_or(DEFAULT_USERNAME),
            };
            let payload = self
                .send_json(Method::PUT, &["inventory", sku.as_str(), "adjust"], &body)
                .await?;
            envelope::decode_optional(payload)
        })
    }

    fn reserve_inventory(
        &self,
        sku: String,
        quantity: u32,
        order_id: String,
    ) -> ApiFuture<'_, Option<InventoryItem>> {
        Box::pin(async move {
            let body = ReserveRequest {
                quantity,
                order_id: &order_id,
            };
            let payload = self
                .send_json(Method::POST, &["inventory", sku.as_str(), "reserve"], &body)
                .await?;
            envelope::decode_optional(payload)
        })
    }

    fn delete_inventory(&self, sku: String) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            self.send(Method::DELETE, &["inventory", sku.as_str()]).await?;
            Ok(())
        })
    }

    fn cancel_inventory(&self, sku: String, quantity: u32) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let quantity = quantity.to_string();
            self.send(Method::DELETE, &["inventory", sku.as_str(), "quantity", quantity.as_str()])
                .await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;

    #[test]
    fn test_client_creation() {
        let client = InventoryClient::new(&ApiConfig::for_mode(Mode::Development));
        assert_eq!(
            client.map(|c| c.base_url().to_string()).ok().as_deref(),
            Some("http://localhost:8090/api")
        );
    }

    #[test]
    fn endpoints_are_appended_and_encoded() {
        let Ok(client) = InventoryClient::new(&ApiConfig::for_mode(Mode::Development)) else {
            unreachable!("development config always resolves");
        };
        let url = client.endpoint(&["inventory", "SKU 1/A", "reserve"]);
        assert_eq!(
            url.map(|u| u.to_string()).ok().as_deref(),
            Some("http://localhost:8090/api/inventory/SKU%201%2FA/reserve")
        );
    }

    #[test]
    fn trailing_slash_base_does_not_double_up() {
        let config = ApiConfig::for_mode(Mode::Development).with_base_url("http://localhost:9000/api/");
        let Ok(client) = InventoryClient::new(&config) else {
            unreachable!("explicit base URL is absolute");
        };
        let url = client.endpoint(&["inventory"]);
        assert_eq!(
            url.map(|u| u.to_string()).ok().as_deref(),
            Some("http://localhost:9000/api/inventory")
        );
    }
}
