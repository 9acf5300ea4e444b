//! Client helpers for the product endpoints. Paths stay centralized here; the
//! backend decides who may read or change what.

use crate::{
    error::ApiError,
    features::products::types::{Product, ProductRequest},
    transport::ApiClient,
};
use tracing::instrument;

pub const PRODUCTS_ENDPOINT: &str = "/products";

#[derive(Clone)]
pub struct ProductsClient {
    api: ApiClient,
}

impl ProductsClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    /// Transport failures, non-success statuses and undecodable bodies.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        self.api.get_json(PRODUCTS_ENDPOINT).await
    }

    /// # Errors
    /// `NotFound` for unknown ids, otherwise as [`ProductsClient::list`].
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Product, ApiError> {
        self.api.get_json(&item_path(id)).await
    }

    /// # Errors
    /// `Request` for an invalid body, otherwise as [`ProductsClient::list`].
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: &ProductRequest) -> Result<Product, ApiError> {
        validate(request)?;
        self.api.post_json(PRODUCTS_ENDPOINT, request).await
    }

    /// # Errors
    /// `Request` for an invalid body, otherwise as [`ProductsClient::get`].
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: &ProductRequest) -> Result<Product, ApiError> {
        validate(request)?;
        self.api.put_json(&item_path(id), request).await
    }

    /// # Errors
    /// As [`ProductsClient::get`].
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&item_path(id)).await
    }
}

fn item_path(id: i64) -> String {
    format!("{PRODUCTS_ENDPOINT}/{id}")
}

fn validate(request: &ProductRequest) -> Result<(), ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::Request("Product name is required.".to_string()));
    }
    if !request.price.is_finite() || request.price < 0.0 {
        return Err(ApiError::Request(
            "Product price must be a non-negative number.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::session::SessionStore;
    use anyhow::{anyhow, Result};
    use serde_json::json;
    use std::net::TcpListener;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn products(server: &MockServer) -> Result<ProductsClient> {
        let config = AppConfig::new(&format!("{}/api", server.uri()), 5)?;
        let api = ApiClient::new(&config, Arc::new(SessionStore::new()))?;
        Ok(ProductsClient::new(api))
    }

    fn lamp() -> ProductRequest {
        ProductRequest {
            name: "Lamp".to_string(),
            description: "Desk lamp".to_string(),
            price: 19.5,
        }
    }

    #[tokio::test]
    async fn list_and_get_decode_products() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Lamp", "description": "Desk lamp", "price": 19.5},
                {"id": 2, "name": "Chair", "price": 80.0}
            ])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/products/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(
                {"id": 2, "name": "Chair", "description": "", "price": 80.0}
            )))
            .mount(&server)
            .await;

        let client = products(&server)?;
        let all = client.list().await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all.get(1).map(|p| p.description.as_str()), Some(""));

        let chair = client.get(2).await?;
        assert_eq!(chair.name, "Chair");
        Ok(())
    }

    #[tokio::test]
    async fn create_and_update_send_request_body() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        let body = json!({"name": "Lamp", "description": "Desk lamp", "price": 19.5});

        Mock::given(method("POST"))
            .and(path("/api/products"))
            .and(body_json(body.clone()))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!(
                {"id": 7, "name": "Lamp", "description": "Desk lamp", "price": 19.5}
            )))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/api/products/7"))
            .and(body_json(body))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(
                {"id": 7, "name": "Lamp", "description": "Desk lamp", "price": 19.5}
            )))
            .expect(1)
            .mount(&server)
            .await;

        let client = products(&server)?;
        assert_eq!(client.create(&lamp()).await?.id, 7);
        assert_eq!(client.update(7, &lamp()).await?.price, 19.5);
        Ok(())
    }

    #[tokio::test]
    async fn delete_surfaces_forbidden() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/products/7"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "statusCode": 403,
                "message": "Access Denied"
            })))
            .mount(&server)
            .await;

        let err = products(&server)?
            .delete(7)
            .await
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;
        assert_eq!(err, ApiError::Forbidden("Access Denied".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_request_is_rejected_locally() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        let client = products(&server)?;

        let mut nameless = lamp();
        nameless.name = "  ".to_string();
        assert!(matches!(
            client.create(&nameless).await,
            Err(ApiError::Request(_))
        ));

        let mut negative = lamp();
        negative.price = -1.0;
        assert!(matches!(
            client.update(1, &negative).await,
            Err(ApiError::Request(_))
        ));
        Ok(())
    }
}
