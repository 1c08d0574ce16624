//! # Catalog Lookup Implementations
//!
//! Two ways to resolve a product id to its record: over HTTP against the
//! catalog service, or from a TOML product table shipped with the
//! deployment.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shop_core::{CatalogLookup, Product, ProductId, ShopError, ShopResult};
use tracing::{debug, error, instrument};

use crate::client::ClientConfig;

/// Envelope the catalog service wraps its responses in
#[derive(Debug, Deserialize)]
struct CatalogEnvelope {
    #[serde(default)]
    message: String,
    data: Option<Product>,
}

/// HTTP client for the product catalog service
pub struct CatalogClient {
    config: ClientConfig,
    client: Client,
}

impl CatalogClient {
    pub fn new(config: ClientConfig) -> ShopResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ShopError::upstream("product", e.to_string()))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl CatalogLookup for CatalogClient {
    #[instrument(skip(self))]
    async fn product(&self, product_id: ProductId) -> ShopResult<Product> {
        let url = format!("{}/product/{}", self.config.base_url, product_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ShopError::upstream("product", e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShopError::upstream("product", e.to_string()))?;

        if !status.is_success() {
            error!("catalog lookup failed: status={status}, body={body}");
            return Err(ShopError::upstream("product", format!("HTTP {status}: {body}")));
        }

        let envelope: CatalogEnvelope = serde_json::from_str(&body)
            .map_err(|e| ShopError::upstream("product", format!("invalid catalog response: {e}")))?;

        let product = envelope.data.ok_or_else(|| {
            ShopError::upstream("product", format!("catalog response carried no product: {}", envelope.message))
        })?;

        debug!(product = product_id, price = product.price, "catalog record resolved");
        Ok(product)
    }
}

/// One row of the TOML product table
#[derive(Debug, Clone, Deserialize)]
struct CatalogEntry {
    id: ProductId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image_url: String,
    price: i64,
    #[serde(default)]
    user_id: u64,
    #[serde(default)]
    category_id: u64,
}

impl CatalogEntry {
    fn to_product(&self) -> Product {
        Product {
            name: self.name.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            price: self.price,
            user_id: self.user_id,
            category_id: self.category_id,
        }
    }
}

/// Product table loaded from a TOML file; stands in for the catalog
/// service when no remote address is configured.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticCatalog {
    #[serde(default)]
    products: Vec<CatalogEntry>,
}

impl StaticCatalog {
    /// An empty catalog (every lookup fails)
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the table from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Builder: add a product under the given id
    pub fn with_product(mut self, id: ProductId, product: Product) -> Self {
        self.products.push(CatalogEntry {
            id,
            name: product.name,
            description: product.description,
            image_url: product.image_url,
            price: product.price,
            user_id: product.user_id,
            category_id: product.category_id,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl CatalogLookup for StaticCatalog {
    async fn product(&self, product_id: ProductId) -> ShopResult<Product> {
        self.products
            .iter()
            .find(|entry| entry.id == product_id)
            .map(CatalogEntry::to_product)
            .ok_or_else(|| ShopError::not_found("Product not found!"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn client_unwraps_the_catalog_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/product/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Get product success!",
                "status_code": 200,
                "status": "success",
                "data": {
                    "name": "Mechanical Keyboard",
                    "description": "87-key hot-swappable board",
                    "image_url": "https://img.example.com/kbd.png",
                    "price": 100,
                    "user_id": 3,
                    "category_id": 1
                }
            })))
            .mount(&server)
            .await;

        let client = CatalogClient::new(ClientConfig::new(server.uri())).unwrap();
        let product = client.product(42).await.unwrap();
        assert_eq!(product.name, "Mechanical Keyboard");
        assert_eq!(product.price, 100);
    }

    #[tokio::test]
    async fn client_maps_error_statuses_to_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/product/9"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "message": "Product not found!",
                "status_code": 400,
                "status": "error",
                "data": null
            })))
            .mount(&server)
            .await;

        let client = CatalogClient::new(ClientConfig::new(server.uri())).unwrap();
        let err = client.product(9).await.unwrap_err();
        assert!(matches!(err, ShopError::Upstream { .. }));
    }

    #[tokio::test]
    async fn client_rejects_a_bodyless_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/product/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Get product success!",
                "status_code": 200,
                "status": "success",
                "data": null
            })))
            .mount(&server)
            .await;

        let client = CatalogClient::new(ClientConfig::new(server.uri())).unwrap();
        let err = client.product(7).await.unwrap_err();
        assert!(matches!(err, ShopError::Upstream { .. }));
    }

    #[tokio::test]
    async fn client_times_out_against_a_dead_server() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let config = ClientConfig::new(uri).with_timeout(Duration::from_millis(200));
        let client = CatalogClient::new(config).unwrap();
        assert!(client.product(1).await.is_err());
    }

    #[tokio::test]
    async fn static_catalog_parses_toml() {
        let catalog = StaticCatalog::from_toml(
            r#"
            [[products]]
            id = 1
            name = "Mechanical Keyboard"
            price = 100

            [[products]]
            id = 2
            name = "Webcam Cover"
            description = "Slide-type, 3 pack"
            price = 50
            user_id = 3
            category_id = 2
            "#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);

        let product = catalog.product(2).await.unwrap();
        assert_eq!(product.price, 50);
        assert_eq!(product.description, "Slide-type, 3 pack");

        let err = catalog.product(99).await.unwrap_err();
        assert_eq!(err, ShopError::not_found("Product not found!"));
    }

    #[tokio::test]
    async fn static_catalog_builder() {
        let catalog = StaticCatalog::new().with_product(
            5,
            Product {
                name: "USB Hub".into(),
                description: String::new(),
                image_url: String::new(),
                price: 75,
                user_id: 1,
                category_id: 1,
            },
        );

        assert_eq!(catalog.product(5).await.unwrap().price, 75);
        assert!(catalog.product(6).await.is_err());
    }
}
