//! # Catalog Lookup
//!
//! Read-side capability over the external product catalog. The catalog is
//! consumed, not owned: the cart only ever asks it for the record behind a
//! product id, and the unit price inside it.

use crate::error::ShopResult;
use crate::ProductId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A product record as served by the catalog service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    /// Unit price in integer currency units
    pub price: i64,
    /// Seller that listed the product
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub category_id: u64,
}

/// Resolves a product id to its catalog record.
///
/// Implementations are single-attempt: a failed lookup is surfaced to the
/// caller, never retried here.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn product(&self, product_id: ProductId) -> ShopResult<Product>;
}

/// Type alias for a shared catalog handle (dynamic dispatch)
pub type SharedCatalog = Arc<dyn CatalogLookup>;
