//! Shared stubs for the crate's unit tests.

use crate::catalog::{CatalogLookup, Product};
use crate::checkout::{CheckoutPayload, OrderIntake};
use crate::error::{ShopError, ShopResult};
use crate::order::Order;
use crate::payment::{PaymentProcessor, PaymentRequest};
use crate::ProductId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// Catalog stub with adjustable prices.
#[derive(Default)]
pub struct FixedCatalog {
    prices: RwLock<HashMap<ProductId, i64>>,
}

impl FixedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(self, product_id: ProductId, price: i64) -> Self {
        self.prices.write().unwrap().insert(product_id, price);
        self
    }

    pub fn set_price(&self, product_id: ProductId, price: i64) {
        self.prices.write().unwrap().insert(product_id, price);
    }
}

#[async_trait]
impl CatalogLookup for FixedCatalog {
    async fn product(&self, product_id: ProductId) -> ShopResult<Product> {
        let prices = self.prices.read().unwrap();
        prices
            .get(&product_id)
            .map(|&price| Product {
                name: format!("product-{product_id}"),
                description: String::new(),
                image_url: String::new(),
                price,
                user_id: 1,
                category_id: 1,
            })
            .ok_or_else(|| ShopError::not_found("Product not found!"))
    }
}

/// Catalog stub whose lookups always fail at the transport level.
pub struct UnreachableCatalog;

#[async_trait]
impl CatalogLookup for UnreachableCatalog {
    async fn product(&self, _product_id: ProductId) -> ShopResult<Product> {
        Err(ShopError::upstream("product", "connection refused"))
    }
}

/// Processor stub recording every charge it sees; optionally rejecting
/// them all.
#[derive(Default)]
pub struct RecordingProcessor {
    calls: AtomicUsize,
    last: RwLock<Option<PaymentRequest>>,
    reject: bool,
}

impl RecordingProcessor {
    pub fn approving() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<PaymentRequest> {
        self.last.read().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProcessor for RecordingProcessor {
    async fn process(&self, request: &PaymentRequest) -> ShopResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.write().unwrap() = Some(request.clone());
        if self.reject {
            Err(ShopError::upstream("payment", "gateway unavailable"))
        } else {
            Ok(())
        }
    }

    fn gateway_name(&self) -> &'static str {
        "recording"
    }
}

/// Intake stub that always refuses the hand-off.
pub struct RejectingIntake;

#[async_trait]
impl OrderIntake for RejectingIntake {
    async fn create_order(&self, _payload: &CheckoutPayload) -> ShopResult<Order> {
        Err(ShopError::upstream("order", "order service unavailable"))
    }
}
