//! # Order Ledger
//!
//! Owns orders, their line items, and the payment state machine. An order
//! is created unpaid from a checkout payload, may have a payment provider
//! selected while unpaid, and moves to paid exactly once.

use crate::checkout::{CheckoutPayload, OrderIntake};
use crate::error::{ShopError, ShopResult};
use crate::payment::{PaymentRequest, SharedProcessor};
use crate::{LineId, OrderId, ProductId, ProviderId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

/// Payment state of an order. Moves from unpaid to paid, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

/// A line in a placed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: LineId,
    pub quantity: i64,
    pub product_id: ProductId,
    pub order_id: OrderId,
}

/// A placed order
///
/// Immutable after creation except for the provider selection (while
/// unpaid) and the unpaid → paid transition. The total is the value copied
/// from the session at hand-off; it is never recomputed from the items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub total: i64,
    pub payment_status: PaymentStatus,
    pub payment_provider_id: Option<ProviderId>,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Default)]
struct LedgerState {
    orders: BTreeMap<OrderId, Order>,
    last_order_id: u64,
    last_item_id: u64,
}

/// Thread-safe in-memory store of record for orders.
///
/// An order and its items are one record: inserts and cascade deletes are
/// single operations, so an order never exists with half its items.
#[derive(Clone, Default)]
pub struct OrderStore {
    state: Arc<RwLock<LedgerState>>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live orders
    pub async fn len(&self) -> usize {
        self.state.read().await.orders.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.orders.is_empty()
    }

    pub async fn get(&self, order_id: OrderId) -> Option<Order> {
        self.state.read().await.orders.get(&order_id).cloned()
    }
}

/// Order Ledger service: creates orders from checkout payloads and drives
/// each order's payment state machine.
#[derive(Clone)]
pub struct OrderLedger {
    store: OrderStore,
    processor: SharedProcessor,
}

impl OrderLedger {
    pub fn new(store: OrderStore, processor: SharedProcessor) -> Self {
        Self { store, processor }
    }

    /// All orders owned by the caller, oldest first
    pub async fn orders(&self, user_id: UserId) -> Vec<Order> {
        let state = self.store.state.read().await;
        state
            .orders
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Record the provider the caller wants to pay through.
    ///
    /// The provider id is not checked against the registry here; an invalid
    /// selection surfaces later, when payment is attempted.
    #[instrument(skip(self))]
    pub async fn select_payment_provider(
        &self,
        order_id: OrderId,
        caller: UserId,
        provider_id: ProviderId,
    ) -> ShopResult<Order> {
        let mut state = self.store.state.write().await;
        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| ShopError::not_found("Order detail not found!"))?;

        if order.user_id != caller {
            return Err(ShopError::forbidden("You can only process payment of your own order!"));
        }
        if order.payment_status.is_paid() {
            return Err(ShopError::conflict("Order already paid!"));
        }

        order.payment_provider_id = Some(provider_id);
        order.updated_at = Utc::now();
        Ok(order.clone())
    }

    /// Charge the order through the payment processor and mark it paid.
    ///
    /// A paid order is never charged again. A failed charge leaves the
    /// order unpaid; retrying is the caller's decision, and a retry may
    /// reach the processor again for an order that is still unpaid.
    #[instrument(skip(self))]
    pub async fn pay_order(&self, order_id: OrderId, caller: UserId) -> ShopResult<Order> {
        let (total, provider_id) = {
            let state = self.store.state.read().await;
            let order = state
                .orders
                .get(&order_id)
                .ok_or_else(|| ShopError::not_found("Order detail not found!"))?;

            if order.user_id != caller {
                return Err(ShopError::forbidden("You can only process payment of your own order!"));
            }
            if order.payment_status.is_paid() {
                return Err(ShopError::conflict("Order already paid!"));
            }
            (order.total, order.payment_provider_id)
        };

        // An order with no selected provider goes out as provider id 0,
        // which the registry never allocates.
        let request = PaymentRequest {
            total,
            payment_provider_id: provider_id.unwrap_or(0),
        };
        self.processor
            .process(&request)
            .await
            .map_err(|e| ShopError::upstream_from("payment", e))?;

        let mut state = self.store.state.write().await;
        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| ShopError::not_found("Order detail not found!"))?;
        order.payment_status = PaymentStatus::Paid;
        order.updated_at = Utc::now();

        info!(
            order = order_id,
            gateway = self.processor.gateway_name(),
            total,
            "order paid"
        );
        Ok(order.clone())
    }

    /// Delete the caller's order together with its items
    #[instrument(skip(self))]
    pub async fn delete_order(&self, order_id: OrderId, caller: UserId) -> ShopResult<()> {
        let mut state = self.store.state.write().await;
        let order = state
            .orders
            .get(&order_id)
            .ok_or_else(|| ShopError::not_found("Order detail not found!"))?;

        if order.user_id != caller {
            return Err(ShopError::forbidden("You can only delete your order!"));
        }

        state.orders.remove(&order_id);
        info!(order = order_id, "order deleted");
        Ok(())
    }
}

#[async_trait]
impl OrderIntake for OrderLedger {
    /// Create an unpaid order from a checkout payload.
    ///
    /// The order and all its items are inserted as one record under one
    /// lock; the ledger never holds a partially created order.
    async fn create_order(&self, payload: &CheckoutPayload) -> ShopResult<Order> {
        let mut state = self.store.state.write().await;

        state.last_order_id += 1;
        let order_id = state.last_order_id;

        let mut items = Vec::with_capacity(payload.items.len());
        for line in &payload.items {
            state.last_item_id += 1;
            items.push(OrderItem {
                id: state.last_item_id,
                quantity: line.quantity,
                product_id: line.product_id,
                order_id,
            });
        }

        let now = Utc::now();
        let order = Order {
            id: order_id,
            user_id: payload.session.user_id,
            total: payload.session.total,
            payment_status: PaymentStatus::Unpaid,
            payment_provider_id: None,
            items,
            created_at: now,
            updated_at: now,
        };
        state.orders.insert(order_id, order.clone());

        info!(order = order_id, user = order.user_id, total = order.total, "order created");
        Ok(order)
    }
}
