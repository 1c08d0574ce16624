//! # Checkout Orchestration
//!
//! Hands a completed cart over to the order ledger and clears it. The cart
//! is only torn down after the ledger accepted the order, so a failed
//! hand-off can simply be retried.

use crate::cart::{CartStore, ShoppingSession};
use crate::error::{ShopError, ShopResult};
use crate::order::Order;
use crate::{ProductId, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Snapshot of a session inside a checkout payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Total in integer currency units, copied as-is from the session
    pub total: i64,
    pub user_id: UserId,
}

/// One cart line inside a checkout payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub quantity: i64,
    pub product_id: ProductId,
}

/// Payload handed from the cart to the order ledger at checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPayload {
    pub session: SessionSnapshot,
    pub items: Vec<OrderLine>,
}

impl CheckoutPayload {
    /// Snapshot a session and its lines into the hand-off shape
    pub fn from_session(session: &ShoppingSession) -> Self {
        Self {
            session: SessionSnapshot {
                total: session.total,
                user_id: session.user_id,
            },
            items: session
                .items
                .iter()
                .map(|item| OrderLine {
                    quantity: item.quantity,
                    product_id: item.product_id,
                })
                .collect(),
        }
    }
}

/// Accepts checkout payloads and turns them into orders.
#[async_trait]
pub trait OrderIntake: Send + Sync {
    async fn create_order(&self, payload: &CheckoutPayload) -> ShopResult<Order>;
}

/// Type alias for a shared intake handle (dynamic dispatch)
pub type SharedIntake = Arc<dyn OrderIntake>;

/// Checkout Orchestrator: snapshots the active cart, hands it to the order
/// intake, and clears the cart once the hand-off succeeded.
#[derive(Clone)]
pub struct CheckoutOrchestrator {
    carts: CartStore,
    intake: SharedIntake,
}

impl CheckoutOrchestrator {
    pub fn new(carts: CartStore, intake: SharedIntake) -> Self {
        Self { carts, intake }
    }

    /// Transfer the caller's cart to the order ledger and clear it.
    #[instrument(skip(self))]
    pub async fn checkout(&self, user_id: UserId) -> ShopResult<Order> {
        let session = self
            .carts
            .active_session(user_id)
            .await
            .ok_or_else(|| ShopError::not_found("No cart to be checked out!"))?;

        let payload = CheckoutPayload::from_session(&session);

        // Nothing is deleted until the intake accepted the order; a failed
        // hand-off leaves the cart intact and the call retryable.
        let order = self
            .intake
            .create_order(&payload)
            .await
            .map_err(|e| ShopError::upstream_from("order", e))?;

        // No idempotency token links order creation to this teardown: if
        // the teardown is lost, a retried checkout creates a second order.
        self.carts.take_session(user_id).await;

        info!(order = order.id, user = user_id, total = order.total, "cart checked out");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartItemInput, CartManager};
    use crate::order::{OrderLedger, OrderStore, PaymentStatus};
    use crate::test_support::{FixedCatalog, RecordingProcessor, RejectingIntake};
    use std::sync::Arc;

    struct Fixture {
        cart: CartManager,
        checkout: CheckoutOrchestrator,
        ledger: OrderLedger,
    }

    fn fixture() -> Fixture {
        let carts = CartStore::new();
        let catalog = FixedCatalog::new().with_price(1, 100).with_price(2, 50);
        let ledger = OrderLedger::new(OrderStore::new(), Arc::new(RecordingProcessor::approving()));
        Fixture {
            cart: CartManager::new(carts.clone(), Arc::new(catalog)),
            checkout: CheckoutOrchestrator::new(carts, Arc::new(ledger.clone())),
            ledger,
        }
    }

    #[tokio::test]
    async fn checkout_transfers_the_cart_into_an_order() {
        let fx = fixture();

        fx.cart.add_item(7, CartItemInput { quantity: 2, product_id: 1 }).await.unwrap();
        fx.cart.add_item(7, CartItemInput { quantity: 1, product_id: 2 }).await.unwrap();

        let order = fx.checkout.checkout(7).await.unwrap();
        assert_eq!(order.user_id, 7);
        assert_eq!(order.total, 250);
        assert_eq!(order.payment_status, PaymentStatus::Unpaid);
        assert_eq!(order.items.len(), 2);

        // The cart is gone once the hand-off succeeded.
        assert!(fx.cart.items(7).await.is_err());
        assert_eq!(fx.ledger.orders(7).await.len(), 1);
    }

    #[tokio::test]
    async fn checkout_without_a_cart_creates_nothing() {
        let fx = fixture();

        let err = fx.checkout.checkout(7).await.unwrap_err();
        assert_eq!(err, ShopError::not_found("No cart to be checked out!"));
        assert!(fx.ledger.orders(7).await.is_empty());
    }

    #[tokio::test]
    async fn failed_hand_off_leaves_the_cart_intact() {
        let carts = CartStore::new();
        let catalog = FixedCatalog::new().with_price(1, 100);
        let cart = CartManager::new(carts.clone(), Arc::new(catalog));
        let checkout = CheckoutOrchestrator::new(carts.clone(), Arc::new(RejectingIntake));

        cart.add_item(7, CartItemInput { quantity: 2, product_id: 1 }).await.unwrap();

        let err = checkout.checkout(7).await.unwrap_err();
        assert!(matches!(err, ShopError::Upstream { .. }));
        assert_eq!(cart.items(7).await.unwrap().len(), 1);

        // A retry against a healthy intake succeeds with the same cart.
        let ledger = OrderLedger::new(OrderStore::new(), Arc::new(RecordingProcessor::approving()));
        let retry = CheckoutOrchestrator::new(carts, Arc::new(ledger.clone()));
        let order = retry.checkout(7).await.unwrap();
        assert_eq!(order.total, 200);
        assert!(cart.items(7).await.is_err());
    }

    #[tokio::test]
    async fn each_checkout_produces_a_distinct_order() {
        let fx = fixture();

        fx.cart.add_item(7, CartItemInput { quantity: 1, product_id: 1 }).await.unwrap();
        let first = fx.checkout.checkout(7).await.unwrap();

        fx.cart.add_item(7, CartItemInput { quantity: 1, product_id: 2 }).await.unwrap();
        let second = fx.checkout.checkout(7).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(fx.ledger.orders(7).await.len(), 2);
    }

    #[test]
    fn payload_snapshots_totals_and_lines() {
        let mut session = ShoppingSession::new(1, 7);
        session.total = 250;
        session.items.push(crate::cart::CartItem { id: 1, quantity: 2, product_id: 1, session_id: 1 });
        session.items.push(crate::cart::CartItem { id: 2, quantity: 1, product_id: 2, session_id: 1 });

        let payload = CheckoutPayload::from_session(&session);
        assert_eq!(payload.session.total, 250);
        assert_eq!(payload.session.user_id, 7);
        assert_eq!(payload.items.len(), 2);
        assert_eq!(payload.items[0], OrderLine { quantity: 2, product_id: 1 });
    }
}
