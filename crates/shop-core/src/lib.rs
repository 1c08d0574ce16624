//! # shop-core
//!
//! Core domain for the shop checkout engine.
//!
//! This crate provides:
//! - `CartManager` and `CartStore` for shopping sessions and their line items
//! - `CheckoutOrchestrator` for the cart → order hand-off
//! - `OrderLedger` and `OrderStore` for orders and the payment state machine
//! - Capability traits (`CatalogLookup`, `PaymentProcessor`, `OrderIntake`)
//!   implemented by upstream clients and registries
//! - `ShopError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{CartItemInput, CartManager, CartStore, CheckoutOrchestrator};
//!
//! let carts = CartStore::default();
//! let cart = CartManager::new(carts.clone(), catalog);
//! let checkout = CheckoutOrchestrator::new(carts, intake);
//!
//! cart.add_item(user_id, CartItemInput { quantity: 2, product_id: 1 }).await?;
//! let order = checkout.checkout(user_id).await?;
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod identity;
pub mod order;
pub mod payment;

#[cfg(test)]
pub(crate) mod test_support;

/// Identifier of a registered user (assigned by the identity service).
pub type UserId = u64;
/// Identifier of a catalog product (assigned by the catalog service).
pub type ProductId = u64;
/// Identifier of a payment provider.
pub type ProviderId = u64;
/// Identifier of a shopping session.
pub type SessionId = u64;
/// Identifier of a placed order.
pub type OrderId = u64;
/// Identifier of a cart or order line.
pub type LineId = u64;

// Re-exports for convenience
pub use cart::{CartItem, CartItemInput, CartManager, CartStore, ShoppingSession};
pub use catalog::{CatalogLookup, Product, SharedCatalog};
pub use checkout::{
    CheckoutOrchestrator, CheckoutPayload, OrderIntake, OrderLine, SessionSnapshot, SharedIntake,
};
pub use error::{ShopError, ShopResult};
pub use identity::{Identity, Role};
pub use order::{Order, OrderItem, OrderLedger, OrderStore, PaymentStatus};
pub use payment::{PaymentProcessor, PaymentProvider, PaymentRequest, SharedProcessor};
