//! # Cart Manager
//!
//! Owns a user's in-progress shopping session and its line items, and keeps
//! the session's running total current. Each line is priced through the
//! catalog at the moment it is added; totals are never re-priced
//! retroactively.

use crate::catalog::SharedCatalog;
use crate::error::{ShopError, ShopResult};
use crate::{LineId, ProductId, SessionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// A line in a shopping session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: LineId,
    pub quantity: i64,
    pub product_id: ProductId,
    #[serde(rename = "shopping_session_id")]
    pub session_id: SessionId,
}

/// A user's in-progress shopping session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingSession {
    pub id: SessionId,
    pub user_id: UserId,
    /// Running total in integer currency units
    pub total: i64,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShoppingSession {
    pub(crate) fn new(id: SessionId, user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            total: 0,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for adding a product to the cart or changing a line's quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemInput {
    pub quantity: i64,
    pub product_id: ProductId,
}

#[derive(Default)]
struct CartState {
    sessions: HashMap<SessionId, ShoppingSession>,
    /// user -> the most recently created session (the active one)
    active: HashMap<UserId, SessionId>,
    last_session_id: u64,
    last_line_id: u64,
}

/// Thread-safe in-memory store of record for shopping sessions.
///
/// A session and its items are one record, so cascade deletes are a single
/// operation. Every read-modify-write of a session total runs under one
/// write lock; concurrent mutations for the same user serialize instead of
/// racing.
#[derive(Clone, Default)]
pub struct CartStore {
    state: Arc<RwLock<CartState>>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.sessions.is_empty()
    }

    /// The caller's active session, if any
    pub(crate) async fn active_session(&self, user_id: UserId) -> Option<ShoppingSession> {
        let state = self.state.read().await;
        let session_id = state.active.get(&user_id)?;
        state.sessions.get(session_id).cloned()
    }

    /// Append a priced line to the caller's active session, creating the
    /// session first when none exists.
    pub(crate) async fn append_line(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
        unit_price: i64,
    ) -> CartItem {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let session_id = match state.active.get(&user_id) {
            Some(id) if state.sessions.contains_key(id) => *id,
            _ => {
                state.last_session_id += 1;
                let id = state.last_session_id;
                state.active.insert(user_id, id);
                id
            }
        };

        state.last_line_id += 1;
        let item = CartItem {
            id: state.last_line_id,
            quantity,
            product_id,
            session_id,
        };

        let session = state
            .sessions
            .entry(session_id)
            .or_insert_with(|| ShoppingSession::new(session_id, user_id));
        session.items.push(item.clone());
        session.total += quantity * unit_price;
        session.updated_at = Utc::now();

        item
    }

    /// First line for `product_id` in the caller's active session
    pub(crate) async fn find_line(&self, user_id: UserId, product_id: ProductId) -> Option<CartItem> {
        let state = self.state.read().await;
        let session_id = state.active.get(&user_id)?;
        let session = state.sessions.get(session_id)?;
        session.items.iter().find(|i| i.product_id == product_id).cloned()
    }

    /// Re-quantify the first line for `product_id` and move the session
    /// total accordingly.
    pub(crate) async fn update_line(
        &self,
        user_id: UserId,
        product_id: ProductId,
        new_quantity: i64,
        unit_price: i64,
    ) -> Option<CartItem> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let session_id = *state.active.get(&user_id)?;
        let session = state.sessions.get_mut(&session_id)?;
        let (old_quantity, updated) = {
            let item = session.items.iter_mut().find(|i| i.product_id == product_id)?;
            let old = item.quantity;
            item.quantity = new_quantity;
            (old, item.clone())
        };

        // The total moves by the magnitude of the quantity change,
        // regardless of direction.
        session.total += unit_price * (new_quantity - old_quantity).abs();
        session.updated_at = Utc::now();

        Some(updated)
    }

    /// Remove the caller's active session together with its items
    pub(crate) async fn take_session(&self, user_id: UserId) -> Option<ShoppingSession> {
        let mut state = self.state.write().await;
        let session_id = state.active.remove(&user_id)?;
        state.sessions.remove(&session_id)
    }
}

/// Cart Manager service: accumulates items into the caller's active
/// session, pricing each line through the catalog at add time.
#[derive(Clone)]
pub struct CartManager {
    store: CartStore,
    catalog: SharedCatalog,
}

impl CartManager {
    pub fn new(store: CartStore, catalog: SharedCatalog) -> Self {
        Self { store, catalog }
    }

    /// Add a product to the caller's cart.
    ///
    /// Repeated adds for the same product produce separate lines; nothing
    /// is merged. The unit price is resolved before the store is touched,
    /// so a failed lookup leaves the cart unchanged.
    #[instrument(skip(self))]
    pub async fn add_item(&self, user_id: UserId, input: CartItemInput) -> ShopResult<CartItem> {
        if input.quantity <= 0 {
            return Err(ShopError::validation("Quantity must be greater than zero!"));
        }

        let product = self
            .catalog
            .product(input.product_id)
            .await
            .map_err(|e| ShopError::upstream_from("product", e))?;

        let item = self
            .store
            .append_line(user_id, input.product_id, input.quantity, product.price)
            .await;
        debug!(line = item.id, session = item.session_id, "cart line added");
        Ok(item)
    }

    /// All lines in the caller's active session
    pub async fn items(&self, user_id: UserId) -> ShopResult<Vec<CartItem>> {
        self.store
            .active_session(user_id)
            .await
            .map(|session| session.items)
            .ok_or_else(|| ShopError::not_found("No items added to the cart!"))
    }

    /// Change the quantity of an existing line.
    ///
    /// Only products already in the cart can be updated; adding goes
    /// through [`CartManager::add_item`].
    #[instrument(skip(self))]
    pub async fn update_item(&self, user_id: UserId, input: CartItemInput) -> ShopResult<CartItem> {
        if input.quantity <= 0 {
            return Err(ShopError::validation("Quantity must be greater than zero!"));
        }

        // Confirm the line exists before paying for a catalog round-trip.
        self.store
            .find_line(user_id, input.product_id)
            .await
            .ok_or_else(|| ShopError::not_found("Please use add product method!"))?;

        let product = self
            .catalog
            .product(input.product_id)
            .await
            .map_err(|e| ShopError::upstream_from("product", e))?;

        self.store
            .update_line(user_id, input.product_id, input.quantity, product.price)
            .await
            .ok_or_else(|| ShopError::not_found("Please use add product method!"))
    }

    /// Delete the caller's active session and everything in it
    #[instrument(skip(self))]
    pub async fn drop_cart(&self, user_id: UserId) -> ShopResult<()> {
        self.store
            .take_session(user_id)
            .await
            .map(|_| ())
            .ok_or_else(|| ShopError::not_found("No cart to be dropped!"))
    }
}
