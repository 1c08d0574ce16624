//! # Request Handlers
//!
//! One handler per operation. Handlers stay thin: extract the caller,
//! delegate to the owning service, wrap the outcome in the envelope.

use axum::extract::{Path, State};
use axum::Json;
use shop_core::CartItemInput;
use shop_gateway::PaymentProviderInput;
use tracing::instrument;

use crate::auth::Caller;
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> ApiResponse {
    ApiResponse::success_with(
        "Connection OK!",
        &serde_json::json!({
            "service": "shop",
            "version": env!("CARGO_PKG_VERSION"),
        }),
    )
}

// =============================================================================
// Cart
// =============================================================================

pub async fn add_cart_item(
    State(state): State<AppState>,
    Caller(identity): Caller,
    Json(input): Json<CartItemInput>,
) -> ApiResult {
    state.cart.add_item(identity.user_id, input).await?;
    Ok(ApiResponse::success("Product added to the cart!"))
}

pub async fn get_cart_items(
    State(state): State<AppState>,
    Caller(identity): Caller,
) -> ApiResult {
    let items = state.cart.items(identity.user_id).await?;
    Ok(ApiResponse::success_with("Get cart item success!", &items))
}

pub async fn update_cart_item(
    State(state): State<AppState>,
    Caller(identity): Caller,
    Json(input): Json<CartItemInput>,
) -> ApiResult {
    state.cart.update_item(identity.user_id, input).await?;
    Ok(ApiResponse::success("Cart item updated successfully!"))
}

pub async fn drop_cart(State(state): State<AppState>, Caller(identity): Caller) -> ApiResult {
    state.cart.drop_cart(identity.user_id).await?;
    Ok(ApiResponse::success("Cart dropped successfully!"))
}

/// Check the cart out into an order; the created order comes back as data
/// so the caller can drive payment without re-listing.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>, Caller(identity): Caller) -> ApiResult {
    let order = state.checkout.checkout(identity.user_id).await?;
    Ok(ApiResponse::success_with("Order created successfully!", &order))
}

// =============================================================================
// Orders
// =============================================================================

pub async fn get_orders(State(state): State<AppState>, Caller(identity): Caller) -> ApiResult {
    let orders = state.orders.orders(identity.user_id).await;
    Ok(ApiResponse::success_with("Get orders detail success!", &orders))
}

pub async fn delete_order(
    State(state): State<AppState>,
    Caller(identity): Caller,
    Path(order_id): Path<u64>,
) -> ApiResult {
    state.orders.delete_order(order_id, identity.user_id).await?;
    Ok(ApiResponse::success("Order deleted successfully!"))
}

pub async fn select_payment_provider(
    State(state): State<AppState>,
    Caller(identity): Caller,
    Path((order_id, provider_id)): Path<(u64, u64)>,
) -> ApiResult {
    state
        .orders
        .select_payment_provider(order_id, identity.user_id, provider_id)
        .await?;
    Ok(ApiResponse::success("Set payment provider success!"))
}

#[instrument(skip(state))]
pub async fn pay_order(
    State(state): State<AppState>,
    Caller(identity): Caller,
    Path(order_id): Path<u64>,
) -> ApiResult {
    state.orders.pay_order(order_id, identity.user_id).await?;
    Ok(ApiResponse::success("Order payment success!"))
}

// =============================================================================
// Payment providers
// =============================================================================

pub async fn list_providers(State(state): State<AppState>) -> ApiResult {
    let providers = state.providers.list().await;
    Ok(ApiResponse::success_with("Get payment providers success!", &providers))
}

pub async fn create_provider(
    State(state): State<AppState>,
    Caller(identity): Caller,
    Json(input): Json<PaymentProviderInput>,
) -> ApiResult {
    let provider = state.providers.create(identity, input).await?;
    Ok(ApiResponse::success_with("Payment provider created successfully!", &provider))
}

pub async fn update_provider(
    State(state): State<AppState>,
    Caller(identity): Caller,
    Path(provider_id): Path<u64>,
    Json(input): Json<PaymentProviderInput>,
) -> ApiResult {
    state.providers.update(identity, provider_id, input).await?;
    Ok(ApiResponse::success("Payment provider changed successfully!"))
}

pub async fn delete_provider(
    State(state): State<AppState>,
    Caller(identity): Caller,
    Path(provider_id): Path<u64>,
) -> ApiResult {
    state.providers.delete(identity, provider_id).await?;
    Ok(ApiResponse::success("Payment provider deleted successfully!"))
}
