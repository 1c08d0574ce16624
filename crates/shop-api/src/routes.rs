//! # Routes
//!
//! Axum router for the shop API. The buyer-facing cart and order routes
//! and the provider registry live under one `/v1` tree.

use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Cart
        .route(
            "/v1/cart",
            post(handlers::add_cart_item)
                .get(handlers::get_cart_items)
                .patch(handlers::update_cart_item)
                .delete(handlers::drop_cart),
        )
        .route("/v1/cart/checkout", post(handlers::checkout))
        // Orders
        .route("/v1/orders", get(handlers::get_orders))
        .route("/v1/orders/{order_id}", delete(handlers::delete_order))
        .route(
            "/v1/orders/{order_id}/provider/{provider_id}",
            patch(handlers::select_payment_provider),
        )
        .route("/v1/orders/{order_id}/pay", patch(handlers::pay_order))
        // Payment providers
        .route(
            "/v1/providers",
            get(handlers::list_providers).post(handlers::create_provider),
        )
        .route(
            "/v1/providers/{provider_id}",
            patch(handlers::update_provider).delete(handlers::delete_provider),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
