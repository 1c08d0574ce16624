//! # shop-api
//!
//! HTTP API layer for the shop checkout engine.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for the cart, checkout, orders, and payment providers
//! - The uniform response envelope every endpoint replies with
//! - Identity extraction from the headers the auth layer forwards
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/v1/cart` | Add a product to the cart |
//! | GET | `/v1/cart` | List cart items |
//! | PATCH | `/v1/cart` | Change a line's quantity |
//! | DELETE | `/v1/cart` | Drop the cart |
//! | POST | `/v1/cart/checkout` | Check the cart out into an order |
//! | GET | `/v1/orders` | List the caller's orders |
//! | DELETE | `/v1/orders/{id}` | Delete an order |
//! | PATCH | `/v1/orders/{id}/provider/{provider_id}` | Select a payment provider |
//! | PATCH | `/v1/orders/{id}/pay` | Pay the order |
//! | GET | `/v1/providers` | List payment providers |
//! | POST | `/v1/providers` | Create a provider (admin) |
//! | PATCH | `/v1/providers/{id}` | Rename a provider (admin) |
//! | DELETE | `/v1/providers/{id}` | Delete a provider (admin) |

pub mod auth;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
