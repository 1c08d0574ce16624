//! # shop-gateway
//!
//! Payment provider registry and upstream service clients for the shop
//! checkout engine.
//!
//! This crate provides:
//! - `ProviderRegistry` for managing payment providers, doubling as the
//!   in-process payment processor
//! - `PaymentGatewayClient` for charging a remote payment processor
//! - `CatalogClient` for product lookups against the catalog service
//! - `StaticCatalog`, a TOML-loaded product table for self-contained runs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_gateway::{ClientConfig, PaymentGatewayClient, ProviderRegistry};
//!
//! // In-process: the registry settles payments itself.
//! let registry = ProviderRegistry::with_providers(["BCA", "Gopay"]);
//!
//! // Remote: charges go over the wire instead.
//! let gateway = PaymentGatewayClient::new(ClientConfig::new("http://payment:8080"))?;
//! ```

pub mod catalog;
pub mod client;
pub mod registry;

// Re-exports
pub use catalog::{CatalogClient, StaticCatalog};
pub use client::{ClientConfig, PaymentGatewayClient};
pub use registry::{PaymentProviderInput, ProviderRegistry};
