//! # Application State
//!
//! Environment configuration and the wiring of stores, registry, and
//! services. Upstream addresses are resolved here, once; the services
//! receive explicitly configured clients instead of reading the
//! environment themselves.

use shop_core::{
    CartManager, CartStore, CheckoutOrchestrator, OrderLedger, OrderStore, SharedCatalog,
    SharedProcessor,
};
use shop_gateway::{CatalogClient, ClientConfig, PaymentGatewayClient, ProviderRegistry, StaticCatalog};
use std::sync::Arc;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the remote product catalog; unset means the static
    /// TOML catalog is used
    pub product_url: Option<String>,
    /// Path of the static catalog file
    pub products_file: String,
    /// Base URL of the remote payment processor; unset means payments are
    /// settled against the in-process provider registry
    pub payment_url: Option<String>,
    /// Timeout applied to every upstream request
    pub upstream_timeout: Duration,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            product_url: std::env::var("PRODUCT_URL").ok(),
            products_file: std::env::var("PRODUCTS_FILE")
                .unwrap_or_else(|_| "config/products.toml".to_string()),
            payment_url: std::env::var("PAYMENT_URL").ok(),
            upstream_timeout: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(30)),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub cart: CartManager,
    pub checkout: CheckoutOrchestrator,
    pub orders: OrderLedger,
    pub providers: ProviderRegistry,
    pub config: AppConfig,
}

impl AppState {
    /// Wire stores, registry, and services from configuration
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let registry = ProviderRegistry::new();

        let catalog: SharedCatalog = match &config.product_url {
            Some(url) => {
                tracing::info!("using remote catalog at {url}");
                Arc::new(CatalogClient::new(
                    ClientConfig::new(url).with_timeout(config.upstream_timeout),
                )?)
            }
            None => Arc::new(load_static_catalog(&config.products_file)?),
        };

        let processor: SharedProcessor = match &config.payment_url {
            Some(url) => {
                tracing::info!("using remote payment processor at {url}");
                Arc::new(PaymentGatewayClient::new(
                    ClientConfig::new(url).with_timeout(config.upstream_timeout),
                )?)
            }
            None => Arc::new(registry.clone()),
        };

        Ok(Self::wire(catalog, processor, registry, config))
    }

    /// Wiring with explicit collaborators (used by tests)
    pub fn with_parts(catalog: SharedCatalog, registry: ProviderRegistry, config: AppConfig) -> Self {
        let processor: SharedProcessor = Arc::new(registry.clone());
        Self::wire(catalog, processor, registry, config)
    }

    fn wire(
        catalog: SharedCatalog,
        processor: SharedProcessor,
        registry: ProviderRegistry,
        config: AppConfig,
    ) -> Self {
        let carts = CartStore::new();
        let ledger = OrderLedger::new(OrderStore::new(), processor);

        Self {
            cart: CartManager::new(carts.clone(), catalog),
            checkout: CheckoutOrchestrator::new(carts, Arc::new(ledger.clone())),
            orders: ledger,
            providers: registry,
            config,
        }
    }
}

/// Load the static product catalog, falling back to an empty table when
/// the file is absent
fn load_static_catalog(path: &str) -> anyhow::Result<StaticCatalog> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let catalog = StaticCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("failed to parse {path}: {e}"))?;
            tracing::info!("loaded {} products from {}", catalog.len(), path);
            Ok(catalog)
        }
        Err(_) => {
            tracing::warn!("no product catalog at {path}, starting with an empty catalog");
            Ok(StaticCatalog::new())
        }
    }
}
