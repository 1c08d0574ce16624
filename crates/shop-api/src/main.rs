//! # shop-server
//!
//! HTTP server binary for the shop checkout engine.
//!
//! ```bash
//! # Optional: point the cart at a remote catalog and payment processor
//! export PRODUCT_URL=http://product:8080
//! export PAYMENT_URL=http://payment:8080
//!
//! shop-server
//! ```

use shop_api::{routes, state::{AppConfig, AppState}};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = AppConfig::from_env();
    let addr: std::net::SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("environment: {}", config.environment);
    let state = AppState::new(config)?;
    let app = routes::create_router(state);

    info!("shop server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
