//! # Payment Gateway Client
//!
//! HTTP client for a remote payment processor. The base address and
//! timeout are injected at construction; nothing in here reads the
//! environment.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shop_core::{PaymentProcessor, PaymentRequest, ShopError, ShopResult};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Connection settings for one upstream service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address of the service, e.g. `http://payment:8080`
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Builder: override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Reply body the processor sends with rejections
#[derive(Debug, Deserialize)]
struct GatewayReply {
    message: String,
}

/// HTTP client for the external payment processor
pub struct PaymentGatewayClient {
    config: ClientConfig,
    client: Client,
}

impl PaymentGatewayClient {
    pub fn new(config: ClientConfig) -> ShopResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ShopError::upstream("payment", e.to_string()))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl PaymentProcessor for PaymentGatewayClient {
    #[instrument(skip(self))]
    async fn process(&self, request: &PaymentRequest) -> ShopResult<()> {
        let url = format!("{}/payment/process", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ShopError::upstream("payment", e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShopError::upstream("payment", e.to_string()))?;

        if !status.is_success() {
            error!("payment processor rejected the charge: status={status}, body={body}");
            let message = serde_json::from_str::<GatewayReply>(&body)
                .map(|reply| reply.message)
                .unwrap_or_else(|_| format!("HTTP {status}: {body}"));
            return Err(ShopError::upstream("payment", message));
        }

        debug!(total = request.total, provider = request.payment_provider_id, "charge accepted");
        Ok(())
    }

    fn gateway_name(&self) -> &'static str {
        "http"
    }
}
