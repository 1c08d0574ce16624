//! # Payment Types
//!
//! The provider registry entry, the request shape sent to the payment
//! processor, and the processor capability the order ledger charges
//! through.

use crate::error::ShopResult;
use crate::ProviderId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A payment provider registered with the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProvider {
    pub id: ProviderId,
    pub name: String,
}

/// Request sent to the payment processor when an order is paid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Order total in integer currency units
    pub total: i64,
    pub payment_provider_id: ProviderId,
}

/// Executes a charge against the payment processor.
///
/// A single attempt per call: failures propagate to the caller, which owns
/// the retry decision.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn process(&self, request: &PaymentRequest) -> ShopResult<()>;

    /// Gateway name (for logging)
    fn gateway_name(&self) -> &'static str;
}

/// Type alias for a shared processor handle (dynamic dispatch)
pub type SharedProcessor = Arc<dyn PaymentProcessor>;
