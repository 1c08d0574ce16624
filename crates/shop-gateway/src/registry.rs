//! # Payment Provider Registry
//!
//! Administrative registry of payment providers. Listing is open to every
//! caller; creating, renaming, and deleting providers require an
//! administrator identity.
//!
//! The registry also implements [`PaymentProcessor`], standing in for the
//! real payment network: a charge against a registered provider settles,
//! a charge against an unknown one fails. No funds move.

use async_trait::async_trait;
use shop_core::{
    Identity, PaymentProcessor, PaymentProvider, PaymentRequest, ProviderId, ShopError,
    ShopResult,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

/// Input for creating or renaming a provider
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PaymentProviderInput {
    pub name: String,
}

#[derive(Default)]
struct RegistryState {
    providers: BTreeMap<ProviderId, PaymentProvider>,
    last_id: u64,
}

/// Thread-safe in-memory registry of payment providers
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-seeded with named providers (ids assigned in order,
    /// starting at 1)
    pub fn with_providers<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = RegistryState::default();
        for name in names {
            state.last_id += 1;
            let provider = PaymentProvider {
                id: state.last_id,
                name: name.into(),
            };
            state.providers.insert(provider.id, provider);
        }
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// All registered providers, oldest first
    pub async fn list(&self) -> Vec<PaymentProvider> {
        self.state.read().await.providers.values().cloned().collect()
    }

    pub async fn get(&self, provider_id: ProviderId) -> Option<PaymentProvider> {
        self.state.read().await.providers.get(&provider_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.providers.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.providers.is_empty()
    }

    #[instrument(skip(self, identity), fields(caller = identity.user_id))]
    pub async fn create(
        &self,
        identity: Identity,
        input: PaymentProviderInput,
    ) -> ShopResult<PaymentProvider> {
        if !identity.role.can_administer() {
            return Err(ShopError::forbidden("Only admins can create payment provider!"));
        }
        if input.name.trim().is_empty() {
            return Err(ShopError::validation("Provider name is required!"));
        }

        let mut state = self.state.write().await;
        state.last_id += 1;
        let provider = PaymentProvider {
            id: state.last_id,
            name: input.name,
        };
        state.providers.insert(provider.id, provider.clone());

        info!(provider = provider.id, "payment provider created");
        Ok(provider)
    }

    #[instrument(skip(self, identity), fields(caller = identity.user_id))]
    pub async fn update(
        &self,
        identity: Identity,
        provider_id: ProviderId,
        input: PaymentProviderInput,
    ) -> ShopResult<PaymentProvider> {
        if !identity.role.can_administer() {
            return Err(ShopError::forbidden("Only admins can update payment provider!"));
        }
        if input.name.trim().is_empty() {
            return Err(ShopError::validation("Provider name is required!"));
        }

        let mut state = self.state.write().await;
        let provider = state
            .providers
            .get_mut(&provider_id)
            .ok_or_else(|| ShopError::not_found("Payment provider not found!"))?;
        provider.name = input.name;

        info!(provider = provider_id, "payment provider renamed");
        Ok(provider.clone())
    }

    /// Remove a provider from the registry.
    ///
    /// Orders referencing it are not touched; a later charge against the
    /// removed id fails upstream.
    #[instrument(skip(self, identity), fields(caller = identity.user_id))]
    pub async fn delete(&self, identity: Identity, provider_id: ProviderId) -> ShopResult<()> {
        if !identity.role.can_administer() {
            return Err(ShopError::forbidden("Only admins can delete payment provider!"));
        }

        let mut state = self.state.write().await;
        state
            .providers
            .remove(&provider_id)
            .ok_or_else(|| ShopError::not_found("Payment provider not found!"))?;

        info!(provider = provider_id, "payment provider deleted");
        Ok(())
    }
}

#[async_trait]
impl PaymentProcessor for ProviderRegistry {
    #[instrument(skip(self))]
    async fn process(&self, request: &PaymentRequest) -> ShopResult<()> {
        let state = self.state.read().await;
        if !state.providers.contains_key(&request.payment_provider_id) {
            return Err(ShopError::not_found("Payment provider not found!"));
        }

        info!(
            provider = request.payment_provider_id,
            total = request.total,
            "payment processed"
        );
        Ok(())
    }

    fn gateway_name(&self) -> &'static str {
        "registry"
    }
}
