//! Payment Client Initialization

use std::sync::Arc;

use async_trait::async_trait;
use checkout_core::{ClientHandle, HostedCheckout, Navigator};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Asynchronously initializes a payment client from a publishable key
#[async_trait]
pub trait PaymentClientLoader: Send + Sync {
    async fn load(&self, public_key: &str) -> Result<ClientHandle>;
}

/// Loader for the hosted-redirect checkout client
pub struct HostedCheckoutLoader {
    hosted_base: String,
    navigator: Arc<dyn Navigator>,
}

impl HostedCheckoutLoader {
    pub fn new(hosted_base: impl Into<String>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            hosted_base: hosted_base.into(),
            navigator,
        }
    }

    pub fn from_config(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> Self {
        Self::new(config.hosted_checkout_url.clone(), navigator)
    }
}

#[async_trait]
impl PaymentClientLoader for HostedCheckoutLoader {
    async fn load(&self, public_key: &str) -> Result<ClientHandle> {
        let client = HostedCheckout::new(public_key, self.hosted_base.clone(), self.navigator.clone())
            .map_err(|e| ClientError::PaymentClient(e.to_string()))?;

        tracing::debug!(hosted_base = %self.hosted_base, "Payment client initialized");
        Ok(ClientHandle::new(Arc::new(client)))
    }
}
