//! Mock Checkout Backend
//!
//! In-memory backend for tests and offline demos. Records every call and
//! can be told to fail individual endpoints.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use checkout_core::{
    CheckoutConfig, CheckoutSessionResponse, Currency, CustomerRecord, FormState, InvoiceRequest,
};
use serde_json::json;
use uuid::Uuid;

use super::{endpoints, CheckoutBackend};
use crate::error::{ClientError, Result};

/// Mock backend with a fixed configuration
pub struct MockBackend {
    config: CheckoutConfig,
    failing: Vec<&'static str>,
    calls: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// $5.00 per item, test publishable key
    pub fn new() -> Self {
        Self::with_config(CheckoutConfig {
            public_key: "pk_test_mock".into(),
            unit_amount: 500,
            currency: Currency::usd(),
        })
    }

    pub fn with_config(config: CheckoutConfig) -> Self {
        Self {
            config,
            failing: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer `endpoint` with HTTP 500 from now on
    pub fn failing(mut self, endpoint: &'static str) -> Self {
        self.failing.push(endpoint);
        self
    }

    /// Calls received so far, with their JSON bodies
    pub fn calls(&self) -> Vec<(&'static str, serde_json::Value)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Endpoints called so far, in order
    pub fn endpoints_called(&self) -> Vec<&'static str> {
        self.calls().into_iter().map(|(endpoint, _)| endpoint).collect()
    }

    fn record(&self, endpoint: &'static str, body: serde_json::Value) -> Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((endpoint, body));

        if self.failing.contains(&endpoint) {
            return Err(ClientError::Status {
                endpoint,
                status: 500,
                body: "mock failure".into(),
            });
        }
        Ok(())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CheckoutBackend for MockBackend {
    async fn fetch_config(&self) -> Result<CheckoutConfig> {
        self.record(endpoints::CONFIG, serde_json::Value::Null)?;
        Ok(self.config.clone())
    }

    async fn create_checkout_session(&self, quantity: u32) -> Result<CheckoutSessionResponse> {
        self.record(endpoints::CREATE_CHECKOUT_SESSION, json!({ "quantity": quantity }))?;
        Ok(CheckoutSessionResponse {
            session_id: format!("cs_test_{}", Uuid::new_v4().simple()),
        })
    }

    async fn create_customer(&self, form: &FormState) -> Result<CustomerRecord> {
        self.record(endpoints::CREATE_CUSTOMER, serde_json::to_value(form).unwrap_or_default())?;
        Ok(CustomerRecord {
            id: format!("cus_{}", Uuid::new_v4().simple()),
        })
    }

    async fn create_invoice(&self, request: &InvoiceRequest) -> Result<serde_json::Value> {
        self.record(endpoints::CREATE_INVOICE, serde_json::to_value(request).unwrap_or_default())?;
        Ok(json!({
            "id": format!("in_{}", Uuid::new_v4().simple()),
            "customer": request.customer_id,
            "status": "draft",
        }))
    }

    fn name(&self) -> &str {
        "MockBackend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls() {
        let backend = MockBackend::new();
        let session = backend.create_checkout_session(2).await.unwrap();
        assert!(session.session_id.starts_with("cs_test_"));
        assert_eq!(backend.calls(), vec![("create-checkout-session", json!({ "quantity": 2 }))]);
    }

    #[tokio::test]
    async fn test_failing_endpoint() {
        let backend = MockBackend::new().failing(endpoints::CONFIG);
        assert!(matches!(
            backend.fetch_config().await,
            Err(ClientError::Status { status: 500, .. })
        ));
        assert_eq!(backend.endpoints_called(), vec!["config"]);
    }
}
