//! Checkout Backend
//!
//! The four remote endpoints the checkout form talks to.

mod http;
mod mock;

pub use http::HttpBackend;
pub use mock::MockBackend;

use async_trait::async_trait;
use checkout_core::{CheckoutConfig, CheckoutSessionResponse, CustomerRecord, FormState, InvoiceRequest};

use crate::error::Result;

/// Endpoint paths, relative to the backend base URL
pub mod endpoints {
    pub const CONFIG: &str = "config";
    pub const CREATE_CHECKOUT_SESSION: &str = "create-checkout-session";
    pub const CREATE_CUSTOMER: &str = "create-customer";
    pub const CREATE_INVOICE: &str = "create-invoice";
}

/// Checkout backend trait (Strategy pattern).
///
/// In the browser the request futures are not `Send`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CheckoutBackend: Send + Sync {
    /// `GET /config`
    async fn fetch_config(&self) -> Result<CheckoutConfig>;

    /// `POST /create-checkout-session`
    async fn create_checkout_session(&self, quantity: u32) -> Result<CheckoutSessionResponse>;

    /// `POST /create-customer`
    async fn create_customer(&self, form: &FormState) -> Result<CustomerRecord>;

    /// `POST /create-invoice`; the response shape is backend-defined
    async fn create_invoice(&self, request: &InvoiceRequest) -> Result<serde_json::Value>;

    /// Backend name for logs
    fn name(&self) -> &str;
}
