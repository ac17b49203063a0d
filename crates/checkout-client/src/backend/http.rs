//! HTTP Checkout Backend
//!
//! JSON over HTTP with `reqwest`. Every call is attempted once.

use std::time::Duration;

use async_trait::async_trait;
use checkout_core::{
    CheckoutConfig, CheckoutSessionRequest, CheckoutSessionResponse, CustomerRecord, FormState,
    InvoiceRequest,
};
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::{endpoints, CheckoutBackend};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Backend reached over HTTP
pub struct HttpBackend {
    http: reqwest::Client,
    base: Url,
}

impl HttpBackend {
    /// Create a backend rooted at `api_base`
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(api_base)
            .map_err(|e| ClientError::Config(format!("invalid API base {api_base:?}: {e}")))?;

        // Endpoints are joined relative to the base path
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        // The browser's fetch owns request timeouts
        #[cfg(not(target_arch = "wasm32"))]
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        #[cfg(target_arch = "wasm32")]
        let http = {
            let _ = timeout;
            reqwest::Client::builder().build()?
        };

        Ok(Self { http, base })
    }

    /// Create from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.api_base, config.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, endpoint: &str) -> Result<Url> {
        self.base
            .join(endpoint)
            .map_err(|e| ClientError::Config(format!("invalid endpoint {endpoint:?}: {e}")))
    }

    async fn decode<T: DeserializeOwned>(endpoint: &'static str, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(endpoint, status = status.as_u16(), "Backend request failed");
            return Err(ClientError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    async fn post<B, T>(&self, endpoint: &'static str, body: &B) -> Result<T>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        tracing::debug!(endpoint, "POST");
        let response = self.http.post(self.url(endpoint)?).json(body).send().await?;
        Self::decode(endpoint, response).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CheckoutBackend for HttpBackend {
    async fn fetch_config(&self) -> Result<CheckoutConfig> {
        tracing::debug!(endpoint = endpoints::CONFIG, "GET");
        let response = self.http.get(self.url(endpoints::CONFIG)?).send().await?;
        Self::decode(endpoints::CONFIG, response).await
    }

    async fn create_checkout_session(&self, quantity: u32) -> Result<CheckoutSessionResponse> {
        self.post(
            endpoints::CREATE_CHECKOUT_SESSION,
            &CheckoutSessionRequest { quantity },
        )
        .await
    }

    async fn create_customer(&self, form: &FormState) -> Result<CustomerRecord> {
        self.post(endpoints::CREATE_CUSTOMER, form).await
    }

    async fn create_invoice(&self, request: &InvoiceRequest) -> Result<serde_json::Value> {
        self.post(endpoints::CREATE_INVOICE, request).await
    }

    fn name(&self) -> &str {
        "HttpBackend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn backend(server: &mockito::ServerGuard) -> HttpBackend {
        HttpBackend::new(&server.url(), Duration::from_secs(5)).unwrap()
    }

    fn form() -> FormState {
        FormState {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            fee_type: "registration".into(),
            campus: "philadelphia".into(),
            program: "cosmetology".into(),
        }
    }

    #[tokio::test]
    async fn test_fetch_config() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/config")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"publicKey":"pk_test_123","unitAmount":500,"currency":"usd"}"#)
            .expect(1)
            .create_async()
            .await;

        let config = backend(&server).fetch_config().await.unwrap();
        assert_eq!(config.public_key, "pk_test_123");
        assert_eq!(config.unit_amount, 500);
        assert_eq!(config.currency.code(), "USD");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_checkout_session_sends_quantity() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/create-checkout-session")
            .match_body(Matcher::Json(json!({ "quantity": 3 })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sessionId":"cs_test_abc"}"#)
            .create_async()
            .await;

        let session = backend(&server).create_checkout_session(3).await.unwrap();
        assert_eq!(session.session_id, "cs_test_abc");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_customer_then_invoice_bodies() {
        let mut server = mockito::Server::new_async().await;
        let customer_mock = server
            .mock("POST", "/create-customer")
            .match_body(Matcher::Json(json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "feeType": "registration",
                "campus": "philadelphia",
                "program": "cosmetology"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"cus_42","object":"customer"}"#)
            .create_async()
            .await;
        let invoice_mock = server
            .mock("POST", "/create-invoice")
            .match_body(Matcher::PartialJson(json!({ "customerId": "cus_42", "feeType": "registration" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"in_7","status":"draft"}"#)
            .create_async()
            .await;

        let backend = backend(&server);
        let customer = backend.create_customer(&form()).await.unwrap();
        assert_eq!(customer.id, "cus_42");

        let invoice = backend
            .create_invoice(&InvoiceRequest::new(form(), customer.id))
            .await
            .unwrap();
        assert_eq!(invoice["id"], "in_7");

        customer_mock.assert_async().await;
        invoice_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/create-customer")
            .with_status(502)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let err = backend(&server).create_customer(&form()).await.unwrap_err();
        match &err {
            ClientError::Status { endpoint, status, body } => {
                assert_eq!(*endpoint, "create-customer");
                assert_eq!(*status, 502);
                assert_eq!(body, "upstream unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_base_path_prefix() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/config")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"publicKey":"pk_test_1","unitAmount":1000,"currency":"JPY"}"#)
            .create_async()
            .await;

        let backend = HttpBackend::new(&format!("{}/api", server.url()), Duration::from_secs(5)).unwrap();
        assert!(backend.base_url().as_str().ends_with("/api/"));
        backend.fetch_config().await.unwrap();
        mock.assert_async().await;
    }

    #[test]
    fn test_invalid_base() {
        assert!(matches!(
            HttpBackend::new("not a url", Duration::from_secs(1)),
            Err(ClientError::Config(_))
        ));
    }
}
