//! Payment Client Abstraction
//!
//! The payment client is the handle that sends a customer to the provider's
//! hosted checkout page. Front ends supply a [`Navigator`] that knows how to
//! leave for a URL (assign `window.location`, print a link, ...).

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{CheckoutError, Result};
use crate::state::CheckoutFailure;

/// Payment client trait (Strategy pattern)
#[async_trait]
pub trait PaymentClient: Send + Sync {
    /// Send the customer to the hosted checkout page for `session_id`.
    ///
    /// Returns `None` once navigation has started; an error means the
    /// customer is still on the form and should see the message.
    async fn redirect_to_checkout(&self, session_id: &str) -> Option<CheckoutFailure>;

    /// Client name for logs
    fn name(&self) -> &str;
}

/// Opaque, cloneable handle to an initialized payment client.
///
/// Two handles are equal when they point at the same client instance.
#[derive(Clone)]
pub struct ClientHandle(Arc<dyn PaymentClient>);

impl ClientHandle {
    pub fn new(client: Arc<dyn PaymentClient>) -> Self {
        Self(client)
    }

    pub fn client(&self) -> &dyn PaymentClient {
        self.0.as_ref()
    }
}

impl PartialEq for ClientHandle {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClientHandle").field(&self.0.name()).finish()
    }
}

/// Leaves the current page for a URL
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str) -> std::result::Result<(), String>;
}

/// Build the hosted checkout page URL for a session
pub fn hosted_checkout_url(hosted_base: &str, session_id: &str) -> Result<String> {
    let valid = !session_id.is_empty()
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(CheckoutError::InvalidSession(session_id.to_string()));
    }

    Ok(format!(
        "{}/pay/{}",
        hosted_base.trim_end_matches('/'),
        session_id
    ))
}

/// Hosted-redirect payment client keyed by a publishable key
pub struct HostedCheckout {
    public_key: String,
    hosted_base: String,
    navigator: Arc<dyn Navigator>,
}

impl HostedCheckout {
    /// Create a client; `public_key` must be a publishable key (`pk_...`)
    pub fn new(
        public_key: impl Into<String>,
        hosted_base: impl Into<String>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let public_key = public_key.into();
        if !is_publishable_key(&public_key) {
            return Err(CheckoutError::InvalidPublicKey);
        }

        Ok(Self {
            public_key,
            hosted_base: hosted_base.into(),
            navigator,
        })
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

#[async_trait]
impl PaymentClient for HostedCheckout {
    async fn redirect_to_checkout(&self, session_id: &str) -> Option<CheckoutFailure> {
        let url = match hosted_checkout_url(&self.hosted_base, session_id) {
            Ok(url) => url,
            Err(e) => return Some(CheckoutFailure::new(e.to_string())),
        };

        tracing::info!(session_id = %session_id, "Redirecting to hosted checkout");
        self.navigator.navigate(&url).err().map(CheckoutFailure::new)
    }

    fn name(&self) -> &str {
        "HostedCheckout"
    }
}

fn is_publishable_key(key: &str) -> bool {
    key.strip_prefix("pk_").is_some_and(|rest| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNavigator {
        visited: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, url: &str) -> std::result::Result<(), String> {
            self.visited.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    struct BlockedNavigator;

    impl Navigator for BlockedNavigator {
        fn navigate(&self, _url: &str) -> std::result::Result<(), String> {
            Err("Navigation was blocked".into())
        }
    }

    #[test]
    fn test_hosted_checkout_url() {
        assert_eq!(
            hosted_checkout_url("https://checkout.stripe.com/", "cs_test_123").unwrap(),
            "https://checkout.stripe.com/pay/cs_test_123"
        );
        assert!(hosted_checkout_url("https://checkout.stripe.com", "").is_err());
        assert!(hosted_checkout_url("https://checkout.stripe.com", "../admin").is_err());
    }

    #[test]
    fn test_rejects_secret_key() {
        let navigator = Arc::new(RecordingNavigator::default());
        assert!(HostedCheckout::new("sk_test_abc", "https://checkout.stripe.com", navigator.clone()).is_err());
        assert!(HostedCheckout::new("pk_", "https://checkout.stripe.com", navigator).is_err());
    }

    #[tokio::test]
    async fn test_redirect_navigates() {
        let navigator = Arc::new(RecordingNavigator::default());
        let client =
            HostedCheckout::new("pk_test_abc", "https://checkout.stripe.com", navigator.clone()).unwrap();

        assert!(client.redirect_to_checkout("cs_test_1").await.is_none());
        assert_eq!(
            navigator.visited.lock().unwrap().as_slice(),
            ["https://checkout.stripe.com/pay/cs_test_1"]
        );
    }

    #[tokio::test]
    async fn test_redirect_failure_is_returned() {
        let client =
            HostedCheckout::new("pk_test_abc", "https://checkout.stripe.com", Arc::new(BlockedNavigator)).unwrap();

        let error = client.redirect_to_checkout("cs_test_1").await.unwrap();
        assert_eq!(error.message, "Navigation was blocked");

        let error = client.redirect_to_checkout("").await.unwrap();
        assert!(error.message.contains("Invalid checkout session id"));
    }

    #[test]
    fn test_handle_equality_is_identity() {
        let navigator: Arc<dyn Navigator> = Arc::new(BlockedNavigator);
        let a: Arc<dyn PaymentClient> =
            Arc::new(HostedCheckout::new("pk_test_a", "https://x", navigator.clone()).unwrap());
        let b: Arc<dyn PaymentClient> =
            Arc::new(HostedCheckout::new("pk_test_a", "https://x", navigator).unwrap());

        let handle = ClientHandle::new(a);
        assert_eq!(handle, handle.clone());
        assert_ne!(handle, ClientHandle::new(b));
    }
}
