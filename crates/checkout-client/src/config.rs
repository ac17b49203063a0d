//! Client Configuration

use std::time::Duration;

/// How customer/invoice creation failures are reported
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitErrorSurfacing {
    /// Log only; the form shows nothing
    #[default]
    ConsoleOnly,
    /// Log and store the error in the checkout state
    UserVisible,
}

/// Checkout client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the checkout backend
    pub api_base: String,

    /// Base URL of the hosted checkout page
    pub hosted_checkout_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Reporting mode for submission failures
    pub submit_errors: SubmitErrorSurfacing,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:4242".into(),
            hosted_checkout_url: "https://checkout.stripe.com".into(),
            timeout_secs: 30,
            submit_errors: SubmitErrorSurfacing::ConsoleOnly,
        }
    }
}

impl ClientConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_base = std::env::var("CHECKOUT_API_BASE").unwrap_or(defaults.api_base);
        let hosted_checkout_url =
            std::env::var("CHECKOUT_HOSTED_URL").unwrap_or(defaults.hosted_checkout_url);
        let timeout_secs = std::env::var("CHECKOUT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.timeout_secs);
        let submit_errors = match std::env::var("CHECKOUT_SURFACE_SUBMIT_ERRORS") {
            Ok(flag) if parse_flag(&flag) => SubmitErrorSurfacing::UserVisible,
            _ => SubmitErrorSurfacing::ConsoleOnly,
        };

        Self {
            api_base,
            hosted_checkout_url,
            timeout_secs,
            submit_errors,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
