//! Client Error Types

use checkout_core::CheckoutError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from backend calls and checkout orchestration
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure or undecodable response body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("/{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Action invoked before its preconditions hold
    #[error("Not ready: {0}")]
    NotReady(&'static str),

    /// Payment client could not be initialized
    #[error("Payment client error: {0}")]
    PaymentClient(String),

    /// Checkout state error
    #[error(transparent)]
    Core(#[from] CheckoutError),
}

impl ClientError {
    /// Whether repeating the same user action might succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Http(_) => true,
            ClientError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Message suitable for showing beneath the form
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http(_) => "Could not reach the checkout service. Please try again.".into(),
            ClientError::Status { status, .. } if *status >= 500 => {
                "The checkout service is unavailable. Please try again.".into()
            }
            ClientError::Status { .. } => "The checkout request was rejected.".into(),
            ClientError::PaymentClient(_) => "Payments could not be initialized.".into(),
            ClientError::NotReady(reason) => format!("Checkout is not ready: {reason}."),
            _ => "An error occurred processing your request.".into(),
        }
    }
}
