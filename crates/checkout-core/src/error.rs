//! Error Types

use thiserror::Error;

/// Result type alias for checkout state operations
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Checkout state errors
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Action type the reducer does not know about
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Known action type carrying a payload of the wrong shape
    #[error("Invalid payload for action {kind}: {reason}")]
    InvalidAction { kind: String, reason: String },

    /// Currency code is not three ASCII letters
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    /// Form field name outside the five known fields
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    /// Checkout session id unusable in a hosted checkout URL
    #[error("Invalid checkout session id: {0:?}")]
    InvalidSession(String),

    /// Key handed to the payment client is not a publishable key
    #[error("Invalid publishable key")]
    InvalidPublicKey,

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CheckoutError {
    /// Programming errors that must halt the caller instead of being shown to the customer
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CheckoutError::UnknownAction(_) | CheckoutError::InvalidAction { .. }
        )
    }
}
