//! Price State & Reducer
//!
//! `PriceState` is only ever changed by [`reduce`], a pure transition
//! function. Remote calls happen elsewhere and dispatch their results back
//! in as [`Action`]s.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::currency::{format_price, Currency};
use crate::error::{CheckoutError, Result};
use crate::payment::ClientHandle;

/// Lowest quantity a customer can select
pub const MIN_QUANTITY: u32 = 1;

/// Error object shown to the customer beneath the form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutFailure {
    pub message: String,
}

impl CheckoutFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CheckoutFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Checkout price state.
///
/// Fields are read through accessors; `price` is derived from quantity,
/// unit amount and currency and is recomputed on every change to them.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceState {
    quantity: u32,
    unit_amount: i64,
    currency: Option<Currency>,
    price: Option<String>,
    loading: bool,
    error: Option<CheckoutFailure>,
    payment_client: Option<ClientHandle>,
}

impl Default for PriceState {
    fn default() -> Self {
        Self {
            quantity: MIN_QUANTITY,
            unit_amount: 0,
            currency: None,
            price: None,
            loading: false,
            error: None,
            payment_client: None,
        }
    }
}

impl PriceState {
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price in minor units (major units for zero-decimal currencies)
    pub fn unit_amount(&self) -> i64 {
        self.unit_amount
    }

    pub fn currency(&self) -> Option<&Currency> {
        self.currency.as_ref()
    }

    /// Formatted total; `None` until configuration has been loaded
    pub fn price(&self) -> Option<&str> {
        self.price.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&CheckoutFailure> {
        self.error.as_ref()
    }

    pub fn payment_client(&self) -> Option<&ClientHandle> {
        self.payment_client.as_ref()
    }

    /// Whether a purchase may start now
    pub fn can_purchase(&self) -> bool {
        self.payment_client.is_some() && !self.loading
    }

    fn repriced(mut self) -> Self {
        self.price = self
            .currency
            .as_ref()
            .map(|currency| format_price(self.unit_amount, currency, self.quantity));
        self
    }
}

/// State transitions
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Configuration and payment client are ready
    ConfigLoaded {
        unit_amount: i64,
        currency: Currency,
        payment_client: Option<ClientHandle>,
    },
    Increment,
    Decrement,
    SetLoading { loading: bool },
    SetError { error: Option<CheckoutFailure> },
}

#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigPayload {
    unit_amount: i64,
    currency: Currency,
}

#[derive(Deserialize)]
struct LoadingPayload {
    loading: bool,
}

#[derive(Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    error: Option<CheckoutFailure>,
}

impl Action {
    /// Action type name as it appears in serialized actions
    pub fn kind(&self) -> &'static str {
        match self {
            Action::ConfigLoaded { .. } => "configLoaded",
            Action::Increment => "increment",
            Action::Decrement => "decrement",
            Action::SetLoading { .. } => "setLoading",
            Action::SetError { .. } => "setError",
        }
    }

    /// Decode an action from `{"type": ..., "payload": ...}`.
    ///
    /// Unknown action types are rejected with [`CheckoutError::UnknownAction`].
    /// A decoded `configLoaded` never carries a payment client.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let raw: RawAction = serde_json::from_value(value)?;

        match raw.kind.as_str() {
            "configLoaded" => {
                let payload: ConfigPayload = decode_payload(&raw.kind, raw.payload)?;
                Ok(Action::ConfigLoaded {
                    unit_amount: payload.unit_amount,
                    currency: payload.currency,
                    payment_client: None,
                })
            }
            "increment" => Ok(Action::Increment),
            "decrement" => Ok(Action::Decrement),
            "setLoading" => {
                let payload: LoadingPayload = decode_payload(&raw.kind, raw.payload)?;
                Ok(Action::SetLoading {
                    loading: payload.loading,
                })
            }
            "setError" => {
                let payload: ErrorPayload = decode_payload(&raw.kind, raw.payload)?;
                Ok(Action::SetError {
                    error: payload.error,
                })
            }
            _ => Err(CheckoutError::UnknownAction(raw.kind)),
        }
    }
}

fn decode_payload<T: DeserializeOwned>(kind: &str, payload: serde_json::Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|e| CheckoutError::InvalidAction {
        kind: kind.to_string(),
        reason: e.to_string(),
    })
}

/// Apply `action` to `state`, returning the next state.
///
/// Decrement stops at [`MIN_QUANTITY`]. Price stays unset until a currency
/// is known. Configuration is applied once; later `ConfigLoaded` actions
/// are ignored.
pub fn reduce(state: &PriceState, action: Action) -> PriceState {
    let mut next = state.clone();

    match action {
        Action::ConfigLoaded {
            unit_amount,
            currency,
            payment_client,
        } => {
            if next.currency.is_some() {
                return next;
            }
            next.unit_amount = unit_amount;
            next.currency = Some(currency);
            next.payment_client = payment_client;
            next.repriced()
        }
        Action::Increment => {
            next.quantity = next.quantity.saturating_add(1);
            next.repriced()
        }
        Action::Decrement => {
            next.quantity = next.quantity.saturating_sub(1).max(MIN_QUANTITY);
            next.repriced()
        }
        Action::SetLoading { loading } => {
            next.loading = loading;
            next
        }
        Action::SetError { error } => {
            next.error = error;
            next
        }
    }
}
