//! Wire Types
//!
//! JSON bodies exchanged with the checkout backend.

use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::form::FormState;

/// `GET /config` response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfig {
    pub public_key: String,
    pub unit_amount: i64,
    pub currency: Currency,
}

/// `POST /create-checkout-session` body
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    pub quantity: u32,
}

/// `POST /create-checkout-session` response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    pub session_id: String,
}

/// `POST /create-customer` response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: String,
}

/// `POST /create-invoice` body: the form fields plus the new customer id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    #[serde(flatten)]
    pub form: FormState,
    pub customer_id: String,
}

impl InvoiceRequest {
    pub fn new(form: FormState, customer_id: impl Into<String>) -> Self {
        Self {
            form,
            customer_id: customer_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_decodes() {
        let config: CheckoutConfig = serde_json::from_value(json!({
            "publicKey": "pk_test_123",
            "unitAmount": 500,
            "currency": "usd"
        }))
        .unwrap();
        assert_eq!(config.currency.code(), "USD");
        assert_eq!(config.unit_amount, 500);
    }

    #[test]
    fn test_invoice_body_is_flat() {
        let form = FormState {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            fee_type: "kit".into(),
            campus: "ambler".into(),
            program: "esthetics".into(),
        };
        let body = serde_json::to_value(InvoiceRequest::new(form, "cus_123")).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "feeType": "kit",
                "campus": "ambler",
                "program": "esthetics",
                "customerId": "cus_123"
            })
        );
    }
}
