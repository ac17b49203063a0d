//! View Model
//!
//! What a front end shows for a given [`PriceState`].

use serde::Serialize;

use crate::state::PriceState;

pub const LABEL_LOADING: &str = "Loading...";
pub const LABEL_SUBMIT: &str = "Submit";

/// Render-ready checkout view
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckoutView {
    pub quantity: u32,
    pub price: Option<String>,
    pub button_label: &'static str,
    /// Disabled until the payment client is ready, and while a purchase is in flight
    pub button_disabled: bool,
    pub error_message: Option<String>,
}

impl CheckoutView {
    pub fn from_state(state: &PriceState) -> Self {
        let button_label = if state.is_loading() || state.price().is_none() {
            LABEL_LOADING
        } else {
            LABEL_SUBMIT
        };

        Self {
            quantity: state.quantity(),
            price: state.price().map(str::to_string),
            button_label,
            button_disabled: !state.can_purchase(),
            error_message: state.error().map(|e| e.message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use crate::state::{reduce, Action, CheckoutFailure};

    #[test]
    fn test_initial_view() {
        let view = CheckoutView::from_state(&PriceState::default());
        assert_eq!(view.button_label, LABEL_LOADING);
        assert!(view.button_disabled);
        assert_eq!(view.error_message, None);
    }

    #[test]
    fn test_priced_without_client_stays_disabled() {
        let state = reduce(
            &PriceState::default(),
            Action::ConfigLoaded {
                unit_amount: 500,
                currency: Currency::parse("USD").unwrap(),
                payment_client: None,
            },
        );
        let view = CheckoutView::from_state(&state);
        assert_eq!(view.button_label, LABEL_SUBMIT);
        assert_eq!(view.price.as_deref(), Some("$5.00"));
        assert!(view.button_disabled);
    }

    #[test]
    fn test_error_is_shown() {
        let state = reduce(
            &PriceState::default(),
            Action::SetError {
                error: Some(CheckoutFailure::new("Your card was declined.")),
            },
        );
        let view = CheckoutView::from_state(&state);
        assert_eq!(view.error_message.as_deref(), Some("Your card was declined."));
    }
}
