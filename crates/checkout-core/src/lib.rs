//! # checkout-core
//!
//! State and formatting logic behind the checkout form.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       CheckoutStore                          │
//! │  ┌────────────┐   ┌──────────────┐   ┌────────────────────┐  │
//! │  │   Action   │──▶│    reduce    │──▶│ PriceState (watch) │  │
//! │  └────────────┘   └──────────────┘   └────────────────────┘  │
//! │                          │                                   │
//! │                   format_price (en-US)                       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Remote calls live in `checkout-client` (native) and `checkout-web`
//! (browser); both feed results back in as actions and render through
//! [`CheckoutView`].

pub mod currency;
pub mod error;
pub mod form;
pub mod payment;
pub mod state;
pub mod store;
pub mod view;
pub mod wire;

pub use currency::{format_price, Currency, CurrencyFormatter};
pub use error::{CheckoutError, Result};
pub use form::{FormField, FormState};
pub use payment::{ClientHandle, HostedCheckout, Navigator, PaymentClient};
pub use state::{reduce, Action, CheckoutFailure, PriceState, MIN_QUANTITY};
pub use store::CheckoutStore;
pub use view::CheckoutView;
pub use wire::{
    CheckoutConfig, CheckoutSessionRequest, CheckoutSessionResponse, CustomerRecord, InvoiceRequest,
};
