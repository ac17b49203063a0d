//! # checkout-client
//!
//! Backend calls and orchestration for the checkout form.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_client::{CheckoutController, ClientConfig, HostedCheckoutLoader, HttpBackend};
//!
//! let config = ClientConfig::from_env();
//! let backend = Arc::new(HttpBackend::from_config(&config)?);
//! let loader = Arc::new(HostedCheckoutLoader::from_config(&config, navigator));
//!
//! let controller = CheckoutController::new(backend, loader);
//! controller.mount().await?;
//! controller.increment();
//! controller.purchase().await?;
//! ```

pub mod backend;
mod config;
mod controller;
mod error;
mod payment;

pub use backend::{CheckoutBackend, HttpBackend, MockBackend};
pub use config::{ClientConfig, SubmitErrorSurfacing};
pub use controller::{CheckoutController, PurchaseOutcome, SubmitOutcome};
pub use error::{ClientError, Result};
pub use payment::{HostedCheckoutLoader, PaymentClientLoader};
