//! Checkout Controller
//!
//! Orchestrates the remote calls behind the checkout form. The controller
//! never mutates state directly: every result is dispatched into the
//! [`CheckoutStore`] as an [`Action`].
//!
//! ```text
//! mount:    GET /config ──▶ load payment client ──▶ configLoaded
//! purchase: setLoading ──▶ POST /create-checkout-session ──▶ redirect
//!                                          └─ error ──▶ setError, setLoading(false)
//! submit:   POST /create-customer ──▶ POST /create-invoice (customerId)
//! checkout: setLoading ──▶ submit ──▶ purchase
//! ```

use std::sync::Arc;

use checkout_core::{
    Action, CheckoutFailure, CheckoutStore, CheckoutView, FormState, InvoiceRequest, PaymentClient,
    PriceState,
};

use crate::backend::{endpoints, CheckoutBackend};
use crate::config::SubmitErrorSurfacing;
use crate::error::{ClientError, Result};
use crate::payment::PaymentClientLoader;

/// Result of a purchase attempt that reached the payment client
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Navigation to the hosted checkout page started
    Redirected { session_id: String },
    /// The payment client refused to redirect; the error is in the state
    Failed(CheckoutFailure),
}

/// Result of a successful submission
#[derive(Clone, Debug, PartialEq)]
pub struct SubmitOutcome {
    pub customer_id: String,
    pub invoice: serde_json::Value,
}

/// Drives a checkout form against a backend and payment client
pub struct CheckoutController {
    backend: Arc<dyn CheckoutBackend>,
    loader: Arc<dyn PaymentClientLoader>,
    store: Arc<CheckoutStore>,
    submit_errors: SubmitErrorSurfacing,
}

impl CheckoutController {
    pub fn new(backend: Arc<dyn CheckoutBackend>, loader: Arc<dyn PaymentClientLoader>) -> Self {
        Self {
            backend,
            loader,
            store: Arc::new(CheckoutStore::new()),
            submit_errors: SubmitErrorSurfacing::default(),
        }
    }

    /// Choose how submission failures are reported
    pub fn with_submit_errors(mut self, submit_errors: SubmitErrorSurfacing) -> Self {
        self.submit_errors = submit_errors;
        self
    }

    pub fn store(&self) -> &Arc<CheckoutStore> {
        &self.store
    }

    pub fn state(&self) -> PriceState {
        self.store.snapshot()
    }

    pub fn view(&self) -> CheckoutView {
        CheckoutView::from_state(&self.store.snapshot())
    }

    /// Fetch configuration, initialize the payment client, then publish both
    /// in a single `configLoaded` transition.
    ///
    /// Failures are shown to the customer and returned; nothing is retried.
    pub async fn mount(&self) -> Result<()> {
        tracing::info!(backend = self.backend.name(), "Loading checkout configuration");

        let config = match self.backend.fetch_config().await {
            Ok(config) => config,
            Err(e) => return Err(self.fail_mount(e)),
        };

        let payment_client = match self.loader.load(&config.public_key).await {
            Ok(client) => client,
            Err(e) => return Err(self.fail_mount(e)),
        };

        tracing::info!(
            unit_amount = config.unit_amount,
            currency = %config.currency,
            "Checkout configuration loaded"
        );

        self.store.dispatch(Action::ConfigLoaded {
            unit_amount: config.unit_amount,
            currency: config.currency,
            payment_client: Some(payment_client),
        });
        Ok(())
    }

    fn fail_mount(&self, error: ClientError) -> ClientError {
        tracing::error!(error = %error, "Checkout initialization failed");
        self.store.dispatch(Action::SetError {
            error: Some(CheckoutFailure::new(error.user_message())),
        });
        error
    }

    pub fn increment(&self) {
        self.store.dispatch(Action::Increment);
    }

    pub fn decrement(&self) {
        self.store.dispatch(Action::Decrement);
    }

    /// Request a checkout session for the current quantity and hand it to
    /// the payment client.
    ///
    /// Refuses to run before the payment client is ready or while another
    /// purchase is in flight. On a successful redirect the state is left
    /// loading: the customer has left the form.
    pub async fn purchase(&self) -> Result<PurchaseOutcome> {
        let state = self.begin_loading()?;
        self.redirect(&state).await
    }

    /// Form button flow: record the customer and invoice, then purchase.
    ///
    /// The form is locked in its loading state before the first request, so
    /// a second press while submitting is refused. A failed submission is
    /// reported per [`SubmitErrorSurfacing`] and does not stop the purchase.
    pub async fn checkout(&self, form: &FormState) -> Result<PurchaseOutcome> {
        let state = self.begin_loading()?;

        if let Err(e) = self.submit(form).await {
            tracing::warn!(error = %e, "Continuing to payment without an invoice");
        }
        self.redirect(&state).await
    }

    /// Atomically move into the loading state
    fn begin_loading(&self) -> Result<PriceState> {
        if let Some(state) = self.store.try_begin_loading() {
            return Ok(state);
        }

        let state = self.store.snapshot();
        Err(if !self.store.is_mounted() {
            ClientError::NotReady("the checkout form is closed")
        } else if state.payment_client().is_none() {
            ClientError::NotReady("the payment client is not initialized")
        } else {
            ClientError::NotReady("a purchase is already in progress")
        })
    }

    async fn redirect(&self, state: &PriceState) -> Result<PurchaseOutcome> {
        let Some(payment_client) = state.payment_client() else {
            self.store.dispatch(Action::SetLoading { loading: false });
            return Err(ClientError::NotReady("the payment client is not initialized"));
        };

        let session = match self.backend.create_checkout_session(state.quantity()).await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(error = %e, "Checkout session request failed");
                self.fail_purchase(CheckoutFailure::new(e.user_message()));
                return Err(e);
            }
        };

        match payment_client
            .client()
            .redirect_to_checkout(&session.session_id)
            .await
        {
            None => {
                tracing::info!(
                    session_id = %session.session_id,
                    quantity = state.quantity(),
                    "Redirected to hosted checkout"
                );
                Ok(PurchaseOutcome::Redirected {
                    session_id: session.session_id,
                })
            }
            Some(failure) => {
                tracing::warn!(error = %failure, "Redirect to hosted checkout failed");
                self.fail_purchase(failure.clone());
                Ok(PurchaseOutcome::Failed(failure))
            }
        }
    }

    fn fail_purchase(&self, failure: CheckoutFailure) {
        self.store.dispatch(Action::SetError {
            error: Some(failure),
        });
        self.store.dispatch(Action::SetLoading { loading: false });
    }

    /// Create the customer, then the invoice for that customer.
    ///
    /// Each call's failure is logged; whether it also lands in the checkout
    /// state depends on [`SubmitErrorSurfacing`].
    pub async fn submit(&self, form: &FormState) -> Result<SubmitOutcome> {
        let customer = match self.backend.create_customer(form).await {
            Ok(customer) => customer,
            Err(e) => return Err(self.fail_submit(endpoints::CREATE_CUSTOMER, e)),
        };
        tracing::info!(customer_id = %customer.id, "Customer created");

        let request = InvoiceRequest::new(form.clone(), customer.id.clone());
        let invoice = match self.backend.create_invoice(&request).await {
            Ok(invoice) => invoice,
            Err(e) => return Err(self.fail_submit(endpoints::CREATE_INVOICE, e)),
        };
        tracing::info!(customer_id = %customer.id, invoice = %invoice, "Invoice created");

        Ok(SubmitOutcome {
            customer_id: customer.id,
            invoice,
        })
    }

    fn fail_submit(&self, endpoint: &'static str, error: ClientError) -> ClientError {
        tracing::error!(endpoint, error = %error, "Submission failed");
        if self.submit_errors == SubmitErrorSurfacing::UserVisible {
            self.store.dispatch(Action::SetError {
                error: Some(CheckoutFailure::new(error.user_message())),
            });
        }
        error
    }

    /// Tear down; results of requests still in flight are dropped
    pub fn unmount(&self) {
        self.store.unmount();
    }
}
