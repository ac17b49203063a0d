//! Command Handlers

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use checkout_client::{
    CheckoutBackend, CheckoutController, ClientConfig, HostedCheckoutLoader, HttpBackend,
    MockBackend, PurchaseOutcome, SubmitErrorSurfacing,
};
use checkout_core::{format_price, CheckoutStore, CheckoutView, Currency, FormState, Navigator};
use serde_json::json;

use crate::cli::Cli;

/// Prints the hosted checkout link instead of opening a browser
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, url: &str) -> std::result::Result<(), String> {
        println!("Continue to payment: {url}");
        Ok(())
    }
}

fn controller(cli: &Cli) -> anyhow::Result<CheckoutController> {
    let mut config = ClientConfig::from_env();
    if let Some(api_base) = &cli.api_base {
        config.api_base.clone_from(api_base);
    }
    if cli.surface_submit_errors {
        config.submit_errors = SubmitErrorSurfacing::UserVisible;
    }

    let backend: Arc<dyn CheckoutBackend> = if cli.demo {
        tracing::info!("Using in-memory demo backend");
        Arc::new(MockBackend::new())
    } else {
        tracing::debug!(api_base = %config.api_base, "Using HTTP backend");
        Arc::new(HttpBackend::from_config(&config)?)
    };
    let loader = Arc::new(HostedCheckoutLoader::from_config(&config, Arc::new(TerminalNavigator)));

    Ok(CheckoutController::new(backend, loader).with_submit_errors(config.submit_errors))
}

fn print_view(view: &CheckoutView) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

pub fn price(unit_amount: i64, currency: &str, quantity: u32) -> anyhow::Result<()> {
    let currency = Currency::parse(currency)?;
    println!("{}", format_price(unit_amount, &currency, quantity));
    Ok(())
}

pub async fn config(cli: &Cli) -> anyhow::Result<()> {
    let controller = controller(cli)?;
    let mounted = controller.mount().await;
    print_view(&controller.view())?;
    mounted.context("could not load checkout configuration")
}

pub async fn purchase(cli: &Cli, quantity: u32) -> anyhow::Result<()> {
    let controller = controller(cli)?;
    controller
        .mount()
        .await
        .context("could not load checkout configuration")?;

    for _ in 1..quantity {
        controller.increment();
    }
    if let Some(price) = controller.state().price() {
        println!("Total: {price} ({quantity} item(s))");
    }

    match controller.purchase().await.context("purchase failed")? {
        PurchaseOutcome::Redirected { session_id } => {
            tracing::info!(session_id = %session_id, "Checkout session ready");
            Ok(())
        }
        PurchaseOutcome::Failed(failure) => {
            print_view(&controller.view())?;
            anyhow::bail!("redirect to checkout failed: {failure}")
        }
    }
}

pub async fn submit(cli: &Cli, form: FormState) -> anyhow::Result<()> {
    let controller = controller(cli)?;
    let outcome = controller.submit(&form).await.context("submission failed")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "customerId": outcome.customer_id,
            "invoice": outcome.invoice,
        }))?
    );
    Ok(())
}

pub fn replay(file: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("could not read {}", file.display()))?;
    let actions: Vec<serde_json::Value> =
        serde_json::from_str(&text).context("expected a JSON array of actions")?;

    let store = CheckoutStore::new();
    for (index, action) in actions.into_iter().enumerate() {
        store
            .dispatch_json(action)
            .with_context(|| format!("action #{index} was rejected"))?;
    }

    print_view(&CheckoutView::from_state(&store.snapshot()))
}
