//! Browser Wiring

use std::sync::Arc;

use checkout_client::{
    CheckoutController, ClientConfig, HostedCheckoutLoader, HttpBackend, SubmitErrorSurfacing,
};
use checkout_core::Navigator;

/// Leaves the page by assigning `window.location`
struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) -> Result<(), String> {
        let window = web_sys::window().ok_or("No browser window available")?;
        window
            .location()
            .set_href(url)
            .map_err(|e| format!("Could not open checkout: {e:?}"))
    }
}

/// Backend calls go to the page's own origin
fn page_origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}

/// Controller talking to the serving backend and redirecting this tab
pub fn controller(submit_errors: SubmitErrorSurfacing) -> Result<CheckoutController, String> {
    let mut config = ClientConfig::default();
    if let Some(origin) = page_origin() {
        config.api_base = origin;
    }

    let backend = HttpBackend::from_config(&config).map_err(|e| e.to_string())?;
    let loader = HostedCheckoutLoader::from_config(&config, Arc::new(BrowserNavigator));

    Ok(CheckoutController::new(Arc::new(backend), Arc::new(loader)).with_submit_errors(submit_errors))
}
