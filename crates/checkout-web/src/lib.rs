//! Checkout Web Frontend
//!
//! Leptos-based WASM rendition of the checkout form.

mod app;
mod browser;
mod checkout;
mod components;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
