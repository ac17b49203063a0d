//! Main App Component

use leptos::prelude::*;

use crate::checkout::Checkout;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="app">
            <Checkout />
        </main>
    }
}
