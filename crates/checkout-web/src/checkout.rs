//! Checkout Form Component
//!
//! Rendering only: the [`CheckoutController`] owns the remote calls and the
//! state store, and this component mirrors the store into a signal.

use std::sync::Arc;

use checkout_client::{CheckoutController, PurchaseOutcome, SubmitErrorSurfacing};
use checkout_core::{reduce, Action, CheckoutFailure, CheckoutView, FormField, FormState, PriceState};
use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::prelude::*;

use crate::browser;
use crate::components::{SelectField, TextField};

/// Copy every store transition into `state` until the signal is disposed
fn mirror_state(controller: &CheckoutController, state: RwSignal<PriceState>) {
    let mut updates = controller.store().subscribe();
    leptos::task::spawn_local(async move {
        while updates.changed().await.is_ok() {
            let next = updates.borrow_and_update().clone();
            if state.try_set(next).is_some() {
                break;
            }
        }
    });
}

/// Registration form with quantity stepper and hosted checkout button
#[component]
pub fn Checkout(#[prop(optional)] submit_errors: SubmitErrorSurfacing) -> impl IntoView {
    let state = RwSignal::new(PriceState::default());
    let form = RwSignal::new(FormState::default());
    let view_model = Memo::new(move |_| CheckoutView::from_state(&state.get()));

    let controller = match browser::controller(submit_errors) {
        Ok(controller) => Some(Arc::new(controller)),
        Err(message) => {
            leptos::logging::error!("{message}");
            state.set(reduce(
                &PriceState::default(),
                Action::SetError {
                    error: Some(CheckoutFailure::new(message)),
                },
            ));
            None
        }
    };

    if let Some(controller) = controller.clone() {
        mirror_state(&controller, state);
        on_cleanup({
            let controller = controller.clone();
            move || controller.unmount()
        });
        leptos::task::spawn_local(async move {
            if let Err(e) = controller.mount().await {
                leptos::logging::error!("{e}");
            }
        });
    }

    let on_submit = {
        let controller = controller.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let Some(controller) = controller.clone() else {
                return;
            };
            let details = form.get_untracked();

            leptos::task::spawn_local(async move {
                match controller.checkout(&details).await {
                    Ok(PurchaseOutcome::Redirected { .. }) => {}
                    Ok(PurchaseOutcome::Failed(failure)) => leptos::logging::warn!("{failure}"),
                    Err(e) => leptos::logging::error!("{e}"),
                }
            });
        }
    };

    let increment = {
        let controller = controller.clone();
        move |_: MouseEvent| {
            if let Some(controller) = &controller {
                controller.increment();
            }
        }
    };
    let decrement = move |_: MouseEvent| {
        if let Some(controller) = &controller {
            controller.decrement();
        }
    };

    view! {
        <div class="sr-root">
            <section class="sr-main">
                <form on:submit=on_submit>
                    <TextField form=form field=FormField::Name input_type="text" />
                    <TextField form=form field=FormField::Email input_type="email" />
                    <SelectField form=form field=FormField::FeeType />
                    <SelectField form=form field=FormField::Campus />
                    <SelectField form=form field=FormField::Program />

                    <div class="quantity-setter">
                        <button type="button" class="decrement" on:click=decrement>
                            "-"
                        </button>
                        <span class="quantity">{move || view_model.get().quantity.to_string()}</span>
                        <button type="button" class="increment" on:click=increment>
                            "+"
                        </button>
                    </div>

                    <p class="price">{move || view_model.get().price.unwrap_or_default()}</p>

                    <button type="submit" disabled=move || view_model.get().button_disabled>
                        {move || view_model.get().button_label}
                    </button>
                </form>

                <Show when=move || view_model.with(|v| v.error_message.is_some())>
                    <div class="sr-field-error">
                        {move || view_model.get().error_message.unwrap_or_default()}
                    </div>
                </Show>
            </section>
        </div>
    }
}
