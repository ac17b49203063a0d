//! Form Field Components

use checkout_core::{FormField, FormState};
use leptos::prelude::*;

/// Free-text form field
#[component]
pub fn TextField(form: RwSignal<FormState>, field: FormField, input_type: &'static str) -> impl IntoView {
    view! {
        <input
            type=input_type
            name=field.as_str()
            placeholder=field.as_str()
            prop:value=move || form.with(|f| f.get(field).to_string())
            on:input=move |ev| form.update(|f| f.set(field, event_target_value(&ev)))
        />
    }
}

/// Select box offering the field's fixed choices
#[component]
pub fn SelectField(form: RwSignal<FormState>, field: FormField) -> impl IntoView {
    let options = field.options().unwrap_or_default();

    view! {
        <select
            name=field.as_str()
            prop:value=move || form.with(|f| f.get(field).to_string())
            on:change=move |ev| form.update(|f| f.set(field, event_target_value(&ev)))
        >
            <option value="">"Select..."</option>
            {options
                .iter()
                .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                .collect_view()}
        </select>
    }
}
