use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// Controlled checkbox: `checked` is the source of truth and `on_toggle`
/// receives the value the user asked for. A click never moves the box by
/// itself; it shows the new state only once `checked` reports it.
#[component]
pub fn Checkbox(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] aria_label: String,
    #[prop(into)] checked: Signal<bool>,
    on_toggle: Callback<bool>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "size-4 shrink-0 rounded-[4px] border border-input accent-primary hover:cursor-pointer",
        class
    );

    let on_change = move |ev: web_sys::Event| {
        if let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        {
            let requested = input.checked();
            input.set_checked(checked.get_untracked());
            on_toggle.run(requested);
        }
    };

    view! {
        <input
            data-name="Checkbox"
            type="checkbox"
            class=merged_class
            aria-label=aria_label
            prop:checked=move || checked.get()
            on:change=on_change
        />
    }
}
