use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

const FIELD_CLASS: &str = "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground border-input w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-base shadow-xs transition-[color,box-shadow] outline-none disabled:pointer-events-none disabled:cursor-not-allowed disabled:opacity-50 md:text-sm focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2";

// Fields are wired by hand (`prop:value` + `on:input`) rather than
// `bind:value`, whose macro surface has moved between Leptos releases.

#[component]
pub fn Input(
    #[prop(into, optional)] class: String,
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(optional)] required: bool,
    #[prop(optional)] autofocus: bool,
    #[prop(into)] bind_value: RwSignal<String>,
    #[prop(optional)] node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "flex h-9", class);

    let on_input = move |ev: web_sys::Event| {
        if let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        {
            bind_value.set(input.value());
        }
    };

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            name=name
            id=id
            required=required
            autofocus=autofocus
            prop:value=move || bind_value.get()
            on:input=on_input
            node_ref=node_ref
        />
    }
}

#[component]
pub fn Textarea(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(default = 3)] rows: u32,
    #[prop(into)] bind_value: RwSignal<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "min-h-16 py-2", class);

    let on_input = move |ev: web_sys::Event| {
        if let Some(area) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
        {
            bind_value.set(area.value());
        }
    };

    view! {
        <textarea
            data-name="Textarea"
            class=merged_class
            placeholder=placeholder
            name=name
            id=id
            rows=rows.to_string()
            prop:value=move || bind_value.get()
            on:input=on_input
        />
    }
}
