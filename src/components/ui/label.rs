use leptos::prelude::*;
use tw_merge::*;

/// Field caption; `html_for` points at the input's `id`.
#[component]
pub fn Label(
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] html_for: String,
    children: Children,
) -> impl IntoView {
    let class = tw_merge!("text-xs font-medium text-foreground select-none", class);

    view! {
        <label class=class r#for=html_for>
            {children()}
        </label>
    }
}
