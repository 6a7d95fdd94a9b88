use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-lg border px-4 py-3 text-sm"}
    clx! {AlertDescription, p, "text-sm [&_p]:leading-relaxed"}
}

pub use components::*;

/// Dismissable banner for the last action's result.
#[component]
pub fn Notice(notice: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || notice.get().is_some() fallback=|| ().into_view()>
            <Alert attr:role="status" class="flex items-start justify-between gap-3">
                <AlertDescription>{move || notice.get().unwrap_or_default()}</AlertDescription>
                <button
                    type="button"
                    class="text-xs text-muted-foreground hover:text-foreground"
                    aria-label="閉じる"
                    on:click=move |_| notice.set(None)
                >
                    "×"
                </button>
            </Alert>
        </Show>
    }
}
