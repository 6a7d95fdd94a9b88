mod header;
mod memos;

pub use header::AppHeader;
pub use memos::MemoPage;

use crate::components::ui::{
    Alert, AlertDescription, Button, Card, CardContent, CardDescription, CardHeader, CardTitle,
    Input, Label, Spinner,
};
use crate::session::{authenticate, AuthMode};
use crate::state::AppContext;
use leptos::logging::{error, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Shared login / signup form. The link under the button flips between
/// the two modes without leaving the page.
#[component]
pub fn AuthPage() -> impl IntoView {
    let mode: RwSignal<AuthMode> = RwSignal::new(AuthMode::default());
    let username: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error_msg: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let mode_val = mode.get_untracked();
        let username_val = username.get_untracked();
        let password_val = password.get_untracked();
        let api_client = app_state.0.api_client.get_untracked();

        loading.set(true);
        error_msg.set(None);

        spawn_local(async move {
            match authenticate(&api_client, mode_val, &username_val, &password_val).await {
                Ok(()) => {
                    if let Err(e) = window().location().set_href("/") {
                        warn!("[auth] redirect to / failed: {:?}", e);
                    }
                }
                Err(e) => {
                    if e.is_network() {
                        error!("[auth] {} request failed: {}", mode_val, e);
                    }
                    error_msg.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    };

    let on_toggle = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        mode.update(|m| *m = m.toggled());
        error_msg.set(None);
    };

    view! {
        <div class="mx-auto flex w-full max-w-sm flex-col justify-center px-4 py-10">
            <Card attr:data-mode=move || mode.get().to_string()>
                <CardHeader>
                    <CardTitle class="text-lg">{move || mode.get().title()}</CardTitle>
                    <CardDescription class="text-xs">"ユーザー名とパスワードを入力してください。"</CardDescription>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-3" on:submit=on_submit>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="username">"ユーザー名"</Label>
                            <Input
                                id="username"
                                r#type="text"
                                placeholder="user1"
                                bind_value=username
                                required=true
                                class="h-8 text-sm"
                            />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="password">"パスワード"</Label>
                            <Input
                                id="password"
                                r#type="password"
                                placeholder="••••••••"
                                bind_value=password
                                required=true
                                class="h-8 text-sm"
                            />
                        </div>

                        <Show when=move || error_msg.get().is_some() fallback=|| ().into_view()>
                            {move || {
                                error_msg.get().map(|e| {
                                    view! {
                                        <Alert class="border-destructive/30">
                                            <AlertDescription class="text-destructive text-xs">
                                                {e}
                                            </AlertDescription>
                                        </Alert>
                                    }
                                })
                            }}
                        </Show>

                        <Button class="w-full" attr:disabled=move || loading.get()>
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || mode.get().title()}
                            </span>
                        </Button>

                        <div class="pt-1 text-xs text-muted-foreground">
                            {move || mode.get().toggle_prompt()}
                            " "
                            <a
                                class="text-primary underline underline-offset-4"
                                href="#"
                                on:click=on_toggle
                            >
                                {move || mode.get().toggle_label()}
                            </a>
                        </div>
                    </form>
                </CardContent>
            </Card>
        </div>
    }
}

/// Shows `children` to users with a stored token and the auth form to
/// everyone else.
#[component]
pub fn RootAuthed(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let is_authenticated = move || app_state.0.api_client.get().is_authenticated();

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    view! {
        <Show when=is_authenticated fallback=move || view! { <AuthPage /> }>
            {move || children.with_value(|c| c())}
        </Show>
    }
}

#[component]
pub fn RootPage() -> impl IntoView {
    view! {
        <RootAuthed>
            <MemoPage />
        </RootAuthed>
    }
}
