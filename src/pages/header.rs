use crate::components::ui::{Button, ButtonSize, ButtonVariant, Spinner};
use crate::session::{resolve_session, SessionState};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn AppHeader() -> impl IntoView {
    view! {
        <header class="border-b bg-background">
            <div class="mx-auto flex h-14 w-full max-w-3xl items-center justify-between px-4">
                <a href="/" class="text-sm font-semibold text-foreground">"メモアプリ"</a>
                <SessionBadge />
            </div>
        </header>
    }
}

/// Login indicator: username + logout, or a link to the auth page.
#[component]
pub fn SessionBadge() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let session = app_state.0.session;

    // Runs once on mount; reads are untracked.
    Effect::new(move |_| {
        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let had_token = api_client.is_authenticated();
            let state = resolve_session(&api_client).await;
            session.set(state);

            // A rejected token was just dropped; let auth guards re-check.
            if had_token && !api_client.is_authenticated() {
                app_state.0.api_client.update(|_| {});
            }
        });
    });

    let on_logout = move |_: web_sys::MouseEvent| app_state.0.logout();

    view! {
        <div class="flex items-center gap-3 text-xs" data-name="SessionBadge">
            {move || match session.get() {
                SessionState::Resolving => view! { <Spinner /> }.into_any(),
                SessionState::Authenticated { username } => view! {
                    <span class="text-muted-foreground">{format!("ユーザー名： {}", username)}</span>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        on:click=on_logout
                    >
                        "ログアウト"
                    </Button>
                }
                .into_any(),
                SessionState::Anonymous => view! {
                    <a href="/auth" class="text-primary underline underline-offset-4">
                        "ログイン・新規登録"
                    </a>
                }
                .into_any(),
            }}
        </div>
    }
}
