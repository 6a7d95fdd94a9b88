use crate::api::{ApiError, ApiErrorKind};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    Checkbox, Input, Label, Notice, Spinner, Textarea,
};
use crate::editor::MemoEditor;
use crate::memos;
use crate::models::{Memo, MemoId};
use crate::state::AppContext;
use leptos::ev;
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;

/// Memo page controller. Every action runs one request sequence on the
/// browser event loop and reports through `notice`.
#[derive(Clone, Copy)]
struct MemoBoard {
    app: AppContext,
    memos: RwSignal<Vec<Memo>>,
    loading: RwSignal<bool>,
    submitting: RwSignal<bool>,
    notice: RwSignal<Option<String>>,

    editor: RwSignal<MemoEditor>,
    /// Form fields, mirrored into `editor` on submit.
    title: RwSignal<String>,
    description: RwSignal<String>,
}

impl MemoBoard {
    fn new(app: AppContext) -> Self {
        Self {
            app,
            memos: RwSignal::new(vec![]),
            loading: RwSignal::new(false),
            submitting: RwSignal::new(false),
            notice: RwSignal::new(None),
            editor: RwSignal::new(MemoEditor::default()),
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
        }
    }

    fn report(&self, action: &str, e: &ApiError) {
        if e.kind == ApiErrorKind::Network {
            error!("[memos] {} failed: {}", action, e);
        }
        self.notice.set(Some(e.user_message()));
    }

    /// Pushes editor field values into the inputs.
    fn sync_fields(&self) {
        let editor = self.editor.get_untracked();
        self.title.set(editor.title);
        self.description.set(editor.description);
    }

    fn refresh(self) {
        let api_client = self.app.0.api_client.get_untracked();
        self.loading.set(true);

        spawn_local(async move {
            match memos::refresh(&api_client).await {
                Ok(list) => {
                    if self.editor.try_update(|e| e.reconcile(&list)) == Some(true) {
                        self.sync_fields();
                    }
                    self.memos.set(list);
                }
                Err(e) => self.report("list", &e),
            }
            self.loading.set(false);
        });
    }

    fn submit(self) {
        let mut editor = self.editor.get_untracked();
        if !editor.can_submit() {
            return;
        }
        editor.title = self.title.get_untracked();
        editor.description = self.description.get_untracked();
        self.editor.set(editor.clone());

        let action = editor.submit();
        let api_client = self.app.0.api_client.get_untracked();
        self.submitting.set(true);

        spawn_local(async move {
            let result = memos::submit(&api_client, &action).await;
            if let Err(e) = &result {
                if e.is_network() {
                    error!("[memos] save failed: {}", e);
                }
            }

            let outcome = self.editor.try_update(|e| e.settle(&result));
            self.sync_fields();
            if let Some(outcome) = outcome {
                if outcome.notice.is_some() {
                    self.notice.set(outcome.notice);
                }
                if outcome.refresh {
                    self.refresh();
                }
            }
            self.submitting.set(false);
        });
    }

    fn edit(self, id: MemoId) {
        self.editor.update(|e| e.begin_edit(id));
        self.sync_fields();
        let api_client = self.app.0.api_client.get_untracked();

        spawn_local(async move {
            match api_client.get_memo(id).await {
                Ok(memo) => {
                    if self.editor.try_update(|e| e.load(&memo)) == Some(true) {
                        self.sync_fields();
                    }
                }
                Err(e) => {
                    if self.editor.try_update(|ed| ed.abandon(id)) == Some(true) {
                        self.sync_fields();
                    }
                    self.report("fetch", &e);
                }
            }
        });
    }

    fn cancel_edit(self) {
        self.editor.update(|e| e.reset());
        self.sync_fields();
    }

    fn delete(self, id: MemoId) {
        let api_client = self.app.0.api_client.get_untracked();

        spawn_local(async move {
            match memos::delete(&api_client, id).await {
                Ok(message) => {
                    self.notice.set(message);
                    self.refresh();
                }
                Err(e) => self.report("delete", &e),
            }
        });
    }

    fn toggle(self, id: MemoId, checked: bool) {
        let api_client = self.app.0.api_client.get_untracked();

        spawn_local(async move {
            if let Err(e) = memos::toggle_check(&api_client, id, checked).await {
                self.report("check toggle", &e);
            }
            // Either way the list should show what the server holds.
            self.refresh();
        });
    }
}

#[component]
pub fn MemoPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let board = MemoBoard::new(app_state);
    let editor = board.editor;

    Effect::new(move |_| board.refresh());

    let escape_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && editor.get_untracked().is_editing() {
            board.cancel_edit();
        }
    });
    on_cleanup(move || escape_handle.remove());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        board.submit();
    };

    view! {
        <div class="mx-auto flex w-full max-w-3xl flex-col gap-4 px-4 py-8">
            <Notice notice=board.notice />

            <Card>
                <CardHeader>
                    <CardTitle attr:id="formTitle">{move || editor.get().heading()}</CardTitle>
                </CardHeader>
                <CardContent>
                    <form id="createMemoForm" class="flex flex-col gap-3" on:submit=on_submit>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="title">"タイトル"</Label>
                            <Input id="title" placeholder="明日のアジェンダ" bind_value=board.title />
                        </div>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="description">"詳細"</Label>
                            <Textarea
                                id="description"
                                placeholder="会議で話すトピック"
                                bind_value=board.description
                            />
                        </div>

                        <div class="flex items-center gap-2">
                            <Show when=move || editor.get().shows_create_button() fallback=|| ().into_view()>
                                <Button size=ButtonSize::Sm attr:disabled=move || board.submitting.get()>
                                    "登録"
                                </Button>
                            </Show>
                            <Show when=move || editor.get().shows_update_button() fallback=|| ().into_view()>
                                <Button
                                    size=ButtonSize::Sm
                                    attr:id="updateButton"
                                    attr:disabled=move || board.submitting.get()
                                >
                                    "更新"
                                </Button>
                            </Show>
                            <Show when=move || editor.get().is_editing() fallback=|| ().into_view()>
                                <button
                                    type="button"
                                    class="text-xs text-muted-foreground underline underline-offset-4"
                                    on:click=move |_| board.cancel_edit()
                                >
                                    "キャンセル"
                                </button>
                            </Show>
                            <Show when=move || board.submitting.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                        </div>
                    </form>
                </CardContent>
            </Card>

            <Card>
                <CardHeader>
                    <CardTitle>"メモ一覧"</CardTitle>
                    <CardDescription>
                        {move || memos::completion_summary(&board.memos.get())}
                    </CardDescription>
                </CardHeader>
                <CardContent>
                    <Show
                        when=move || !board.memos.get().is_empty()
                        fallback=move || view! {
                            <div class="text-xs text-muted-foreground">
                                {move || if board.loading.get() {
                                    "読み込み中..."
                                } else {
                                    "メモはまだありません。"
                                }}
                            </div>
                        }
                    >
                        <table id="memos" class="w-full text-sm">
                            <thead class="text-left text-xs text-muted-foreground">
                                <tr>
                                    <th class="w-8">"完了"</th>
                                    <th>"タイトル"</th>
                                    <th>"詳細"</th>
                                    <th class="w-32"></th>
                                </tr>
                            </thead>
                            <tbody>
                                // Keyed on content so an edited row re-renders.
                                <For
                                    each=move || board.memos.get()
                                    key=|memo| {
                                        (
                                            memo.id,
                                            memo.title.clone(),
                                            memo.description.clone(),
                                            memo.is_check,
                                        )
                                    }
                                    children=move |memo: Memo| view! { <MemoRow memo=memo board=board /> }
                                />

                            </tbody>
                        </table>
                    </Show>
                </CardContent>
            </Card>
        </div>
    }
}

#[component]
fn MemoRow(memo: Memo, board: MemoBoard) -> impl IntoView {
    let id = memo.id;
    let is_check = memo.is_check;
    let checked = Signal::derive(move || {
        board
            .memos
            .with(|list| memos::check_state(list, id))
            .unwrap_or(is_check)
    });
    let selected = move || board.editor.get().selection() == Some(id);

    view! {
        <tr
            class="border-t align-top"
            class:bg-accent=selected
            data-id=id.to_string()
        >
            <td class="py-2">
                <Checkbox
                    aria_label=format!("{} を完了にする", memo.title)
                    checked=checked
                    on_toggle=Callback::new(move |checked| board.toggle(id, checked))
                />
            </td>
            <td class="py-2 font-medium" class:line-through=is_check>{memo.title}</td>
            <td class="py-2 whitespace-pre-wrap text-muted-foreground">{memo.description}</td>
            <td class="py-2">
                <div class="flex justify-end gap-1">
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Sm
                        on:click=move |_| board.edit(id)
                    >
                        "編集"
                    </Button>
                    <Button
                        variant=ButtonVariant::Destructive
                        size=ButtonSize::Sm
                        on:click=move |_| board.delete(id)
                    >
                        "削除"
                    </Button>
                </div>
            </td>
        </tr>
    }
}
