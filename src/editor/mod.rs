use crate::api::{ApiError, ApiErrorKind, ApiResult};
use crate::models::{Memo, MemoId, MemoInput};

pub(crate) const CREATE_HEADING: &str = "メモの作成";
pub(crate) const EDIT_HEADING: &str = "メモの編集";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum EditMode {
    #[default]
    Create,
    Edit(MemoId),
}

/// What the form's submit button should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SubmitAction {
    Create(MemoInput),
    Update(MemoId, MemoInput),
}

/// Form state for the memo page: the edit selection plus the field values.
///
/// At most one memo is selected. The selection is set as soon as the user
/// clicks edit; the fields fill in once that memo's data arrives, and only
/// then does the form switch to its edit heading and update button.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct MemoEditor {
    pub mode: EditMode,
    /// The selected memo's data has been loaded into the fields.
    loaded: bool,
    pub title: String,
    pub description: String,
    /// Completion flag of the selected memo, written back on update.
    pub is_check: bool,
}

impl MemoEditor {
    pub fn selection(&self) -> Option<MemoId> {
        match self.mode {
            EditMode::Create => None,
            EditMode::Edit(id) => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.selection().is_some()
    }

    /// Edit mode with the selected memo's fields in place.
    fn is_populated(&self) -> bool {
        self.is_editing() && self.loaded
    }

    pub fn heading(&self) -> &'static str {
        if self.is_populated() {
            EDIT_HEADING
        } else {
            CREATE_HEADING
        }
    }

    pub fn shows_create_button(&self) -> bool {
        !self.is_editing()
    }

    pub fn shows_update_button(&self) -> bool {
        self.is_populated()
    }

    /// False while an edit selection waits for its memo; a submit then
    /// would write whatever the fields held before onto that memo.
    pub fn can_submit(&self) -> bool {
        !self.is_editing() || self.loaded
    }

    /// Selects `id` and clears the fields until [`MemoEditor::load`] fills them.
    pub fn begin_edit(&mut self, id: MemoId) {
        *self = Self {
            mode: EditMode::Edit(id),
            ..Self::default()
        };
    }

    /// Fills the form from a fetched memo. Returns `false` (and changes
    /// nothing) when the memo is no longer the selection, e.g. the user
    /// clicked another row before this response arrived.
    pub fn load(&mut self, memo: &Memo) -> bool {
        if self.selection() != Some(memo.id) {
            return false;
        }
        self.title = memo.title.clone();
        self.description = memo.description.clone();
        self.is_check = memo.is_check;
        self.loaded = true;
        true
    }

    /// Leaves edit mode if `id` is still selected; used when fetching the
    /// memo for the form failed.
    pub fn abandon(&mut self, id: MemoId) -> bool {
        if self.selection() != Some(id) {
            return false;
        }
        self.reset();
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn submit(&self) -> SubmitAction {
        match self.mode {
            EditMode::Create => SubmitAction::Create(MemoInput {
                title: self.title.clone(),
                description: self.description.clone(),
                is_check: None,
            }),
            EditMode::Edit(id) => SubmitAction::Update(
                id,
                MemoInput {
                    title: self.title.clone(),
                    description: self.description.clone(),
                    is_check: Some(self.is_check),
                },
            ),
        }
    }

    /// Brings the selection in line with the latest fetch: a memo that is
    /// gone resets the form, one that is still there lends its current
    /// `is_check` (the row may have been toggled mid-edit). Title and
    /// description stay as the user typed them.
    /// Returns `true` if the form was reset.
    pub fn reconcile(&mut self, memos: &[Memo]) -> bool {
        let Some(id) = self.selection() else {
            return false;
        };
        match memos.iter().find(|m| m.id == id) {
            Some(memo) => {
                self.is_check = memo.is_check;
                false
            }
            None => {
                self.reset();
                true
            }
        }
    }

    /// Applies the result of a create/update and says what to show.
    ///
    /// Success and server-side rejections reset the form; validation and
    /// transport failures keep it so the user can correct or resubmit.
    pub fn settle(&mut self, result: &ApiResult<Option<String>>) -> SubmitOutcome {
        match result {
            Ok(message) => {
                self.reset();
                SubmitOutcome {
                    notice: message.clone(),
                    refresh: true,
                }
            }
            Err(e) => {
                if !keeps_form(e) {
                    self.reset();
                }
                SubmitOutcome {
                    notice: Some(e.user_message()),
                    refresh: false,
                }
            }
        }
    }
}

fn keeps_form(e: &ApiError) -> bool {
    matches!(
        e.kind,
        ApiErrorKind::Validation | ApiErrorKind::Network | ApiErrorKind::MissingToken
    )
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SubmitOutcome {
    pub notice: Option<String>,
    /// The memo list changed server-side and must be refetched.
    pub refresh: bool,
}
