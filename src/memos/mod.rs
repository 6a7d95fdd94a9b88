//! Memo actions on top of [`ApiClient`].
//!
//! Each function is one user action and issues its requests in sequence.
//! Callers refresh the list after a successful mutation.

use crate::api::{ApiClient, ApiResult};
use crate::editor::SubmitAction;
use crate::models::{Memo, MemoId};

pub(crate) async fn refresh(api: &ApiClient) -> ApiResult<Vec<Memo>> {
    api.list_memos().await
}

/// Sends the form: `POST /memos/` in create mode, `PUT /memos/{id}` in edit
/// mode. Returns the server's confirmation message.
pub(crate) async fn submit(api: &ApiClient, action: &SubmitAction) -> ApiResult<Option<String>> {
    let res = match action {
        SubmitAction::Create(input) => api.create_memo(input).await?,
        SubmitAction::Update(id, input) => api.update_memo(*id, input).await?,
    };
    Ok(res.message)
}

pub(crate) async fn delete(api: &ApiClient, id: MemoId) -> ApiResult<Option<String>> {
    Ok(api.delete_memo(id).await?.message)
}

/// Read-modify-write of the completion flag: fetch the memo, flip
/// `is_check`, write it back with title and description untouched.
///
/// Nothing guards against a concurrent edit between the two requests.
pub(crate) async fn toggle_check(api: &ApiClient, id: MemoId, checked: bool) -> ApiResult<Memo> {
    let mut memo = api.get_memo(id).await?;
    memo.is_check = checked;
    api.update_memo(id, &memo.to_input()).await?;
    Ok(memo)
}

/// Completion flag of memo `id` as of the latest fetch.
pub(crate) fn check_state(memos: &[Memo], id: MemoId) -> Option<bool> {
    memos.iter().find(|m| m.id == id).map(|m| m.is_check)
}

/// `"3 件中 1 件完了"`.
pub(crate) fn completion_summary(memos: &[Memo]) -> String {
    let done = memos.iter().filter(|m| m.is_check).count();
    format!("{} 件中 {} 件完了", memos.len(), done)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memo(id: MemoId, done: bool) -> Memo {
        Memo {
            id,
            title: format!("m{id}"),
            description: String::new(),
            is_check: done,
            user_id: None,
        }
    }

    #[test]
    fn test_check_state_reads_latest_list() {
        let list = [memo(1, true), memo(2, false)];
        assert_eq!(check_state(&list, 1), Some(true));
        assert_eq!(check_state(&list, 2), Some(false));
        assert_eq!(check_state(&list, 3), None);
    }

    #[test]
    fn test_completion_summary() {
        assert_eq!(completion_summary(&[]), "0 件中 0 件完了");
        assert_eq!(
            completion_summary(&[memo(1, true), memo(2, false), memo(3, true)]),
            "3 件中 2 件完了"
        );
    }
}
