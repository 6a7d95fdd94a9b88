use serde::{Deserialize, Serialize};

pub(crate) type MemoId = i64;

/// A memo record as returned by the backend.
///
/// The backend also sends the owning `user_id`; we accept it but never
/// rely on it, since the bearer token already scopes every request.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Memo {
    #[serde(rename = "memo_id")]
    pub id: MemoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_check: bool,
    #[serde(default, skip_serializing)]
    #[allow(dead_code)]
    pub user_id: Option<i64>,
}

impl Memo {
    /// Request body that writes this memo back unchanged.
    pub fn to_input(&self) -> MemoInput {
        MemoInput {
            title: self.title.clone(),
            description: self.description.clone(),
            is_check: Some(self.is_check),
        }
    }
}

/// Body for `POST /memos/` and `PUT /memos/{id}`.
///
/// Never carries a memo id; the target of an update lives in the path.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct MemoInput {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_check: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct CurrentUser {
    pub username: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub token_type: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// `/auth/signup` answers with either a `{message}` or the created user
/// record; both are accepted.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[allow(dead_code)]
pub(crate) struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// `{message}` envelope returned by memo mutations.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct ActionMessage {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_contract_deserialize() {
        let json = r#"{
            "memo_id": 12,
            "title": "明日のアジェンダ",
            "description": "進捗確認",
            "is_check": true,
            "user_id": 3
        }"#;
        let memo: Memo = serde_json::from_str(json).expect("memo should parse");
        assert_eq!(memo.id, 12);
        assert_eq!(memo.title, "明日のアジェンダ");
        assert!(memo.is_check);
        assert_eq!(memo.user_id, Some(3));
    }

    #[test]
    fn test_memo_defaults_optional_fields() {
        let memo: Memo =
            serde_json::from_str(r#"{"memo_id": 1, "title": "t"}"#).expect("memo should parse");
        assert_eq!(memo.description, "");
        assert!(!memo.is_check);
        assert!(memo.user_id.is_none());
    }

    #[test]
    fn test_memo_input_omits_unset_check_flag() {
        let input = MemoInput {
            title: "A".to_string(),
            description: "B".to_string(),
            is_check: None,
        };
        let v = serde_json::to_value(input).expect("should serialize");
        assert_eq!(v, serde_json::json!({"title": "A", "description": "B"}));
    }

    #[test]
    fn test_memo_to_input_keeps_fields() {
        let memo = Memo {
            id: 5,
            title: "t".to_string(),
            description: "d".to_string(),
            is_check: true,
            user_id: Some(1),
        };
        let v = serde_json::to_value(memo.to_input()).expect("should serialize");
        assert_eq!(
            v,
            serde_json::json!({"title": "t", "description": "d", "is_check": true})
        );
        assert!(v.get("memo_id").is_none());
    }

    #[test]
    fn test_token_response_contract_deserialize() {
        let parsed: TokenResponse =
            serde_json::from_str(r#"{"access_token": "jwt", "token_type": "bearer"}"#)
                .expect("token response should parse");
        assert_eq!(parsed.access_token, "jwt");
        assert_eq!(parsed.token_type.as_deref(), Some("bearer"));
    }

    #[test]
    fn test_signup_response_accepts_user_record() {
        let json = r#"{
            "id": 1,
            "username": "user1",
            "created_at": "2024-01-01T00:00:00",
            "updated_at": "2024-01-01T00:00:00"
        }"#;
        let parsed: SignupResponse = serde_json::from_str(json).expect("should parse");
        assert_eq!(parsed.username.as_deref(), Some("user1"));
        assert!(parsed.message.is_none());
    }
}
