use crate::api::{ApiClient, ApiErrorKind, ApiResult};
use leptos::logging::warn;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum SessionState {
    /// Waiting on `/auth/me`.
    #[default]
    Resolving,
    Anonymous,
    Authenticated {
        username: String,
    },
}

/// Works out who is logged in from the stored token.
///
/// No token means no request. A token the server rejects with 401 is
/// removed; any other failure leaves it in place and reports anonymous.
pub(crate) async fn resolve_session(api: &ApiClient) -> SessionState {
    if !api.is_authenticated() {
        return SessionState::Anonymous;
    }

    match api.current_user().await {
        Ok(user) => SessionState::Authenticated {
            username: user.username,
        },
        Err(e) => {
            if e.kind == ApiErrorKind::Unauthorized {
                api.logout();
            } else {
                warn!("[session] could not resolve current user: {}", e);
            }
            SessionState::Anonymous
        }
    }
}

/// Which half of the shared login/signup form is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }

    /// Form heading; also the submit button label.
    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "ログイン",
            AuthMode::Signup => "新規登録",
        }
    }

    pub fn toggle_prompt(self) -> &'static str {
        match self {
            AuthMode::Login => "アカウントをお持ちでないですか？",
            AuthMode::Signup => "アカウントをお持ちですか？",
        }
    }

    /// Label of the link that switches to the other mode.
    pub fn toggle_label(self) -> &'static str {
        self.toggled().title()
    }
}

/// Logs in (signing up first in [`AuthMode::Signup`]) and stores the
/// issued token.
pub(crate) async fn authenticate(
    api: &ApiClient,
    mode: AuthMode,
    username: &str,
    password: &str,
) -> ApiResult<()> {
    if mode == AuthMode::Signup {
        api.signup(username, password).await?;
    }
    let token = api.login(username, password).await?;
    api.save_token(&token.access_token);
    Ok(())
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod flow_tests {
    use super::*;
    use crate::api::testing::harness;
    use crate::storage::TokenStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_no_token_resolves_anonymous_without_request() {
        let h = harness(None);
        assert_eq!(resolve_session(&h.client).await, SessionState::Anonymous);
        assert!(h.transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_valid_token_resolves_username() {
        let h = harness(Some("jwt"));
        h.transport.reply(200, json!({"username": "hoge"}));

        let state = resolve_session(&h.client).await;
        assert_eq!(
            state,
            SessionState::Authenticated {
                username: "hoge".to_string()
            }
        );
        assert_eq!(h.transport.paths(), vec!["GET /auth/me"]);
    }

    #[tokio::test]
    async fn test_rejected_token_is_cleared() {
        let h = harness(Some("expired"));
        h.transport
            .reply(401, json!({"detail": "Could not validate credentials"}));

        assert_eq!(resolve_session(&h.client).await, SessionState::Anonymous);
        assert!(h.tokens.get().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_server_keeps_token() {
        let h = harness(Some("jwt"));
        h.transport.reply_network_error();

        assert_eq!(resolve_session(&h.client).await, SessionState::Anonymous);
        assert_eq!(h.tokens.get().as_deref(), Some("jwt"));
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let h = harness(None);
        h.transport
            .reply(200, json!({"access_token": "jwt-new", "token_type": "bearer"}));

        authenticate(&h.client, AuthMode::Login, "user1", "test1234")
            .await
            .expect("login");
        assert_eq!(h.tokens.get().as_deref(), Some("jwt-new"));
        assert_eq!(h.transport.paths(), vec!["POST /auth/login"]);
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let h = harness(None);
        h.transport
            .reply(201, json!({"id": 1, "username": "user1"}))
            .reply(200, json!({"access_token": "jwt-new", "token_type": "bearer"}));

        authenticate(&h.client, AuthMode::Signup, "user1", "test1234")
            .await
            .expect("signup");
        assert_eq!(
            h.transport.paths(),
            vec!["POST /auth/signup", "POST /auth/login"]
        );
        assert_eq!(h.tokens.get().as_deref(), Some("jwt-new"));
    }

    #[tokio::test]
    async fn test_failed_signup_skips_login() {
        let h = harness(None);
        h.transport
            .reply(400, json!({"detail": "ユーザー名は既に使用されています"}));

        let err = authenticate(&h.client, AuthMode::Signup, "user1", "test1234")
            .await
            .expect_err("duplicate");
        assert_eq!(err.user_message(), "ユーザー名は既に使用されています");
        assert_eq!(h.transport.paths(), vec!["POST /auth/signup"]);
        assert!(h.tokens.get().is_none());
    }

    #[tokio::test]
    async fn test_bad_credentials_leave_no_token() {
        let h = harness(None);
        h.transport
            .reply(401, json!({"detail": "Incorrect username or password"}));

        let err = authenticate(&h.client, AuthMode::Login, "user1", "nope")
            .await
            .expect_err("401");
        assert_eq!(err.user_message(), "Incorrect username or password");
        assert!(h.tokens.get().is_none());
    }
}
