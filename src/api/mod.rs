mod transport;

#[cfg(test)]
pub(crate) mod testing;

use crate::models::{
    ActionMessage, CurrentUser, Memo, MemoId, MemoInput, SignupRequest, SignupResponse,
    TokenResponse,
};
use crate::storage::{LocalTokenStore, MemoryTokenStore, TokenStore};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use transport::{ApiRequest, ReqwestTransport};
pub(crate) use transport::{HttpTransport, RequestBody};

pub(crate) const INVALID_INPUT_MESSAGE: &str = "入力内容に誤りがあります。";
pub(crate) const MISSING_TOKEN_MESSAGE: &str = "認証トークンがありません。ログインしてください。";
pub(crate) const NETWORK_ERROR_MESSAGE: &str =
    "サーバーに接続できませんでした。時間をおいて再度お試しください。";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    /// An authenticated call was attempted with no stored token; nothing was sent.
    MissingToken,
    Network,
    /// HTTP 422.
    Validation,
    /// HTTP 401.
    Unauthorized,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn missing_token() -> Self {
        Self {
            kind: ApiErrorKind::MissingToken,
            status: None,
            message: MISSING_TOKEN_MESSAGE.to_string(),
        }
    }

    pub(crate) fn network(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            status: None,
            message: e.to_string(),
        }
    }

    /// Classifies a non-2xx response.
    fn from_status(status: u16, body: &str) -> Self {
        let kind = match status {
            422 => ApiErrorKind::Validation,
            401 => ApiErrorKind::Unauthorized,
            _ => ApiErrorKind::Http,
        };
        Self {
            kind,
            status: Some(status),
            message: server_detail(body).unwrap_or_else(|| format!("Request failed ({status})")),
        }
    }

    pub fn is_network(&self) -> bool {
        self.kind == ApiErrorKind::Network
    }

    /// Text shown to the user. Validation failures always get the fixed
    /// message, whatever the server said.
    pub fn user_message(&self) -> String {
        match self.kind {
            ApiErrorKind::Validation => INVALID_INPUT_MESSAGE.to_string(),
            ApiErrorKind::Network => NETWORK_ERROR_MESSAGE.to_string(),
            _ => self.message.clone(),
        }
    }
}

/// Pulls the human-readable error out of a FastAPI-style error body:
/// `detail` when it is a string, else `message`, else the raw text.
fn server_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(v) => ["detail", "message"]
            .iter()
            .find_map(|k| v.get(*k).and_then(|d| d.as_str()))
            .map(|s| s.to_string()),
        Err(_) => Some(body.to_string()),
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://localhost:8000".to_string();

        // Deployments inject `window.ENV.API_URL`; `api_url` is accepted too.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["API_URL", "api_url"] {
                        if let Ok(api_url) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(url_str) = api_url.as_string() {
                                return Self { api_url: url_str };
                            }
                        }
                    }
                }
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Auth {
    Required,
    Anonymous,
}

pub(crate) fn memo_path(id: MemoId) -> String {
    format!("/memos/{}", id)
}

const MEMOS_PATH: &str = "/memos/";

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    tokens: Arc<dyn TokenStore + Send + Sync>,
    transport: Arc<dyn HttpTransport + Send + Sync>,
}

impl ApiClient {
    pub fn new(
        base_url: String,
        tokens: Arc<dyn TokenStore + Send + Sync>,
        transport: Arc<dyn HttpTransport + Send + Sync>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
            transport,
        }
    }

    /// Client wired to the browser: `window.ENV` base URL, `localStorage`
    /// token (in-memory when storage is disabled), reqwest transport.
    pub fn from_env() -> Self {
        let tokens: Arc<dyn TokenStore + Send + Sync> = if LocalTokenStore::is_available() {
            Arc::new(LocalTokenStore)
        } else {
            Arc::new(MemoryTokenStore::default())
        };
        Self::new(EnvConfig::new().api_url, tokens, Arc::new(ReqwestTransport))
    }

    pub fn token(&self) -> Option<String> {
        self.tokens.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn save_token(&self, token: &str) {
        self.tokens.save(token);
    }

    pub fn logout(&self) {
        self.tokens.clear();
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        auth: Auth,
    ) -> ApiResult<serde_json::Value> {
        let bearer = match auth {
            Auth::Required => Some(self.token().ok_or_else(ApiError::missing_token)?),
            Auth::Anonymous => None,
        };

        let request = ApiRequest {
            method,
            path: path.to_string(),
            body,
            bearer,
        };
        let url = format!("{}{}", self.base_url, path);
        let res = self.transport.send(&url, &request).await?;

        if !res.is_success() {
            return Err(ApiError::from_status(res.status, &res.body));
        }
        if res.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&res.body).map_err(ApiError::parse)
    }

    async fn request_as<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        auth: Auth,
    ) -> ApiResult<T> {
        let data = self.request(method, path, body, auth).await?;
        serde_json::from_value(data).map_err(ApiError::parse)
    }

    fn json_body(value: &impl Serialize) -> ApiResult<RequestBody> {
        serde_json::to_value(value)
            .map(RequestBody::Json)
            .map_err(ApiError::parse)
    }

    /// OAuth2 password form; never carries an `Authorization` header.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenResponse> {
        self.request_as(
            Method::POST,
            "/auth/login",
            RequestBody::Form(vec![
                ("username".to_string(), username.to_string()),
                ("password".to_string(), password.to_string()),
            ]),
            Auth::Anonymous,
        )
        .await
    }

    pub async fn signup(&self, username: &str, password: &str) -> ApiResult<SignupResponse> {
        let body = Self::json_body(&SignupRequest {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        self.request_as(Method::POST, "/auth/signup", body, Auth::Anonymous)
            .await
    }

    pub async fn current_user(&self) -> ApiResult<CurrentUser> {
        self.request_as(Method::GET, "/auth/me", RequestBody::Empty, Auth::Required)
            .await
    }

    pub async fn list_memos(&self) -> ApiResult<Vec<Memo>> {
        self.request_as(Method::GET, MEMOS_PATH, RequestBody::Empty, Auth::Required)
            .await
    }

    pub async fn get_memo(&self, id: MemoId) -> ApiResult<Memo> {
        self.request_as(Method::GET, &memo_path(id), RequestBody::Empty, Auth::Required)
            .await
    }

    pub async fn create_memo(&self, input: &MemoInput) -> ApiResult<ActionMessage> {
        let body = Self::json_body(input)?;
        self.request_as(Method::POST, MEMOS_PATH, body, Auth::Required)
            .await
    }

    pub async fn update_memo(&self, id: MemoId, input: &MemoInput) -> ApiResult<ActionMessage> {
        let body = Self::json_body(input)?;
        self.request_as(Method::PUT, &memo_path(id), body, Auth::Required)
            .await
    }

    pub async fn delete_memo(&self, id: MemoId) -> ApiResult<ActionMessage> {
        self.request_as(Method::DELETE, &memo_path(id), RequestBody::Empty, Auth::Required)
            .await
    }
}
