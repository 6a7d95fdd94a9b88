use super::transport::{ApiRequest, HttpTransport, RawResponse};
use super::{ApiClient, ApiError, ApiResult};
use crate::storage::MemoryTokenStore;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted transport: replays queued replies in order and records every
/// request it was asked to send.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    replies: Mutex<VecDeque<ApiResult<RawResponse>>>,
    calls: Mutex<Vec<(String, ApiRequest)>>,
}

impl RecordingTransport {
    pub fn reply(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push(Ok(RawResponse {
            status,
            body: body.to_string(),
        }))
    }

    pub fn reply_network_error(&self) -> &Self {
        self.push(Err(ApiError::network("connection refused")))
    }

    fn push(&self, reply: ApiResult<RawResponse>) -> &Self {
        self.replies.lock().expect("replies lock").push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<(String, ApiRequest)> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|(_, r)| format!("{} {}", r.method, r.path))
            .collect()
    }
}

#[async_trait(?Send)]
impl HttpTransport for RecordingTransport {
    async fn send(&self, url: &str, request: &ApiRequest) -> ApiResult<RawResponse> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((url.to_string(), request.clone()));
        self.replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply for {} {}", request.method, request.path))
    }
}

pub(crate) struct Harness {
    pub client: ApiClient,
    pub transport: Arc<RecordingTransport>,
    pub tokens: Arc<MemoryTokenStore>,
}

pub(crate) fn harness(token: Option<&str>) -> Harness {
    let transport = Arc::new(RecordingTransport::default());
    let tokens = Arc::new(match token {
        Some(t) => MemoryTokenStore::with_token(t),
        None => MemoryTokenStore::default(),
    });
    let client = ApiClient::new(
        "http://api.test/".to_string(),
        tokens.clone(),
        transport.clone(),
    );
    Harness {
        client,
        transport,
        tokens,
    }
}
