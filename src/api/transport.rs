use super::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` fields, in order.
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Content type and encoded payload, or `None` for bodiless requests.
    pub fn encode(&self) -> Option<(&'static str, String)> {
        match self {
            RequestBody::Empty => None,
            RequestBody::Json(v) => Some(("application/json", v.to_string())),
            RequestBody::Form(fields) => {
                let encoded = fields
                    .iter()
                    .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                    .collect::<Vec<_>>()
                    .join("&");
                Some(("application/x-www-form-urlencoded", encoded))
            }
        }
    }

    #[cfg(test)]
    pub fn json(&self) -> Option<&serde_json::Value> {
        match self {
            RequestBody::Json(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
    /// Bearer token to attach, already checked against the token store.
    pub bearer: Option<String>,
}

#[derive(Clone, Debug)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One HTTP round trip. Implementations report only transport failures as
/// errors; every HTTP status comes back as a [`RawResponse`].
#[async_trait(?Send)]
pub(crate) trait HttpTransport {
    async fn send(&self, url: &str, request: &ApiRequest) -> ApiResult<RawResponse>;
}

/// Browser `fetch` (via reqwest's wasm backend) or native HTTP.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ReqwestTransport;

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, url: &str, request: &ApiRequest) -> ApiResult<RawResponse> {
        let client = reqwest::Client::new();
        let mut req = client.request(request.method.clone(), url);

        if let Some(token) = &request.bearer {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some((content_type, body)) = request.body.encode() {
            req = req.header(CONTENT_TYPE, content_type).body(body);
        }

        let res = req.send().await.map_err(ApiError::network)?;
        let status = res.status().as_u16();
        let body = res.text().await.map_err(ApiError::network)?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_body_is_url_encoded() {
        let body = RequestBody::Form(vec![
            ("username".to_string(), "user 1".to_string()),
            ("password".to_string(), "p&ss=word".to_string()),
        ]);
        let (content_type, encoded) = body.encode().expect("form has a body");
        assert_eq!(content_type, "application/x-www-form-urlencoded");
        assert_eq!(encoded, "username=user%201&password=p%26ss%3Dword");
    }

    #[test]
    fn test_empty_body_encodes_to_nothing() {
        assert!(RequestBody::Empty.encode().is_none());
    }

    #[test]
    fn test_json_body_encodes_as_json() {
        let body = RequestBody::Json(serde_json::json!({"title": "A"}));
        let (content_type, encoded) = body.encode().expect("json has a body");
        assert_eq!(content_type, "application/json");
        assert_eq!(encoded, r#"{"title":"A"}"#);
    }

    #[test]
    fn test_raw_response_success_range() {
        let ok = RawResponse {
            status: 201,
            body: String::new(),
        };
        let redirect = RawResponse {
            status: 302,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }
}
