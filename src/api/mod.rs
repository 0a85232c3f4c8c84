use crate::models::{Content, ContentPage, ContentType, GithubRepo, Source, User};
use crate::storage;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub(crate) const PAGE_SIZE: u32 = 10;

const GITHUB_API_URL: &str = "https://api.github.com";
const TOKEN_EXPIRED_SIGNATURE: &str = "TokenExpiredError";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Network(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("{0}")]
    Parse(String),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }

    /// Builds the error for a non-2xx response, preferring the backend's `message`.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return Self::Unauthorized;
        }
        Self::Http {
            status,
            message: error_message_from_body(status, body),
        }
    }

    pub(crate) fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Http { status, .. } => Some(*status),
            Self::Network(_) | Self::Parse(_) => None,
        }
    }

    pub(crate) fn share_link_message(&self) -> String {
        let detail = match self {
            Self::Network(_) => "Network error. Please check your connection.".to_string(),
            Self::Parse(e) => e.clone(),
            _ => match self.status() {
                Some(500) => "Server error. Please try again later.".to_string(),
                Some(401) => "Please log in again.".to_string(),
                Some(403) => "You don't have permission to create share links.".to_string(),
                Some(code) => format!("Server error ({code})."),
                None => "Unknown error occurred.".to_string(),
            },
        };
        format!("Failed to create share link. {detail}")
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

pub(crate) fn error_message_from_body(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .map(|s| s.trim().to_string())
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Request failed ({status})"))
}

/// A failed request earns one refresh attempt on 401/403, or on a 500 whose
/// body carries the expired-token signature.
pub(crate) fn needs_token_refresh(status: u16, body: &str) -> bool {
    matches!(status, 401 | 403) || (status == 500 && body.contains(TOKEN_EXPIRED_SIGNATURE))
}

/// Extracts `data` from the `{ success, message, data }` envelope.
pub(crate) fn parse_envelope<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let value: serde_json::Value = if body.trim().is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(body).map_err(ApiError::parse)?
    };
    let data = match value {
        serde_json::Value::Object(mut map) => map.remove("data").unwrap_or_default(),
        other => other,
    };
    serde_json::from_value(data).map_err(ApiError::parse)
}

pub(crate) fn content_query(source: Option<Source>, page_number: u32, page_size: u32) -> String {
    let mut params: Vec<String> = Vec::with_capacity(3);
    if let Some(s) = source {
        params.push(format!("source={}", s.as_ref()));
    }
    params.push(format!("pageNumber={page_number}"));
    params.push(format!("pageSize={page_size}"));
    format!("?{}", params.join("&"))
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://localhost:3000/api/v1".to_string();

        // `window.ENV.API_URL` wins over the lowercase spelling.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["API_URL", "api_url"] {
                        if let Ok(api_url) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(url_str) = api_url.as_string() {
                                return Self {
                                    api_url: url_str.trim_end_matches('/').to_string(),
                                };
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

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct VerifyOtpRequest {
    pub code: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct ResetPasswordRequest {
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct AddContentRequest {
    pub title: String,
    pub link: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub source: Source,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct VerifyResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub user: User,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LinkResponse {
    pub link: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
}

/// What `POST /user/login` resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LoginOutcome {
    Authenticated(String),
    /// Email not verified yet; the hash identifies the pending verification.
    VerificationRequired(String),
}

/// The backend answers with either a bare hash string or an object carrying one.
pub(crate) fn extract_hash(data: &serde_json::Value) -> Option<String> {
    let hash = match data {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Object(map) => ["hashCode", "hash", "hash_code"]
            .iter()
            .find_map(|k| map.get(*k).and_then(|v| v.as_str()).map(|s| s.to_string())),
        _ => None,
    };
    hash.filter(|h| !h.trim().is_empty())
}

pub(crate) fn parse_login_data(data: serde_json::Value) -> ApiResult<LoginOutcome> {
    if let Some(token) = data
        .get("token")
        .and_then(|v| v.as_str())
        .filter(|t| !t.trim().is_empty())
    {
        return Ok(LoginOutcome::Authenticated(token.to_string()));
    }

    extract_hash(&data)
        .map(LoginOutcome::VerificationRequired)
        .ok_or_else(|| ApiError::Parse(format!("Unexpected login response: {data}")))
}

#[cfg(target_arch = "wasm32")]
fn with_credentials(req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    // Refresh tokens travel as an http-only cookie.
    req.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    req
}

/// Moves one request over the wire and hands back the status and raw body.
pub(crate) trait Transport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        token: Option<&str>,
        body: Option<&serde_json::Value>,
    ) -> ApiResult<(u16, String)>;
}

/// The browser fetch backed transport used by every page.
pub(crate) struct HttpTransport;

impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        token: Option<&str>,
        body: Option<&serde_json::Value>,
    ) -> ApiResult<(u16, String)> {
        let client = reqwest::Client::new();
        let mut req = with_credentials(client.request(method, url))
            .header("Accept", "application/json");
        if let Some(header) = ApiClient::auth_header(token) {
            req = req.header("Authorization", header);
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        Ok((status, text))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn load_from_storage() -> Self {
        Self {
            token: storage::load_token(),
            ..Self::new(EnvConfig::new().api_url)
        }
    }

    pub fn set_token(&mut self, token: String) {
        storage::save_token(&token);
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        storage::clear_token();
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn auth_header(token: Option<&str>) -> Option<String> {
        token.map(|t| format!("Bearer {t}"))
    }

    async fn request<T: DeserializeOwned>(
        &mut self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<T> {
        self.request_via(&HttpTransport, method, path, body).await
    }

    /// Sends a request; on an auth failure refreshes the token once and retries once.
    /// A failed refresh clears the stored token.
    async fn request_via<T: DeserializeOwned>(
        &mut self,
        transport: &impl Transport,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("{method} {path}");

        let (status, text) = transport
            .send(method.clone(), &url, self.token.as_deref(), body.as_ref())
            .await?;
        if (200..300).contains(&status) {
            return parse_envelope(&text);
        }
        if !needs_token_refresh(status, &text) {
            return Err(ApiError::from_response(status, &text));
        }

        log::info!("{path} answered {status}, refreshing token");
        let new_token = match self.refresh_token(transport).await {
            Ok(token) => token,
            Err(e) => {
                log::warn!("token refresh failed: {e}");
                self.clear_token();
                return Err(ApiError::from_response(status, &text));
            }
        };
        self.set_token(new_token);

        let (status, text) = transport
            .send(method, &url, self.token.as_deref(), body.as_ref())
            .await?;
        if (200..300).contains(&status) {
            parse_envelope(&text)
        } else {
            Err(ApiError::from_response(status, &text))
        }
    }

    async fn refresh_token(&self, transport: &impl Transport) -> ApiResult<String> {
        let url = format!("{}/user/refresh-token", self.base_url);
        let (status, text) = transport.send(Method::GET, &url, None, None).await?;
        if !(200..300).contains(&status) {
            return Err(ApiError::from_response(status, &text));
        }
        parse_envelope::<TokenResponse>(&text)?
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApiError::Parse("Refresh response is missing a token".to_string()))
    }

    fn to_body(body: &impl Serialize) -> ApiResult<serde_json::Value> {
        serde_json::to_value(body).map_err(ApiError::parse)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> ApiResult<LoginOutcome> {
        let body = Self::to_body(&LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        })?;
        let data: serde_json::Value = self.request(Method::POST, "/user/login", Some(body)).await?;
        parse_login_data(data)
    }

    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<String> {
        let body = Self::to_body(&SignupRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        })?;
        let data: serde_json::Value = self
            .request(Method::POST, "/user/register", Some(body))
            .await?;
        extract_hash(&data)
            .ok_or_else(|| ApiError::Parse(format!("Unexpected register response: {data}")))
    }

    pub async fn verify_otp(&mut self, hash_code: &str, code: &str) -> ApiResult<VerifyResponse> {
        let body = Self::to_body(&VerifyOtpRequest {
            code: code.to_string(),
        })?;
        let path = format!("/user/verify/{}", urlencoding::encode(hash_code));
        self.request(Method::POST, &path, Some(body)).await
    }

    pub async fn resend_otp(&mut self, hash_code: &str) -> ApiResult<serde_json::Value> {
        let path = format!("/user/resend-otp/{}", urlencoding::encode(hash_code));
        self.request(Method::POST, &path, None).await
    }

    pub async fn send_reset_password_email(&mut self, email: &str) -> ApiResult<serde_json::Value> {
        let body = Self::to_body(&ForgotPasswordRequest {
            email: email.trim().to_string(),
        })?;
        self.request(Method::POST, "/user/send-reset-password-email", Some(body))
            .await
    }

    pub async fn reset_password(
        &mut self,
        user_id: &str,
        password: &str,
    ) -> ApiResult<serde_json::Value> {
        let body = Self::to_body(&ResetPasswordRequest {
            password: password.to_string(),
        })?;
        let path = format!("/user/reset-password/{}", urlencoding::encode(user_id));
        self.request(Method::PUT, &path, Some(body)).await
    }

    pub async fn get_content(
        &mut self,
        source: Option<Source>,
        page_number: u32,
    ) -> ApiResult<ContentPage> {
        let path = format!("/content{}", content_query(source, page_number, PAGE_SIZE));
        self.request(Method::GET, &path, None).await
    }

    pub async fn add_content(&mut self, req_body: AddContentRequest) -> ApiResult<Content> {
        let body = Self::to_body(&req_body)?;
        self.request(Method::POST, "/content", Some(body)).await
    }

    pub async fn delete_content(&mut self, id: &str) -> ApiResult<serde_json::Value> {
        let path = format!("/content/{}", urlencoding::encode(id));
        self.request(Method::DELETE, &path, None).await
    }

    pub async fn get_summary(&mut self, id: &str) -> ApiResult<Content> {
        let path = format!("/content/summary/{}", urlencoding::encode(id));
        self.request(Method::GET, &path, None).await
    }

    pub async fn create_summary_link(&mut self, id: &str) -> ApiResult<String> {
        let path = format!("/link/summary-link/{}", urlencoding::encode(id));
        let res: LinkResponse = self.request(Method::POST, &path, None).await?;
        Ok(res.link)
    }

    pub async fn create_brain_link(&mut self) -> ApiResult<String> {
        let res: LinkResponse = self.request(Method::POST, "/link/brain-link", None).await?;
        Ok(res.link)
    }

    pub async fn get_shared_summary(&mut self, hash: &str) -> ApiResult<Content> {
        let path = format!("/link/summary/{}", urlencoding::encode(hash));
        self.request(Method::GET, &path, None).await
    }

    pub async fn get_shared_brain(
        &mut self,
        hash_code: &str,
        source: Option<Source>,
        page_number: u32,
    ) -> ApiResult<ContentPage> {
        let path = format!(
            "/link/brain/{}{}",
            urlencoding::encode(hash_code),
            content_query(source, page_number, PAGE_SIZE)
        );
        self.request(Method::GET, &path, None).await
    }
}

/// Repository metadata straight from GitHub; never carries our bearer token.
pub(crate) async fn fetch_github_repo(owner: &str, repo: &str) -> ApiResult<GithubRepo> {
    let url = format!(
        "{GITHUB_API_URL}/repos/{}/{}",
        urlencoding::encode(owner),
        urlencoding::encode(repo)
    );
    log::debug!("GET {url}");

    let res = reqwest::Client::new()
        .get(&url)
        .header("Accept", "application/vnd.github+json")
        .send()
        .await
        .map_err(ApiError::network)?;

    let status = res.status().as_u16();
    if (200..300).contains(&status) {
        res.json().await.map_err(ApiError::parse)
    } else {
        let body = res.text().await.unwrap_or_default();
        Err(ApiError::from_response(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[test]
    fn test_needs_token_refresh_on_auth_statuses() {
        assert!(needs_token_refresh(401, ""));
        assert!(needs_token_refresh(403, "{}"));
        assert!(!needs_token_refresh(404, ""));
        assert!(!needs_token_refresh(400, "TokenExpiredError"));
    }

    #[test]
    fn test_needs_token_refresh_on_expired_token_500() {
        let body = r#"{"success":false,"message":"jwt expired","error":{"name":"TokenExpiredError"}}"#;
        assert!(needs_token_refresh(500, body));
        assert!(!needs_token_refresh(500, r#"{"message":"db down"}"#));
    }

    #[test]
    fn test_parse_envelope_extracts_data() {
        let body = r#"{"success":true,"message":"ok","data":{"link":"https://sb.app/s/abc"}}"#;
        let link: LinkResponse = parse_envelope(body).expect("envelope should parse");
        assert_eq!(link.link, "https://sb.app/s/abc");
    }

    #[test]
    fn test_parse_envelope_null_data_for_unit_like_responses() {
        let v: serde_json::Value =
            parse_envelope(r#"{"success":true,"message":"deleted"}"#).expect("should parse");
        assert!(v.is_null());
        let empty: serde_json::Value = parse_envelope("").expect("empty body should parse");
        assert!(empty.is_null());
    }

    #[test]
    fn test_parse_envelope_content_page() {
        let body = r#"{"data":{"content":[{"_id":"1","title":"t","link":"https://github.com/a/b","source":"github"}],"count":21}}"#;
        let page: ContentPage = parse_envelope(body).expect("page should parse");
        assert_eq!(page.count, 21);
        assert_eq!(page.content[0].source, Source::Github);
    }

    #[test]
    fn test_parse_envelope_rejects_invalid_json() {
        let err = parse_envelope::<LinkResponse>("<html>").unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_error_from_response_prefers_backend_message() {
        let err = ApiError::from_response(400, r#"{"success":false,"message":"Email already used"}"#);
        assert_eq!(err.to_string(), "Email already used");
        assert_eq!(err.status(), Some(400));

        let err = ApiError::from_response(502, "bad gateway");
        assert_eq!(err.to_string(), "Request failed (502)");
    }

    #[test]
    fn test_error_from_response_401_is_unauthorized() {
        assert_eq!(ApiError::from_response(401, ""), ApiError::Unauthorized);
    }

    #[test]
    fn test_share_link_message_by_status() {
        assert_eq!(
            ApiError::from_response(500, "").share_link_message(),
            "Failed to create share link. Server error. Please try again later."
        );
        assert_eq!(
            ApiError::Unauthorized.share_link_message(),
            "Failed to create share link. Please log in again."
        );
        assert!(ApiError::from_response(403, "")
            .share_link_message()
            .ends_with("permission to create share links."));
        assert!(ApiError::from_response(418, "")
            .share_link_message()
            .ends_with("Server error (418)."));
        assert!(ApiError::Network("offline".into())
            .share_link_message()
            .contains("Network error"));
    }

    #[test]
    fn test_content_query_with_and_without_source() {
        assert_eq!(
            content_query(Some(Source::Youtube), 2, 10),
            "?source=youtube&pageNumber=2&pageSize=10"
        );
        assert_eq!(content_query(None, 1, 10), "?pageNumber=1&pageSize=10");
    }

    #[test]
    fn test_parse_login_data_token() {
        let outcome = parse_login_data(serde_json::json!({"token": "jwt"})).expect("should parse");
        assert_eq!(outcome, LoginOutcome::Authenticated("jwt".to_string()));
    }

    #[test]
    fn test_parse_login_data_verification_hash() {
        let outcome = parse_login_data(serde_json::json!("a1b2/c3")).expect("should parse");
        assert_eq!(outcome, LoginOutcome::VerificationRequired("a1b2/c3".to_string()));

        let outcome =
            parse_login_data(serde_json::json!({"hashCode": "h"})).expect("should parse");
        assert_eq!(outcome, LoginOutcome::VerificationRequired("h".to_string()));
    }

    #[test]
    fn test_parse_login_data_rejects_empty() {
        assert!(parse_login_data(serde_json::json!({"token": ""})).is_err());
        assert!(parse_login_data(serde_json::Value::Null).is_err());
    }

    #[test]
    fn test_add_content_request_wire_shape() {
        let req = AddContentRequest {
            title: "Repo".to_string(),
            link: "https://github.com/a/b".to_string(),
            content_type: ContentType::Article,
            source: Source::Github,
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["type"], "article");
        assert_eq!(v["source"], "github");
    }

    #[test]
    fn test_verify_response_contract() {
        let body = r#"{"data":{"token":"t","user":{"_id":"u","isEmailVerified":true}}}"#;
        let res: VerifyResponse = parse_envelope(body).expect("should parse");
        assert_eq!(res.token.as_deref(), Some("t"));
        assert!(res.user.is_email_verified);
    }

    #[test]
    fn test_api_client_new_is_anonymous() {
        let client = ApiClient::new("http://localhost:3000/api/v1".to_string());
        assert!(!client.is_authenticated());
        assert!(ApiClient::auth_header(client.token.as_deref()).is_none());
    }

    /// Replies from a fixed script and records every call as (method, url, token).
    struct ScriptedTransport {
        replies: RefCell<VecDeque<(u16, String)>>,
        calls: RefCell<Vec<(Method, String, Option<String>)>>,
    }

    impl ScriptedTransport {
        fn new(replies: &[(u16, &str)]) -> Self {
            Self {
                replies: RefCell::new(
                    replies
                        .iter()
                        .map(|(status, body)| (*status, body.to_string()))
                        .collect(),
                ),
                calls: RefCell::new(vec![]),
            }
        }

        fn calls(&self) -> Vec<(Method, String, Option<String>)> {
            self.calls.borrow().clone()
        }
    }

    impl Transport for ScriptedTransport {
        async fn send(
            &self,
            method: Method,
            url: &str,
            token: Option<&str>,
            _body: Option<&serde_json::Value>,
        ) -> ApiResult<(u16, String)> {
            self.calls
                .borrow_mut()
                .push((method, url.to_string(), token.map(str::to_string)));
            self.replies
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| ApiError::Network("no scripted reply".to_string()))
        }
    }

    const BASE: &str = "http://api.test";

    fn signed_in_client() -> ApiClient {
        ApiClient {
            base_url: BASE.to_string(),
            token: Some("t1".to_string()),
        }
    }

    fn get_content_via(
        client: &mut ApiClient,
        transport: &ScriptedTransport,
    ) -> ApiResult<serde_json::Value> {
        block_on(client.request_via(transport, Method::GET, "/content", None))
    }

    #[test]
    fn test_expired_token_is_refreshed_and_request_retried() {
        let transport = ScriptedTransport::new(&[
            (401, r#"{"message":"Unauthorized"}"#),
            (200, r#"{"data":{"token":"t2"}}"#),
            (200, r#"{"data":{"ok":true}}"#),
        ]);
        let mut client = signed_in_client();

        let res = get_content_via(&mut client, &transport);

        assert_eq!(res, Ok(serde_json::json!({ "ok": true })));
        assert_eq!(client.token.as_deref(), Some("t2"));
        let calls = transport.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], (Method::GET, format!("{BASE}/content"), Some("t1".to_string())));
        assert_eq!(calls[1], (Method::GET, format!("{BASE}/user/refresh-token"), None));
        assert_eq!(calls[2], (Method::GET, format!("{BASE}/content"), Some("t2".to_string())));
    }

    #[test]
    fn test_token_expired_500_also_triggers_refresh() {
        let transport = ScriptedTransport::new(&[
            (500, r#"{"message":"TokenExpiredError: jwt expired"}"#),
            (200, r#"{"data":{"token":"t2"}}"#),
            (200, r#"{"data":null}"#),
        ]);
        let mut client = signed_in_client();

        assert_eq!(get_content_via(&mut client, &transport), Ok(serde_json::Value::Null));
        assert_eq!(transport.calls().len(), 3);
        assert_eq!(client.token.as_deref(), Some("t2"));
    }

    #[test]
    fn test_failed_refresh_clears_token_without_retry() {
        let transport = ScriptedTransport::new(&[
            (401, r#"{"message":"Unauthorized"}"#),
            (403, r#"{"message":"Refresh token expired"}"#),
        ]);
        let mut client = signed_in_client();

        let res = get_content_via(&mut client, &transport);

        assert_eq!(res, Err(ApiError::Unauthorized));
        assert_eq!(client.token, None);
        assert!(!client.is_authenticated());
        assert_eq!(transport.calls().len(), 2);
    }

    #[test]
    fn test_retried_request_never_refreshes_twice() {
        let transport = ScriptedTransport::new(&[
            (401, r#"{"message":"Unauthorized"}"#),
            (200, r#"{"data":{"token":"t2"}}"#),
            (401, r#"{"message":"Unauthorized"}"#),
            (200, r#"{"data":{"token":"t3"}}"#),
        ]);
        let mut client = signed_in_client();

        let res = get_content_via(&mut client, &transport);

        assert_eq!(res, Err(ApiError::Unauthorized));
        assert_eq!(client.token.as_deref(), Some("t2"));
        let calls = transport.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls
                .iter()
                .filter(|(_, url, _)| url.ends_with("/user/refresh-token"))
                .count(),
            1
        );
    }

    #[test]
    fn test_other_errors_skip_refresh() {
        let transport = ScriptedTransport::new(&[(404, r#"{"message":"Content not found"}"#)]);
        let mut client = signed_in_client();

        let res = get_content_via(&mut client, &transport);

        assert_eq!(
            res,
            Err(ApiError::Http {
                status: 404,
                message: "Content not found".to_string()
            })
        );
        assert_eq!(client.token.as_deref(), Some("t1"));
        assert_eq!(transport.calls().len(), 1);
    }

    #[test]
    fn test_auth_header_uses_bearer_scheme() {
        assert_eq!(
            ApiClient::auth_header(Some("my-jwt")).as_deref(),
            Some("Bearer my-jwt")
        );
    }
}
