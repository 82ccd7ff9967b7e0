//! The remote credential authority and the HTTP plumbing around it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use assetology_core::BearerToken;

use crate::config::{DEFAULT_AUTH_TIMEOUT, DesktopConfig};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorityError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("authority unreachable: {0}")]
    Unreachable(String),
}

/// Verifies a username/password pair and issues a bearer token.
///
/// Role and department are not part of this contract; they are asserted by
/// the client at login time.
pub trait CredentialAuthority: Send + Sync {
    fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<BearerToken, AuthorityError>> + Send;
}

impl<A> CredentialAuthority for Arc<A>
where
    A: CredentialAuthority,
{
    fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<BearerToken, AuthorityError>> + Send {
        (**self).authenticate(username, password)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// API client
// ─────────────────────────────────────────────────────────────────────────────

const LOCATION_HEADER: HeaderName = HeaderName::from_static("x-location");

/// Thin request builder for the remote API.
///
/// Every request carries JSON headers and the configured `x-location`;
/// authenticated requests additionally carry `Authorization: Bearer <token>`.
/// No client-wide timeout is set; callers bound their own requests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, location: &str) -> Result<Self, AuthorityError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        let location = HeaderValue::from_str(location)
            .map_err(|e| AuthorityError::Unreachable(format!("invalid location header: {e}")))?;
        headers.insert(LOCATION_HEADER, location);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AuthorityError::Unreachable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &DesktopConfig) -> Result<Self, AuthorityError> {
        Self::new(config.api_url.clone(), &config.location)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request, attaching the bearer token when one is supplied.
    pub fn request(&self, method: Method, path: &str, token: Option<&BearerToken>) -> RequestBuilder {
        let req = self.http.request(method, self.url(path));
        match token {
            Some(token) => req.bearer_auth(token.as_str()),
            None => req,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP authority
// ─────────────────────────────────────────────────────────────────────────────

pub const LOGIN_PATH: &str = "/Auth/Login";

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(alias = "accessToken", alias = "token")]
    access_token: Option<String>,
}

/// Credential authority reached over HTTP (`POST /Auth/Login`).
#[derive(Debug, Clone)]
pub struct HttpAuthority {
    client: ApiClient,
    timeout: Duration,
}

impl HttpAuthority {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            timeout: DEFAULT_AUTH_TIMEOUT,
        }
    }

    /// Bound on the login round-trip only.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn login_request(&self, username: &str, password: &str) -> RequestBuilder {
        self.client
            .request(Method::POST, LOGIN_PATH, None)
            .timeout(self.timeout)
            .json(&LoginBody { username, password })
    }
}

impl CredentialAuthority for HttpAuthority {
    async fn authenticate(&self, username: &str, password: &str) -> Result<BearerToken, AuthorityError> {
        let resp = self
            .login_request(username, password)
            .send()
            .await
            .map_err(|e| AuthorityError::Unreachable(e.to_string()))?;

        let status = resp.status();
        if let Some(err) = classify_status(status) {
            return Err(err);
        }

        let body: LoginResponse = resp
            .json()
            .await
            .map_err(|e| AuthorityError::Unreachable(format!("unreadable login response: {e}")))?;

        body.access_token
            .and_then(|raw| BearerToken::new(raw).ok())
            .ok_or_else(|| AuthorityError::Unreachable("login response carried no access token".to_string()))
    }
}

/// Map a login response status to an error, if it is one.
fn classify_status(status: StatusCode) -> Option<AuthorityError> {
    match status {
        s if s.is_success() => None,
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Some(AuthorityError::InvalidCredentials)
        }
        s => Some(AuthorityError::Unreachable(format!("authority responded with {s}"))),
    }
}
