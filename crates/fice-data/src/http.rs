//! Blocking HTTP client for the TALC (auth/audit) and FICE backends.
//!
//! Requests are JSON in, JSON out. A bearer token is attached when the
//! client holds one, and non-2xx responses are turned into
//! [`ApiError::Status`] with the most useful message the body offers.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::types::Role;

/// Which backend a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Trust, audit and login service.
    Talc,
    /// Financial identity service.
    Fice,
}

impl Target {
    pub fn name(self) -> &'static str {
        match self {
            Target::Talc => "TALC",
            Target::Fice => "FICE",
        }
    }
}

/// Client for both backends.
///
/// Base URLs may be empty; requests to an unconfigured target fail with
/// [`ApiError::MissingBaseUrl`] without touching the network.
#[derive(Debug, Clone, Default)]
pub struct ApiClient {
    talc_base: String,
    fice_base: String,
    token: Option<String>,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(talc_base: impl Into<String>, fice_base: impl Into<String>) -> Self {
        Self {
            talc_base: talc_base.into(),
            fice_base: fice_base.into(),
            token: None,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Attaches a bearer token to every subsequent request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn base(&self, target: Target) -> &str {
        match target {
            Target::Talc => &self.talc_base,
            Target::Fice => &self.fice_base,
        }
    }

    /// Full URL for `path` on `target`.
    pub fn url(&self, target: Target, path: &str) -> Result<String, ApiError> {
        join_url(self.base(target), path).ok_or(ApiError::MissingBaseUrl(target.name()))
    }

    /// Sends a request and decodes the JSON response.
    ///
    /// Returns `Ok(None)` when the response body is empty.
    pub fn request<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        target: Target,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Option<T>, ApiError> {
        let url = self.url(target, path)?;
        debug!(%method, %url, "backend request");

        let mut request = self.http.request(method, &url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        let response = request
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        map_response(response)
    }

    pub fn post<T: DeserializeOwned>(
        &self,
        target: Target,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Option<T>, ApiError> {
        self.request(reqwest::Method::POST, target, path, body)
    }

    pub fn get<T: DeserializeOwned>(&self, target: Target, path: &str) -> Result<Option<T>, ApiError> {
        self.request(reqwest::Method::GET, target, path, None)
    }
}

fn map_response<T: DeserializeOwned>(
    response: reqwest::blocking::Response,
) -> Result<Option<T>, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(ApiError::Status {
            code: status.as_u16(),
            message: error_message(status.as_u16(), &text),
        });
    }
    decode_body(&text)
}

/// Joins a base URL and a path, trimming one trailing `/` from the base.
///
/// Returns `None` when the base is empty.
pub fn join_url(base: &str, path: &str) -> Option<String> {
    if base.is_empty() {
        return None;
    }
    let base = base.strip_suffix('/').unwrap_or(base);
    if path.starts_with('/') {
        Some(format!("{}{}", base, path))
    } else {
        Some(format!("{}/{}", base, path))
    }
}

/// Picks a human message out of an error body.
///
/// Prefers JSON `message`, then `error`, then the JSON itself, then the raw
/// text, and finally `Error <status>` for an empty body.
pub fn error_message(status: u16, body: &str) -> String {
    let message = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => ["message", "error"]
            .iter()
            .find_map(|key| {
                json.get(key)
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.is_empty())
                    .map(String::from)
            })
            .unwrap_or_else(|| json.to_string()),
        Err(_) => body.to_string(),
    };
    if message.is_empty() {
        format!("Error {}", status)
    } else {
        message
    }
}

/// Decodes a success body; an empty body is `None`.
pub fn decode_body<T: DeserializeOwned>(text: &str) -> Result<Option<T>, ApiError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

// ---------------------------------------------------------------------------
// Auth API
// ---------------------------------------------------------------------------

/// Login response; every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Calls against the TALC `/auth` endpoints.
pub mod auth_api {
    use super::*;

    fn credentials(email: &str, password: &str) -> serde_json::Value {
        serde_json::json!({ "email": email, "password": password })
    }

    pub fn login(client: &ApiClient, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        client
            .post(Target::Talc, "/auth/login", Some(&credentials(email, password)))
            .map(Option::unwrap_or_default)
    }

    pub fn register(
        client: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<Option<serde_json::Value>, ApiError> {
        client.post(Target::Talc, "/auth/register", Some(&credentials(email, password)))
    }

    pub fn logout(client: &ApiClient) -> Result<Option<serde_json::Value>, ApiError> {
        client.post(Target::Talc, "/auth/logout", None)
    }
}
