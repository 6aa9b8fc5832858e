use std::sync::Arc;

use reqwest::{Method, StatusCode, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::services::guard::SessionGuard;

/// The shape of a collaborator error body. Auth endpoints use `error`,
/// customer endpoints use `message`.
#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Extracts a human-readable message from an error response body.
pub(crate) fn error_message(body: &str) -> Option<String> {
    sonic_rs::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
}

/// Parses a JSON response body, mapping parse failures to a
/// `Serialization` error so raw parser errors never reach callers.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    sonic_rs::from_str(body)
        .map_err(|e| AppError::Serialization(format!("Unexpected response body: {}", e)))
}

/// Maps a non-2xx response to the error taxonomy.
pub(crate) fn classify_error(status: StatusCode, body: &str) -> AppError {
    let message = error_message(body);
    match status {
        StatusCode::BAD_REQUEST => {
            AppError::Validation(message.unwrap_or_else(|| "Invalid request".to_string()))
        }
        StatusCode::UNAUTHORIZED => {
            AppError::Auth(message.unwrap_or_else(|| "Authentication required".to_string()))
        }
        StatusCode::FORBIDDEN => AppError::Forbidden,
        StatusCode::NOT_FOUND => AppError::NotFound,
        _ => AppError::Network(format!(
            "Unexpected status {}: {}",
            status.as_u16(),
            message.unwrap_or_default()
        )),
    }
}

/// The authorized transport: attaches the guard's access token as a bearer
/// credential and, on a 401, refreshes and retries exactly once.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    guard: Arc<SessionGuard>,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Arguments
    ///
    /// * `http` - The shared HTTP client.
    /// * `base_url` - The API base URL, without a trailing slash.
    /// * `guard` - The session guard supplying tokens.
    pub fn new(http: reqwest::Client, base_url: String, guard: Arc<SessionGuard>) -> Self {
        Self {
            http,
            base_url,
            guard,
        }
    }

    /// Sends a GET request to `path` with the given query parameters.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        self.send(Method::GET, path, query, None).await
    }

    /// Sends a POST request with a JSON body.
    pub async fn post(&self, path: &str, body: String) -> Result<String> {
        self.send(Method::POST, path, &[], Some(body)).await
    }

    /// Sends a PUT request with a JSON body.
    pub async fn put(&self, path: &str, body: String) -> Result<String> {
        self.send(Method::PUT, path, &[], Some(body)).await
    }

    /// Sends a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<String> {
        self.send(Method::DELETE, path, &[], None).await
    }

    /// Sends one authenticated request. A 401 triggers `guard.refresh()`
    /// and a single retry; a second rejection surfaces as an auth error
    /// rather than looping.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<String>,
    ) -> Result<String> {
        let mut refreshed = false;

        loop {
            let token = self
                .guard
                .access_token()
                .ok_or_else(|| AppError::Auth("Not logged in".to_string()))?;

            let url = format!("{}{}", self.base_url, path);
            let mut request = self.http.request(method.clone(), &url).bearer_auth(&token);

            if !query.is_empty() {
                request = request.query(query);
            }

            if let Some(ref body) = body {
                request = request
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(body.clone());
            }

            let response = request.send().await?;
            let status = response.status();
            let text = response.text().await?;

            if status == StatusCode::UNAUTHORIZED && !refreshed {
                refreshed = true;
                tracing::debug!("🔄 Access token rejected, refreshing once: {} {}", method, path);
                self.guard.refresh().await?;
                continue;
            }

            if status.is_success() {
                return Ok(text);
            }

            return Err(classify_error(status, &text));
        }
    }
}
