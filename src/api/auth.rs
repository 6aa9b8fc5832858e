use reqwest::header;
use serde::Deserialize;

use crate::api::client::{classify_error, parse_json};
use crate::error::{AppError, Result};
use crate::models::session::Credentials;
use crate::models::user::{NewUser, User};

/// The response payload for a successful login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct RegisterResponse {
    user: User,
}

/// The unauthenticated auth endpoints of the collaborator. Used only by
/// the session guard; every other call goes through `ApiClient`.
#[derive(Clone)]
pub struct AuthApi {
    http: reqwest::Client,
    base_url: String,
}

impl AuthApi {
    /// Creates a new `AuthApi`.
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Exchanges credentials for a session payload.
    ///
    /// Invalid credentials surface as `AppError::Auth`; an unreachable
    /// collaborator surfaces as `AppError::Network`, so callers can tell
    /// the two apart.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let body = self.post("/auth/login", credentials).await?;
        parse_json(&body)
    }

    /// Registers a new user account. The current session is unaffected.
    pub async fn register(&self, new_user: &NewUser) -> Result<User> {
        let body = self.post("/auth/register", new_user).await?;
        let response: RegisterResponse = parse_json(&body)?;
        Ok(response.user)
    }

    /// Exchanges a refresh token for a new access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String> {
        let payload = sonic_rs::json!({ "refresh_token": refresh_token });
        let body = self.post("/auth/refresh", &payload).await?;
        let response: RefreshResponse = parse_json(&body)?;
        Ok(response.access_token)
    }

    async fn post<T: serde::Serialize>(&self, path: &str, payload: &T) -> Result<String> {
        let body = sonic_rs::to_string(payload)
            .map_err(|e| AppError::Serialization(format!("Request serialization failed: {}", e)))?;

        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(classify_error(status, &text))
        }
    }
}
