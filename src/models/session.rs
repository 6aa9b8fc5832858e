use serde::{Deserialize, Serialize};

use crate::models::user::User;

/// Represents an authenticated session: the principal plus both tokens.
///
/// A `Session` is never half-populated. Principal and tokens are created
/// together on login (or restore) and torn down together on logout, so a
/// principal without tokens, or tokens without a principal, cannot exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The authenticated principal.
    pub user: User,
    /// The opaque bearer token attached to authenticated requests.
    pub access_token: String,
    /// The opaque token exchanged for a new access token on expiry.
    pub refresh_token: String,
}

/// The observable lifecycle of the session guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// Before `restore()` has completed. Guarded views show a loading
    /// state, not a redirect, while in this state.
    Unknown,
    /// No session present.
    Anonymous,
    /// A principal and its tokens are present.
    Authenticated,
}

/// The credentials submitted on login.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
