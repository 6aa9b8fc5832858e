use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::api::auth::AuthApi;
use crate::error::{AppError, Result};
use crate::models::session::{AuthState, Credentials, Session};
use crate::models::user::{NewUser, User};
use crate::store::session::SessionStore;
use crate::validation::auth::{validate_email, validate_password, validate_username};

enum GuardState {
    Unknown,
    Anonymous,
    Authenticated(Session),
}

/// The single source of truth for "who is logged in".
///
/// The guard exclusively owns the session: views read through accessors and
/// mutate only through guard operations, so the session is never
/// half-populated and the persisted copy never drifts from the in-memory
/// one. Every mutation persists before it becomes visible.
pub struct SessionGuard {
    auth: AuthApi,
    store: SessionStore,
    state: RwLock<GuardState>,
}

impl SessionGuard {
    /// Creates a guard in the `Unknown` state. Call `restore()` before
    /// rendering any guarded view.
    pub fn new(auth: AuthApi, store: SessionStore) -> Self {
        Self {
            auth,
            store,
            state: RwLock::new(GuardState::Unknown),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, GuardState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, GuardState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Loads any persisted session. A missing or malformed record is
    /// swallowed and leaves the guard `Anonymous`; restore never fails.
    /// Afterwards the state is never `Unknown` again.
    pub async fn restore(&self) {
        match self.store.load().await {
            Some(session) => {
                tracing::info!("✅ Session restored for user: {}", session.user.username);
                *self.write() = GuardState::Authenticated(session);
            }
            None => {
                tracing::debug!("No persisted session found");
                *self.write() = GuardState::Anonymous;
            }
        }
    }

    /// The current lifecycle state.
    pub fn auth_state(&self) -> AuthState {
        match *self.read() {
            GuardState::Unknown => AuthState::Unknown,
            GuardState::Anonymous => AuthState::Anonymous,
            GuardState::Authenticated(_) => AuthState::Authenticated,
        }
    }

    /// True iff a principal is present.
    pub fn is_authenticated(&self) -> bool {
        matches!(*self.read(), GuardState::Authenticated(_))
    }

    /// True iff a principal is present and holds the admin role.
    pub fn is_admin(&self) -> bool {
        match *self.read() {
            GuardState::Authenticated(ref session) => session.user.is_admin(),
            _ => false,
        }
    }

    /// A copy of the current principal, if any.
    pub fn current_user(&self) -> Option<User> {
        match *self.read() {
            GuardState::Authenticated(ref session) => Some(session.user.clone()),
            _ => None,
        }
    }

    /// The current access token, if any. Used by the transport layer.
    pub fn access_token(&self) -> Option<String> {
        match *self.read() {
            GuardState::Authenticated(ref session) => Some(session.access_token.clone()),
            _ => None,
        }
    }

    /// Exchanges credentials for a session.
    ///
    /// On success the new session replaces the current one and is
    /// persisted. On failure any existing session is left untouched:
    /// invalid credentials surface as `AppError::Auth`, an unreachable
    /// collaborator as `AppError::Network`.
    pub async fn login(&self, credentials: Credentials) -> Result<User> {
        tracing::info!("🔐 Login attempt for: {}", credentials.username);
        validate_username(&credentials.username)?;
        validate_password(&credentials.password)?;

        let response = self.auth.login(&credentials).await?;

        let session = Session {
            user: response.user,
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        };

        self.store.save(&session).await?;

        let user = session.user.clone();
        *self.write() = GuardState::Authenticated(session);

        tracing::info!("✅ User logged in: {}", user.username);
        Ok(user)
    }

    /// Registers a new user account. The current session is unaffected.
    pub async fn register(&self, new_user: NewUser) -> Result<User> {
        validate_username(&new_user.username)?;
        validate_email(&new_user.email)?;
        validate_password(&new_user.password)?;

        let user = self.auth.register(&new_user).await?;
        tracing::info!("✅ User registered: {}", user.username);
        Ok(user)
    }

    /// Clears the session and its persisted copy. Calling this with no
    /// active session is a no-op success.
    pub async fn logout(&self) -> Result<()> {
        let had_session = {
            let mut state = self.write();
            let had = matches!(*state, GuardState::Authenticated(_));
            *state = GuardState::Anonymous;
            had
        };

        self.store.clear().await?;

        if had_session {
            tracing::info!("👋 User logged out");
        }
        Ok(())
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// On any failure the session is torn down completely (never left
    /// partially valid) and the caller gets an auth error signalling that
    /// re-authentication is required.
    pub async fn refresh(&self) -> Result<()> {
        let session = match *self.read() {
            GuardState::Authenticated(ref session) => session.clone(),
            _ => {
                return Err(AppError::Auth("No session to refresh".to_string()));
            }
        };

        match self.auth.refresh(&session.refresh_token).await {
            Ok(access_token) => {
                let renewed = Session {
                    access_token,
                    ..session
                };
                self.store.save(&renewed).await?;
                *self.write() = GuardState::Authenticated(renewed);
                tracing::debug!("🔄 Access token refreshed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("❌ Token refresh failed, tearing down session: {}", e);
                // The in-memory session is gone either way; a failing store
                // clear must not mask the re-authenticate signal.
                if let Err(clear_err) = self.logout().await {
                    tracing::warn!("⚠️ Could not clear persisted session: {}", clear_err);
                }
                Err(AppError::Auth(
                    "Session expired, please log in again".to_string(),
                ))
            }
        }
    }

    /// Replaces the principal portion of the session, keeping both tokens.
    /// The persisted copy is written before the change becomes visible.
    pub async fn update_principal(&self, user: User) -> Result<()> {
        let session = match *self.read() {
            GuardState::Authenticated(ref session) => session.clone(),
            _ => {
                return Err(AppError::Auth(
                    "Cannot update profile without a session".to_string(),
                ));
            }
        };

        let updated = Session { user, ..session };
        self.store.save(&updated).await?;

        tracing::debug!("✅ Principal updated: {}", updated.user.username);
        *self.write() = GuardState::Authenticated(updated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::AuthState;

    fn guard(name: &str) -> SessionGuard {
        let path = std::env::temp_dir().join(format!(
            "crmdesk_guard_test_{}_{}.json",
            name,
            std::process::id()
        ));
        SessionGuard::new(
            AuthApi::new(reqwest::Client::new(), "http://127.0.0.1:9".to_string()),
            SessionStore::new(path),
        )
    }

    #[test]
    fn starts_unknown() {
        let guard = guard("starts_unknown");
        assert_eq!(guard.auth_state(), AuthState::Unknown);
        assert!(!guard.is_authenticated());
        assert!(!guard.is_admin());
        assert!(guard.access_token().is_none());
    }

    #[tokio::test]
    async fn restore_without_persisted_session_is_anonymous() {
        let guard = guard("restore_empty");
        guard.store.clear().await.unwrap();
        guard.restore().await;
        assert_eq!(guard.auth_state(), AuthState::Anonymous);
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let guard = guard("logout_idempotent");
        guard.restore().await;
        guard.logout().await.unwrap();
        guard.logout().await.unwrap();
        assert!(!guard.is_authenticated());
    }

    #[tokio::test]
    async fn login_rejects_bad_input_locally() {
        let guard = guard("login_validation");
        guard.restore().await;
        let err = guard
            .login(Credentials {
                username: "x".to_string(),
                password: "correct".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn refresh_without_session_is_an_auth_error() {
        let guard = guard("refresh_no_session");
        guard.restore().await;
        assert!(matches!(
            guard.refresh().await.unwrap_err(),
            AppError::Auth(_)
        ));
    }

    #[tokio::test]
    async fn unreachable_collaborator_is_a_network_error() {
        let guard = guard("login_network");
        guard.restore().await;
        let err = guard
            .login(Credentials {
                username: "alice".to_string(),
                password: "correct".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Network(_)));
    }
}
