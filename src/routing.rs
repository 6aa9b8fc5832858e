use crate::models::session::AuthState;
use crate::services::guard::SessionGuard;

/// What a protected view should do for the current session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session state is still `Unknown`: render a neutral loading
    /// indicator, never a redirect.
    Loading,
    /// Not authenticated: redirect to the login entry point, carrying the
    /// originally requested destination so login can return there.
    RedirectToLogin { from: String },
    /// Authenticated but under-privileged for an admin-only view:
    /// redirect to the safe default destination.
    RedirectHome,
    /// Render the requested view.
    Allow,
}

/// Decides whether a protected view may render.
///
/// # Arguments
///
/// * `guard` - The session guard to consult.
/// * `requested` - The destination the caller asked for.
/// * `admin_only` - Whether the view requires the admin role.
///
/// # Returns
///
/// The `RouteDecision` for this request.
pub fn decide(guard: &SessionGuard, requested: &str, admin_only: bool) -> RouteDecision {
    match guard.auth_state() {
        AuthState::Unknown => RouteDecision::Loading,
        AuthState::Anonymous => RouteDecision::RedirectToLogin {
            from: requested.to_string(),
        },
        AuthState::Authenticated => {
            if admin_only && !guard.is_admin() {
                tracing::warn!("❌ Non-admin requested admin view: {}", requested);
                RouteDecision::RedirectHome
            } else {
                RouteDecision::Allow
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::AuthApi;
    use crate::store::session::SessionStore;

    fn guard(name: &str) -> SessionGuard {
        let path = std::env::temp_dir().join(format!(
            "crmdesk_routing_test_{}_{}.json",
            name,
            std::process::id()
        ));
        SessionGuard::new(
            AuthApi::new(reqwest::Client::new(), "http://127.0.0.1:9".to_string()),
            SessionStore::new(path),
        )
    }

    #[test]
    fn unknown_state_shows_loading_not_a_redirect() {
        let guard = guard("unknown_loading");
        assert_eq!(decide(&guard, "/customers", false), RouteDecision::Loading);
        assert_eq!(decide(&guard, "/admin/users", true), RouteDecision::Loading);
    }

    #[tokio::test]
    async fn anonymous_redirects_to_login_with_origin() {
        let guard = guard("anonymous_redirect");
        guard.restore().await;
        assert_eq!(
            decide(&guard, "/customers/42", false),
            RouteDecision::RedirectToLogin {
                from: "/customers/42".to_string()
            }
        );
    }
}
