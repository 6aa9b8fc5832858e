use std::sync::Arc;

use crate::api::users::UserApi;
use crate::error::Result;
use crate::models::user::{User, UserUpdate};
use crate::services::guard::SessionGuard;

/// Admin-facing user management, kept consistent with the session guard:
/// editing the signed-in account updates the principal, deleting it logs
/// the session out.
#[derive(Clone)]
pub struct UserDirectory {
    api: UserApi,
    guard: Arc<SessionGuard>,
}

impl UserDirectory {
    pub fn new(api: UserApi, guard: Arc<SessionGuard>) -> Self {
        Self { api, guard }
    }

    /// Lists every user account. Admin only.
    pub async fn list(&self) -> Result<Vec<User>> {
        self.api.list().await
    }

    /// Fetches one user account.
    pub async fn fetch(&self, id: i64) -> Result<User> {
        self.api.fetch(id).await
    }

    /// Updates one user account. When the target is the signed-in user,
    /// the guard's principal is replaced as well so the session never
    /// shows stale profile data.
    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<User> {
        let user = self.api.update(id, update).await?;

        let is_self = self
            .guard
            .current_user()
            .is_some_and(|current| current.id == id);
        if is_self {
            self.guard.update_principal(user.clone()).await?;
        }

        tracing::info!("✅ User updated: {}", user.username);
        Ok(user)
    }

    /// Deletes one user account. Deleting the signed-in account tears the
    /// session down.
    pub async fn remove(&self, id: i64) -> Result<()> {
        self.api.remove(id).await?;

        let is_self = self
            .guard
            .current_user()
            .is_some_and(|current| current.id == id);
        if is_self {
            tracing::warn!("⚠️ Signed-in account deleted, logging out");
            self.guard.logout().await?;
        }

        tracing::info!("🗑️ User deleted: {}", id);
        Ok(())
    }
}
