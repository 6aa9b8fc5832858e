use serde::Deserialize;

use crate::api::client::{ApiClient, parse_json};
use crate::error::{AppError, Result};
use crate::models::user::{User, UserUpdate};

#[derive(Deserialize)]
struct UsersResponse {
    users: Vec<User>,
}

#[derive(Deserialize)]
struct UserResponse {
    user: User,
}

/// The admin-scoped users collection under the auth API.
#[derive(Clone)]
pub struct UserApi {
    client: ApiClient,
}

impl UserApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// GET every user account. Admin only; a non-admin caller gets a
    /// `Forbidden` from the collaborator.
    pub async fn list(&self) -> Result<Vec<User>> {
        let body = self.client.get("/auth/users", &[]).await?;
        let response: UsersResponse = parse_json(&body)?;
        Ok(response.users)
    }

    /// GET one user account by id.
    pub async fn fetch(&self, id: i64) -> Result<User> {
        let body = self.client.get(&format!("/auth/users/{}", id), &[]).await?;
        let response: UserResponse = parse_json(&body)?;
        Ok(response.user)
    }

    /// PUT an update to one user account.
    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<User> {
        let body = sonic_rs::to_string(update)
            .map_err(|e| AppError::Serialization(format!("Request serialization failed: {}", e)))?;
        let body = self.client.put(&format!("/auth/users/{}", id), body).await?;
        let response: UserResponse = parse_json(&body)?;
        Ok(response.user)
    }

    /// DELETE one user account.
    pub async fn remove(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("/auth/users/{}", id)).await?;
        Ok(())
    }
}
