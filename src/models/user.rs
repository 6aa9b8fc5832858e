use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A user's role. Role is the sole authorization axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A regular CRM user.
    Customer,
    /// An administrator with access to user management.
    Admin,
}

/// Represents a user account as returned by the auth collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// The unique identifier for the user.
    pub id: i64,
    /// The user's username.
    pub username: String,
    /// The user's email address.
    pub email: String,
    /// The user's role.
    pub role: Role,
    /// The customer record this account is linked to, if any.
    #[serde(default)]
    pub customer_id: Option<i64>,
    /// Whether the account is active.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// The timestamp of the user's last login.
    #[serde(default)]
    pub last_login: Option<NaiveDateTime>,
    /// The timestamp when the account was created.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

fn default_active() -> bool {
    true
}

impl User {
    /// True iff this user holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// The payload for registering a new user account.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
}

/// The fields of a user account that can be edited.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
