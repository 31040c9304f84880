//! User Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Account type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Admin,
    #[default]
    User,
}

/// Stored user document (includes password hash and token pair)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// argon2 PHC string
    pub password: String,
    pub avatar: Option<String>,
    #[serde(default)]
    pub user_type: UserType,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// User as returned to clients (without password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<String>,
    pub user_type: UserType,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            user_id: u.user_id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            phone: u.phone,
            avatar: u.avatar,
            user_type: u.user_type,
            token: u.token,
            refresh_token: u.refresh_token,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Signup payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 2, max = 100))]
    pub first_name: String,
    #[validate(length(min = 2, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    #[validate(length(max = 2048))]
    pub avatar: Option<String>,
    pub user_type: Option<UserType>,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}
