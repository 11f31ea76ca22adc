//! User entity model and DTOs.

use pawclass_core::roles::Role;
use pawclass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_admin: bool,
    pub phone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// The user's role as the core sum type.
    pub fn role(&self) -> Role {
        Role::parse(&self.role)
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_admin: bool,
    pub phone: String,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let role = user.role();
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role,
            is_admin: user.is_admin,
            phone: user.phone,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
