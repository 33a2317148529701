/*
 * Responsibility
 * - Users request/response DTOs
 * - validate(): shape checks only, before anything reaches the store
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::user_repo::UserRow;

const MAX_USER_NAME_CHARS: usize = 64;

fn validate_user_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("user_name is required");
    }
    if name.chars().count() > MAX_USER_NAME_CHARS {
        return Err("user_name must be <= 64 chars");
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub user_name: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_user_name(&self.user_name)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub user_name: String,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_user_name(&self.user_name)
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            user_name: row.user_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Returned on sign-up: the new user plus a ready-to-use access token.
#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub user: UserResponse,
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: &'static str,
    /// Seconds until expiry.
    pub expires_in: i64,
}
