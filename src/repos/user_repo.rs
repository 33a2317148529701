/*
 * Responsibility
 * - SQLx operations for the users table
 * - Audit columns: created_at/updated_at are stamped here on insert, updated_at on every update
 * - DB errors come back as RepoError
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub async fn get(db: &PgPool, user_id: i64) -> RepoResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, user_name, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn create(db: &PgPool, user_name: &str) -> RepoResult<UserRow> {
    let now = Utc::now();
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (user_name, created_at, updated_at)
        VALUES ($1, $2, $2)
        RETURNING id, user_name, created_at, updated_at
        "#,
    )
    .bind(user_name)
    .bind(now)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn update_name(db: &PgPool, user_id: i64, user_name: &str) -> RepoResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users
        SET user_name = $2, updated_at = $3
        WHERE id = $1
        RETURNING id, user_name, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(user_name)
    .bind(Utc::now())
    .fetch_optional(db)
    .await?;

    Ok(row)
}
