//! User lookup seam used by authentication and the user handlers.
//!
//! Production goes through `PgUserStore` (thin wrapper over `user_repo`);
//! tests swap in `InMemoryUserStore` so no database is needed.
use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::error::RepoResult;
use crate::repos::user_repo::{self, UserRow};

#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    async fn find_user_by_id(&self, id: i64) -> RepoResult<Option<UserRow>>;

    async fn create_user(&self, user_name: &str) -> RepoResult<UserRow>;

    async fn rename_user(&self, id: i64, user_name: &str) -> RepoResult<Option<UserRow>>;
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_user_by_id(&self, id: i64) -> RepoResult<Option<UserRow>> {
        user_repo::get(&self.db, id).await
    }

    async fn create_user(&self, user_name: &str) -> RepoResult<UserRow> {
        user_repo::create(&self.db, user_name).await
    }

    async fn rename_user(&self, id: i64, user_name: &str) -> RepoResult<Option<UserRow>> {
        user_repo::update_name(&self.db, id, user_name).await
    }
}
