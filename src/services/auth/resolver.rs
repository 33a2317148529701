//! Verified subject → `UserPrincipal`.
//!
//! Only called after the token signature and expiry have been checked, so both
//! failure kinds here point at an inconsistency (e.g. a deleted account whose
//! token is still live) and are surfaced to the caller instead of being
//! downgraded to "anonymous".
use std::sync::Arc;

use thiserror::Error;

use crate::repos::error::RepoError;
use crate::repos::user_store::UserStore;
use crate::services::auth::principal::UserPrincipal;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("token subject is not a numeric user id: {0:?}")]
    MalformedSubject(String),
    #[error("user {0} not found")]
    UserNotFound(i64),
    #[error(transparent)]
    Store(#[from] RepoError),
}

#[derive(Clone)]
pub struct IdentityResolver {
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver").finish_non_exhaustive()
    }
}

impl IdentityResolver {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn resolve(&self, subject: &str) -> Result<UserPrincipal, ResolveError> {
        let user_id: i64 = subject
            .parse()
            .map_err(|_| ResolveError::MalformedSubject(subject.to_string()))?;

        let user = self
            .users
            .find_user_by_id(user_id)
            .await?
            .ok_or(ResolveError::UserNotFound(user_id))?;

        Ok(UserPrincipal::new(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::user_store::memory::InMemoryUserStore;
    use crate::services::auth::principal::UserDetails;

    fn resolver(ids: &[i64]) -> IdentityResolver {
        IdentityResolver::new(Arc::new(InMemoryUserStore::with_ids(ids)))
    }

    #[tokio::test]
    async fn known_subject_becomes_active_principal_without_authorities() {
        let principal = resolver(&[42]).resolve("42").await.unwrap();

        assert_eq!(principal.identity(), "42");
        assert_eq!(principal.user_id(), 42);
        assert!(principal.authorities().is_empty());
        assert!(principal.is_active());
        let status = principal.status;
        assert!(status.enabled);
        assert!(status.account_non_expired);
        assert!(status.account_non_locked);
        assert!(status.credentials_non_expired);
    }

    #[tokio::test]
    async fn unknown_subject_is_user_not_found() {
        let err = resolver(&[42]).resolve("999").await.unwrap_err();
        assert!(matches!(err, ResolveError::UserNotFound(999)));
    }

    #[tokio::test]
    async fn non_numeric_subject_is_malformed() {
        for subject in ["", "abc", "42abc", " 42", "4.2"] {
            let err = resolver(&[42]).resolve(subject).await.unwrap_err();
            assert!(
                matches!(err, ResolveError::MalformedSubject(ref s) if s == subject),
                "{subject:?}"
            );
        }
    }
}
