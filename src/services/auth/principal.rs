//! Authenticated identity attached to a request.
//!
//! `UserPrincipal` is built once per request by the auth middleware and read by
//! handlers through the `AuthPrincipal` extractor.

use crate::repos::user_repo::UserRow;

/// What downstream code may ask of an authenticated identity.
pub trait UserDetails {
    /// Stable identity string (the stringified user id).
    fn identity(&self) -> String;

    fn authorities(&self) -> &[String];

    fn is_active(&self) -> bool;
}

/// Account lifecycle flags.
///
/// There is no suspension/expiry mechanism yet, so `active()` is the only state produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountStatus {
    pub enabled: bool,
    pub account_non_expired: bool,
    pub account_non_locked: bool,
    pub credentials_non_expired: bool,
}

impl AccountStatus {
    pub fn active() -> Self {
        Self {
            enabled: true,
            account_non_expired: true,
            account_non_locked: true,
            credentials_non_expired: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserPrincipal {
    pub user: UserRow,
    // No roles are assigned yet.
    pub authorities: Vec<String>,
    pub status: AccountStatus,
}

impl UserPrincipal {
    pub fn new(user: UserRow) -> Self {
        Self {
            user,
            authorities: Vec::new(),
            status: AccountStatus::active(),
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user.id
    }
}

impl UserDetails for UserPrincipal {
    fn identity(&self) -> String {
        self.user.id.to_string()
    }

    fn authorities(&self) -> &[String] {
        &self.authorities
    }

    fn is_active(&self) -> bool {
        let s = self.status;
        s.enabled && s.account_non_expired && s.account_non_locked && s.credentials_non_expired
    }
}
