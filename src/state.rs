/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - jwt: token codec, users: user store, identity: subject → principal
 * - Cloned per request, so everything inside is Arc/cheap to clone
 */
use std::sync::Arc;

use crate::repos::user_store::UserStore;
use crate::services::auth::{IdentityResolver, JwtCodec};

#[derive(Clone)]
pub struct AppState {
    pub jwt: Arc<JwtCodec>,
    pub users: Arc<dyn UserStore>,
    pub identity: IdentityResolver,
}

impl AppState {
    pub fn new(jwt: Arc<JwtCodec>, users: Arc<dyn UserStore>) -> Self {
        let identity = IdentityResolver::new(users.clone());
        Self {
            jwt,
            users,
            identity,
        }
    }
}
