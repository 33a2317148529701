/*
 * Responsibility
 * - URL layout for v1
 * - The auth middleware is applied to the whole tree in app.rs; per-route
 *   requirements are expressed by the extractor each handler takes
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    users::{create_user, get_me, get_user, update_me},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/users", post(create_user))
        .route("/users/me", get(get_me).patch(update_me))
        .route("/users/{user_id}", get(get_user))
}
