/*
 * Responsibility
 * - Pull the bearer token out of the Authorization header (extraction only)
 * - Absence is a normal outcome, not an error: verification and the access
 *   decision belong to middleware::auth::access and the handlers
 */
use axum::http::{HeaderMap, header};

pub const BEARER_PREFIX: &str = "Bearer ";

/// `Authorization: Bearer <token>` → `<token>`.
///
/// The prefix is case-sensitive with exactly one space. Missing, blank or
/// non-UTF-8 headers, a missing prefix and an empty remainder all yield `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    if value.trim().is_empty() {
        return None;
    }

    let token = value.strip_prefix(BEARER_PREFIX)?;
    if token.trim().is_empty() {
        return None;
    }

    Some(token)
}
