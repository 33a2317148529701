//! Bearer JWT → `UserPrincipal` in request extensions.
//!
//! Runs once per request in front of every `/api/v1` route:
//! - no credential, or a token that fails verification → the request continues
//!   anonymously (no extension is written). Whether that is acceptable is decided
//!   later by the handler's extractor (`AuthPrincipal` vs `Option<AuthPrincipal>`).
//! - a verified token whose subject cannot be resolved → the request fails here.
//!   A good signature naming a bad subject is an inconsistency, not "logged out".

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::middleware::bearer_auth::bearer_token;
use crate::services::auth::{ResolveError, UserDetails, UserPrincipal};
use crate::state::AppState;

/// Attach the authentication middleware to `router`.
///
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::access::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // `from_fn` cannot see router state, so hand it over explicitly
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(principal) = authenticate(&state, req.headers()).await? {
        // read back by the AuthPrincipal extractor
        req.extensions_mut().insert(principal);
    }

    Ok(next.run(req).await)
}

/// Resolve the request's principal, if it presents a usable credential.
///
/// `Ok(None)` covers both "no credential" and "invalid credential".
pub async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<UserPrincipal>, ResolveError> {
    let Some(token) = bearer_token(headers) else {
        return Ok(None);
    };

    if !state.jwt.is_valid(token) {
        return Ok(None);
    }

    // Can still fail if the token expired between the two calls.
    let claims = match state.jwt.claims(token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!(error = %err, "access token rejected after validity check");
            return Ok(None);
        }
    };

    match state.identity.resolve(&claims.sub).await {
        Ok(principal) => {
            tracing::debug!(
                identity = %principal.identity(),
                authorities = principal.authorities().len(),
                active = principal.is_active(),
                "request authenticated"
            );
            Ok(Some(principal))
        }
        Err(err) => {
            tracing::warn!(error = %err, sub = %claims.sub, "verified token could not be resolved");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::to_bytes,
        http::{StatusCode, header},
        routing::get,
    };
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::api::v1::extractors::AuthPrincipal;
    use crate::repos::user_store::memory::InMemoryUserStore;
    use crate::services::auth::token::{Claims, JwtCodec, SigningKey};

    const KEY: [u8; 32] = [42u8; 32];

    fn state_with_users(ids: &[i64]) -> AppState {
        let codec = JwtCodec::new(SigningKey::from_bytes(&KEY).unwrap(), Duration::hours(1));
        AppState::new(Arc::new(codec), Arc::new(InMemoryUserStore::with_ids(ids)))
    }

    async fn whoami(principal: Option<AuthPrincipal>) -> String {
        match principal {
            Some(AuthPrincipal(p)) => {
                format!("{}|{}|{}", p.identity(), p.authorities().len(), p.is_active())
            }
            None => "anonymous".to_string(),
        }
    }

    async fn protected(AuthPrincipal(p): AuthPrincipal) -> String {
        p.identity()
    }

    fn app(state: AppState) -> Router {
        let routes = Router::new()
            .route("/whoami", get(whoami))
            .route("/protected", get(protected));
        apply(routes, state.clone()).with_state(state)
    }

    fn request(path: &str, authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(path);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn call(state: AppState, req: Request<Body>) -> (StatusCode, String) {
        let resp = app(state).oneshot(req).await.unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn signed_with_key(sub: &str) -> String {
        let now = Utc::now().timestamp();
        jsonwebtoken::encode(
            &Header::default(),
            &Claims {
                sub: sub.to_string(),
                iat: now,
                exp: now + 600,
            },
            &EncodingKey::from_secret(&KEY),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn valid_token_for_known_user_sets_principal() {
        let state = state_with_users(&[42]);
        let token = state.jwt.create_token(42).unwrap();

        let (status, body) = call(
            state,
            request("/whoami", Some(&format!("Bearer {token}"))),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "42|0|true");
    }

    #[tokio::test]
    async fn missing_header_passes_through_anonymously() {
        let (status, body) = call(state_with_users(&[42]), request("/whoami", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "anonymous");
    }

    #[tokio::test]
    async fn invalid_credentials_pass_through_anonymously() {
        let state = state_with_users(&[42]);
        let other = JwtCodec::new(SigningKey::from_bytes(&[1u8; 32]).unwrap(), Duration::hours(1));
        let foreign = other.create_token(42).unwrap();
        let expired = state
            .jwt
            .create_token_at(42, Utc::now() - Duration::hours(2))
            .unwrap();
        let good = state.jwt.create_token(42).unwrap();

        for value in [
            format!("Bearer {foreign}"),
            format!("Bearer {expired}"),
            format!("bearer {good}"),
            "Bearer not.a.jwt".to_string(),
            "Bearer".to_string(),
            String::new(),
        ] {
            let (status, body) = call(state.clone(), request("/whoami", Some(&value))).await;
            assert_eq!(status, StatusCode::OK, "{value:?}");
            assert_eq!(body, "anonymous", "{value:?}");
        }
    }

    #[tokio::test]
    async fn valid_token_for_missing_user_fails_the_request() {
        let state = state_with_users(&[42]);
        let token = state.jwt.create_token(999).unwrap();

        let (status, body) = call(
            state,
            request("/whoami", Some(&format!("Bearer {token}"))),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["isSuccess"], false);
        assert_eq!(json["code"], "AUTH404");
    }

    #[tokio::test]
    async fn signed_token_with_non_numeric_subject_fails_the_request() {
        let state = state_with_users(&[42]);
        let token = signed_with_key("alice");

        let (status, _) = call(
            state,
            request("/whoami", Some(&format!("Bearer {token}"))),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn protected_route_rejects_anonymous_but_accepts_principal() {
        let state = state_with_users(&[7]);
        let token = state.jwt.create_token(7).unwrap();

        let (status, body) = call(state.clone(), request("/protected", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["code"], "AUTH401");

        let (status, body) = call(
            state,
            request("/protected", Some(&format!("Bearer {token}"))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "7");
    }

    #[tokio::test]
    async fn authenticate_reports_none_for_absent_credential() {
        let state = state_with_users(&[]);
        let principal = authenticate(&state, &HeaderMap::new()).await.unwrap();
        assert!(principal.is_none());
    }
}
