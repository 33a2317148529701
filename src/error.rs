/*
 * Responsibility
 * - AppError shared by handlers, extractors and the auth middleware
 * - IntoResponse: every failure leaves the process as an ErrorResponse envelope
 * - Conversions from lower layers (RepoError, ResolveError, TokenError)
 */
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::response::{ErrorResponse, ResponseCode};
use crate::services::auth::{ResolveError, TokenError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    /// A correctly signed token names a user that is not in the store.
    #[error("authenticated subject {0} does not exist")]
    SubjectNotFound(i64),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => {
                ErrorResponse::of(ResponseCode::BadRequest, message).into_response()
            }
            AppError::Unauthorized => {
                ErrorResponse::from_code(ResponseCode::Unauthorized).into_response()
            }
            AppError::NotFound { resource } => {
                ErrorResponse::of(ResponseCode::UserNotFound, format!("{resource} not found."))
                    .into_response()
            }
            AppError::SubjectNotFound(user_id) => {
                ErrorResponse::with_data(ResponseCode::AuthUserNotFound, json!({ "userId": user_id }))
                    .into_response()
            }
            AppError::Internal => {
                ErrorResponse::from_code(ResponseCode::InternalServerError).into_response()
            }
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = %e, "repository failure");
        AppError::Internal
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::UserNotFound(id) => AppError::SubjectNotFound(id),
            // We never mint such tokens, so a signed one means key misuse or a bug.
            ResolveError::MalformedSubject(_) => AppError::Internal,
            ResolveError::Store(e) => AppError::from(e),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Invalid(_) => AppError::Unauthorized,
            TokenError::Sign(_)
            | TokenError::WeakKey { .. }
            | TokenError::KeyEncoding
            | TokenError::ExpiryOutOfRange => {
                AppError::Internal
            }
        }
    }
}
