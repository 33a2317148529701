/*
 * Responsibility
 * - /users handlers
 * - Json → DTO validation → UserStore; results wrapped in SuccessResponse
 * - /users/me reads the principal placed by the auth middleware (AuthPrincipal)
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::v1::{
        dto::users::{CreateUserRequest, SignUpResponse, UpdateUserRequest, UserResponse},
        extractors::AuthPrincipal,
    },
    error::AppError,
    response::SuccessResponse,
    state::AppState,
};

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<SuccessResponse<SignUpResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let row = state.users.create_user(req.user_name.trim()).await?;
    let access_token = state.jwt.create_token(row.id)?;

    tracing::info!(user_id = row.id, "user created");

    Ok(SuccessResponse::created(SignUpResponse {
        user: row.into(),
        access_token,
        token_type: "Bearer",
        expires_in: state.jwt.validity().num_seconds(),
    }))
}

pub async fn get_me(AuthPrincipal(principal): AuthPrincipal) -> SuccessResponse<UserResponse> {
    SuccessResponse::ok(principal.user.into())
}

pub async fn update_me(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(req): Json<UpdateUserRequest>,
) -> Result<SuccessResponse<UserResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let row = state
        .users
        .rename_user(principal.user_id(), req.user_name.trim())
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(SuccessResponse::ok(row.into()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<SuccessResponse<UserResponse>, AppError> {
    let row = state
        .users
        .find_user_by_id(user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(SuccessResponse::ok(row.into()))
}
