/*
 * Responsibility
 * - Common JSON envelopes for every API response (success and error)
 * - ResponseCode: one place that pairs an application code with its message and HTTP status
 * - Handlers build envelopes through the factories here, never by hand
 */
use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use chrono::Local;
use serde::Serialize;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Ok,
    Created,
    BadRequest,
    Unauthorized,
    UserNotFound,
    AuthUserNotFound,
    InternalServerError,
}

impl ResponseCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ok => "COMMON200",
            Self::Created => "COMMON201",
            Self::BadRequest => "COMMON400",
            Self::Unauthorized => "AUTH401",
            Self::UserNotFound => "USER404",
            Self::AuthUserNotFound => "AUTH404",
            Self::InternalServerError => "COMMON500",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Ok => "request succeeded",
            Self::Created => "resource created",
            Self::BadRequest => "invalid request",
            Self::Unauthorized => "authentication required",
            Self::UserNotFound => "user not found",
            Self::AuthUserNotFound => "authenticated user no longer exists",
            Self::InternalServerError => "internal server error",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Ok => StatusCode::OK,
            Self::Created => StatusCode::CREATED,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::AuthUserNotFound => StatusCode::UNAUTHORIZED,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Fields shared by every envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub timestamp: String,
}

impl BaseResponse {
    pub fn of(is_success: bool, code: ResponseCode) -> Self {
        Self::with_message(is_success, code, code.message())
    }

    pub fn with_message(is_success: bool, code: ResponseCode, message: impl Into<String>) -> Self {
        Self {
            is_success,
            code: code.code().to_string(),
            message: message.into(),
            timestamp: now_timestamp(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse<T> {
    pub is_success: bool,
    pub timestamp: String,
    pub code: String,
    pub message: String,
    pub data: T,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn of(code: ResponseCode, data: T) -> Self {
        let base = BaseResponse::of(true, code);
        Self {
            is_success: base.is_success,
            timestamp: base.timestamp,
            code: base.code,
            message: base.message,
            data,
            status: code.http_status(),
        }
    }

    pub fn ok(data: T) -> Self {
        Self::of(ResponseCode::Ok, data)
    }

    pub fn created(data: T) -> Self {
        Self::of(ResponseCode::Created, data)
    }
}

impl<T: Serialize> IntoResponse for SuccessResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Error envelope. `data` carries optional details (validation hints etc.).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse<T = ()> {
    pub is_success: bool,
    pub timestamp: String,
    pub code: String,
    pub http_status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ErrorResponse<()> {
    pub fn from_code(code: ResponseCode) -> Self {
        Self::build(code, None, code.message())
    }

    pub fn of(code: ResponseCode, message: impl Into<String>) -> Self {
        Self::build(code, None, message)
    }
}

impl<T: Serialize> ErrorResponse<T> {
    pub fn with_data(code: ResponseCode, data: T) -> Self {
        Self::build(code, Some(data), code.message())
    }

    fn build(code: ResponseCode, data: Option<T>, message: impl Into<String>) -> Self {
        let base = BaseResponse::with_message(false, code, message);
        Self {
            is_success: base.is_success,
            timestamp: base.timestamp,
            code: base.code,
            http_status: code.http_status().as_u16(),
            message: base.message,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ErrorResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
