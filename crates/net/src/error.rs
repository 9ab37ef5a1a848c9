use axum::extract::rejection::{FormRejection, JsonRejection, QueryRejection};
use axum::http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use mentorship_service::auth::AuthError;
use mentorship_service::matching::RankingError;
use mentorship_service::remote::RemoteError;
use mentorship_service::store::StoreError;
use serde_json::json;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::error;

/// Every handler failure. Rendered as `{"detail": "..."}` with the matching status code.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Incorrect email or password")]
    InvalidLogin,

    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error("Blocking task failed: {0}")]
    Task(#[from] JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidLogin | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(StoreError::DuplicateEmail) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::KeyTooLong) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(_) | ApiError::Auth(_) | ApiError::Ranking(_) | ApiError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Remote(remote) => match remote {
                RemoteError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                RemoteError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                RemoteError::Status { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                RemoteError::Decode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn detail(&self) -> String {
        match self {
            // Storage and hashing internals stay in the logs.
            ApiError::Store(StoreError::DuplicateEmail | StoreError::KeyTooLong) => self.to_string(),
            ApiError::Store(_) | ApiError::Auth(_) | ApiError::Task(_) => {
                "An internal server error occurred.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

// Malformed bodies and query strings are validation failures.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(%status, "{self}");
        }

        let mut response = (status, Json(json!({ "detail": self.detail() }))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}
