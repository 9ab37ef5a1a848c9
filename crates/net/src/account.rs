use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mentorship_database::basic_db::SafeDatabase;
use mentorship_service::auth::password::verify_password;
use mentorship_service::parser::user::{
    normalize_email, LoginForm, Token, User, UserCreate, UserResponse,
};
use mentorship_service::store::{find_user_by_email, insert_user, list_users};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::task::spawn_blocking;
use tracing::info;

use crate::error::ApiError;
use crate::extract::{ApiForm, ApiJson, ApiQuery, BearerClaims};
use crate::state::BackendState;

const MAX_PAGE_SIZE: usize = 100;

#[derive(Deserialize)]
pub struct Paging {
    #[serde(default)]
    skip: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    10
}

pub async fn root() -> Json<Value> {
    Json(json!({ "status": "Backend running" }))
}

/// Resolves token claims to the stored account. Tokens for deleted or unknown users are rejected.
pub fn current_user<T: SafeDatabase>(
    state: &BackendState<T>,
    claims: &BearerClaims,
) -> Result<UserResponse, ApiError> {
    find_user_by_email(&state.database, &claims.0.sub)?
        .map(UserResponse::from)
        .ok_or(ApiError::Unauthorized)
}

pub async fn login<T: SafeDatabase>(
    State(state): State<BackendState<T>>,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<Json<Token>, ApiError> {
    let LoginForm { username, password } = form;

    let verified = match find_user_by_email(&state.database, &normalize_email(&username))? {
        Some(user) => {
            spawn_blocking(move || verify_password(&password, &user.password_hash).then_some(user))
                .await?
        }
        None => None,
    };

    let user = verified.ok_or_else(|| {
        info!("failed login attempt");
        ApiError::InvalidLogin
    })?;

    let access_token = state.keys.issue(&user.email, Some(&user.user_type))?;
    info!(user_id = %user.id, "issued access token");

    Ok(Json(Token::bearer(access_token)))
}

pub async fn create_user<T: SafeDatabase>(
    State(state): State<BackendState<T>>,
    ApiJson(payload): ApiJson<UserCreate>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let user = spawn_blocking(move || User::from_signup(payload)).await??;
    insert_user(&state.database, &user)?;
    info!(user_id = %user.id, user_type = %user.user_type, "created user");

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn read_users_me<T: SafeDatabase>(
    State(state): State<BackendState<T>>,
    claims: BearerClaims,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(current_user(&state, &claims)?))
}

pub async fn read_users<T: SafeDatabase>(
    State(state): State<BackendState<T>>,
    claims: BearerClaims,
    ApiQuery(paging): ApiQuery<Paging>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    current_user(&state, &claims)?;

    let users = list_users(&state.database, paging.skip, paging.limit.min(MAX_PAGE_SIZE))?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
