use axum::extract::{Path, State};
use axum::Json;
use mentorship_database::basic_db::SafeDatabase;
use mentorship_service::remote::openvidu::is_valid_session_id;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::extract::{ApiJson, BearerClaims};
use crate::state::BackendState;

#[derive(Deserialize)]
pub struct TokenRequest {
    #[serde(rename = "sessionId")]
    session_id: String,
}

fn checked_session_id(session_id: &str) -> Result<(), ApiError> {
    if !is_valid_session_id(session_id) {
        return Err(ApiError::BadRequest(format!("Invalid session id: {session_id}")));
    }
    Ok(())
}

/// Joins (creating if needed) a video session and returns a connection token for the caller.
pub async fn get_token<T: SafeDatabase>(
    State(state): State<BackendState<T>>,
    claims: BearerClaims,
    ApiJson(request): ApiJson<TokenRequest>,
) -> Result<Json<Value>, ApiError> {
    checked_session_id(&request.session_id)?;

    let token = state.video.token(&request.session_id).await?;
    info!(session_id = %request.session_id, user = %claims.0.sub, "issued video token");

    Ok(Json(json!({ "token": token })))
}

pub async fn create_session<T: SafeDatabase>(
    State(state): State<BackendState<T>>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<Value>, ApiError> {
    if let Some(custom) = body.get("customSessionId").and_then(Value::as_str) {
        checked_session_id(custom)?;
    }

    Ok(Json(state.video.create_session(&body).await?))
}

pub async fn create_connection<T: SafeDatabase>(
    State(state): State<BackendState<T>>,
    Path(session_id): Path<String>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<Value>, ApiError> {
    checked_session_id(&session_id)?;

    Ok(Json(state.video.create_connection(&session_id, &body).await?))
}
