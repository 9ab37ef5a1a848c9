use axum::extract::State;
use axum::Json;
use mentorship_database::basic_db::SafeDatabase;
use mentorship_service::parser::matching::{MatchRequest, MatchResponse};
use mentorship_service::store::{find_mentee, list_mentors};
use serde::Deserialize;
use tracing::info;

use crate::account::current_user;
use crate::error::ApiError;
use crate::extract::{ApiQuery, BearerClaims};
use crate::state::BackendState;

#[derive(Deserialize)]
pub struct RecommendationQuery {
    mentee_id: String,
}

/// Ranks stored mentors for a mentee through the AI matching service.
pub async fn get_recommendations<T: SafeDatabase>(
    State(state): State<BackendState<T>>,
    claims: BearerClaims,
    ApiQuery(query): ApiQuery<RecommendationQuery>,
) -> Result<Json<MatchResponse>, ApiError> {
    let caller = current_user(&state, &claims)?;

    if caller.id != query.mentee_id && !caller.is_admin() {
        return Err(ApiError::Forbidden(
            "Not authorized to get recommendations for this mentee".to_string(),
        ));
    }

    let mentee = find_mentee(&state.database, &query.mentee_id)?
        .ok_or_else(|| ApiError::NotFound("Mentee profile not found".to_string()))?;

    let mentors = list_mentors(&state.database)?;
    if mentors.is_empty() {
        info!(mentee_id = %mentee.id, "no mentors registered, skipping matcher");
        return Ok(Json(MatchResponse::default()));
    }

    let response = state
        .matcher
        .recommend(&MatchRequest { mentee, mentors })
        .await?;

    Ok(Json(response))
}
