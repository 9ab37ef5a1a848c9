use axum::extract::State;
use axum::Json;
use mentorship_service::matching::{build_prompt, rank_matches};
use mentorship_service::parser::matching::{MatchRequest, MatchResponse};
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::MatcherState;

pub async fn root() -> Json<Value> {
    Json(json!({ "status": "AI Matching Service running" }))
}

/// Asks the language model to rank `mentors` for `mentee`; results are sorted by descending score.
pub async fn match_mentors(
    State(state): State<MatcherState>,
    ApiJson(request): ApiJson<MatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    if request.mentors.is_empty() {
        return Ok(Json(MatchResponse::default()));
    }

    let prompt = build_prompt(&request.mentee, &request.mentors);
    let text = state.llm.generate(&prompt).await?;
    let matches = rank_matches(&text)?;

    info!(mentee_id = %request.mentee.id, matches = matches.len(), "ranked mentors");
    Ok(Json(MatchResponse { matches }))
}
