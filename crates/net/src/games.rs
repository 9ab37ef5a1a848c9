use axum::Json;
use mentorship_service::parser::games::{ScoreReceipt, ScoreRequest};
use serde_json::{json, Value};
use tracing::info;

use crate::extract::{ApiJson, BearerClaims};

pub async fn root() -> Json<Value> {
    Json(json!({ "status": "Games Service running" }))
}

pub async fn save_score(
    BearerClaims(claims): BearerClaims,
    ApiJson(score): ApiJson<ScoreRequest>,
) -> Json<ScoreReceipt> {
    info!(
        user = %claims.sub,
        total = score.total_score,
        highest = score.highest_score,
        "score received"
    );

    Json(ScoreReceipt {
        msg: format!("Score saved for {}", claims.sub),
        total_score: score.total_score,
        highest_score: score.highest_score,
    })
}
