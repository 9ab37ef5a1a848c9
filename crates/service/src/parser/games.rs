use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub total_score: i64,
    pub highest_score: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreReceipt {
    pub msg: String,
    pub total_score: i64,
    pub highest_score: i64,
}
