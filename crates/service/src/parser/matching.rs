use serde::{Deserialize, Serialize};

use super::profile::{MenteeProfile, MentorProfile};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchRequest {
    pub mentee: MenteeProfile,
    pub mentors: Vec<MentorProfile>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub mentor_id: String,
    pub score: f64,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchResult>,
}
